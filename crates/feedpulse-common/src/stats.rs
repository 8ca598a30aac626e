//! Aggregate counts over stored feedback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::feedback::FeedbackItem;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStats {
    pub total: u64,
    /// Count per canonical label. Categories with no feedback are absent.
    pub by_category: BTreeMap<String, u64>,
}

/// One bar of the stats chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub count: u64,
    pub percent: u32,
}

impl FeedbackStats {
    pub fn from_items(items: &[FeedbackItem]) -> Self {
        let mut by_category = BTreeMap::new();
        for item in items {
            *by_category.entry(item.category.label().to_string()).or_insert(0) += 1;
        }
        Self { total: items.len() as u64, by_category }
    }

    pub fn count(&self, category: Category) -> u64 {
        self.by_category.get(category.label()).copied().unwrap_or(0)
    }

    /// Rounded share of the total, 0 when there is no feedback.
    pub fn percent(&self, count: u64) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((count as f64 / self.total as f64) * 100.0).round() as u32
    }

    /// Non-empty categories ordered by count descending, ties in category order.
    pub fn shares(&self) -> Vec<CategoryShare> {
        let mut shares: Vec<CategoryShare> = Category::ALL
            .into_iter()
            .map(|category| {
                let count = self.count(category);
                CategoryShare { category, count, percent: self.percent(count) }
            })
            .filter(|s| s.count > 0)
            .collect();
        // sort_by is stable, so equal counts keep declaration order
        shares.sort_by(|a, b| b.count.cmp(&a.count));
        shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackText;

    fn item(category: Category) -> FeedbackItem {
        FeedbackItem::new(FeedbackText::parse("x").unwrap(), category)
    }

    #[test]
    fn test_empty_stats() {
        let stats = FeedbackStats::from_items(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.by_category.is_empty());
        assert_eq!(stats.percent(0), 0);
        assert!(stats.shares().is_empty());
    }

    #[test]
    fn test_counts_and_percentages() {
        let items = vec![
            item(Category::Praise),
            item(Category::BugReport),
            item(Category::Praise),
        ];
        let stats = FeedbackStats::from_items(&items);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.count(Category::Praise), 2);
        assert_eq!(stats.count(Category::BugReport), 1);
        assert_eq!(stats.count(Category::Question), 0);

        let shares = stats.shares();
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, Category::Praise);
        assert_eq!(shares[0].percent, 67);
        assert_eq!(shares[1].percent, 33);
    }

    #[test]
    fn test_ties_keep_category_order() {
        let items = vec![item(Category::Question), item(Category::BugReport)];
        let shares = FeedbackStats::from_items(&items).shares();
        assert_eq!(shares[0].category, Category::BugReport);
        assert_eq!(shares[1].category, Category::Question);
    }

    #[test]
    fn test_json_shape() {
        let stats = FeedbackStats::from_items(&[item(Category::Complaint)]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["byCategory"]["😞 Complaint"], 1);
    }
}
