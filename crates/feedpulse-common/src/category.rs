//! The closed set of feedback categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::UnknownCategory;

/// One of the six fixed feedback categories.
///
/// Declaration order is significant: it is the order the prompt lists the
/// categories in and the order AI responses are matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    BugReport,
    FeatureRequest,
    Praise,
    Complaint,
    Question,
    #[default]
    GeneralFeedback,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::BugReport,
        Category::FeatureRequest,
        Category::Praise,
        Category::Complaint,
        Category::Question,
        Category::GeneralFeedback,
    ];

    /// Canonical label: symbol, space, name. This is the persisted value.
    pub fn label(&self) -> &'static str {
        match self {
            Category::BugReport       => "🐛 Bug Report",
            Category::FeatureRequest  => "✨ Feature Request",
            Category::Praise          => "🌟 Praise",
            Category::Complaint       => "😞 Complaint",
            Category::Question        => "❓ Question",
            Category::GeneralFeedback => "💬 General Feedback",
        }
    }

    /// The label without its leading symbol.
    pub fn name(&self) -> &'static str {
        match self {
            Category::BugReport       => "Bug Report",
            Category::FeatureRequest  => "Feature Request",
            Category::Praise          => "Praise",
            Category::Complaint       => "Complaint",
            Category::Question        => "Question",
            Category::GeneralFeedback => "General Feedback",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::BugReport       => "for technical issues, errors, things not working",
            Category::FeatureRequest  => "for new feature suggestions or improvements",
            Category::Praise          => "for positive feedback, compliments, appreciation",
            Category::Complaint       => "for negative experiences, dissatisfaction",
            Category::Question        => "for questions or requests for information",
            Category::GeneralFeedback => "for anything that doesn't fit above",
        }
    }

    /// Short machine-friendly slug, used for CSS classes.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::BugReport       => "bug",
            Category::FeatureRequest  => "feature",
            Category::Praise          => "praise",
            Category::Complaint       => "complaint",
            Category::Question        => "question",
            Category::GeneralFeedback => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts the canonical label or the bare name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s || c.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
