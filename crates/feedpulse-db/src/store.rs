//! The put/scan storage abstraction.

use async_trait::async_trait;
use feedpulse_common::{FeedbackItem, FeedbackStats};

use crate::error::Result;

/// Append-only feedback storage.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Persist one item.
    async fn put(&self, item: &FeedbackItem) -> Result<()>;

    /// All items, newest first.
    async fn scan(&self) -> Result<Vec<FeedbackItem>>;

    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;
}

/// Aggregate counts over everything in `store`.
pub async fn stats(store: &dyn FeedbackStore) -> Result<FeedbackStats> {
    let items = store.scan().await?;
    Ok(FeedbackStats::from_items(&items))
}

/// Order newest first.
pub(crate) fn sort_newest_first(items: &mut [FeedbackItem]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
