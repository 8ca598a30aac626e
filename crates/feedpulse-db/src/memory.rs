//! In-process store. Contents are lost on restart.

use async_trait::async_trait;
use feedpulse_common::FeedbackItem;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::store::{sort_newest_first, FeedbackStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Vec<FeedbackItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn put(&self, item: &FeedbackItem) -> Result<()> {
        self.items.write().await.insert(0, item.clone());
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<FeedbackItem>> {
        let mut items = self.items.read().await.clone();
        sort_newest_first(&mut items);
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
