//! Store wrapper that degrades to memory when the primary fails.
//!
//! The first primary error flips the wrapper into degraded mode for the rest
//! of the process: every later put and scan goes to the in-memory store.
//! Items written to the primary before the failure are not visible there.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use feedpulse_common::FeedbackItem;

use crate::error::{DbError, Result};
use crate::memory::MemoryStore;
use crate::store::FeedbackStore;

pub struct FallbackStore {
    primary: Arc<dyn FeedbackStore>,
    memory: MemoryStore,
    degraded: AtomicBool,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn FeedbackStore>) -> Self {
        Self { primary, memory: MemoryStore::new(), degraded: AtomicBool::new(false) }
    }

    /// Start in degraded mode, e.g. when the primary could not be opened.
    pub fn degraded() -> Self {
        let store = Self::new(Arc::new(MemoryStore::new()));
        store.degraded.store(true, Ordering::SeqCst);
        store
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::SeqCst)
    }

    fn degrade(&self, op: &str, err: &DbError) {
        if !self.degraded.swap(true, Ordering::SeqCst) {
            tracing::warn!(
                backend = self.primary.name(),
                op,
                error = %err,
                "Primary feedback store failed, using in-memory storage from now on"
            );
        }
    }
}

#[async_trait]
impl FeedbackStore for FallbackStore {
    async fn put(&self, item: &FeedbackItem) -> Result<()> {
        if !self.is_degraded() {
            match self.primary.put(item).await {
                Ok(()) => return Ok(()),
                Err(e) => self.degrade("put", &e),
            }
        }
        self.memory.put(item).await
    }

    async fn scan(&self) -> Result<Vec<FeedbackItem>> {
        if !self.is_degraded() {
            match self.primary.scan().await {
                Ok(items) => return Ok(items),
                Err(e) => self.degrade("scan", &e),
            }
        }
        self.memory.scan().await
    }

    fn name(&self) -> &'static str {
        if self.is_degraded() { "memory" } else { self.primary.name() }
    }
}
