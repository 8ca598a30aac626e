//! Feedpulse storage layer.
//!
//! Feedback is stored through the [`FeedbackStore`] put/scan trait:
//!
//! - [`JsonlStore`]: durable, one JSON object per line
//! - [`MemoryStore`]: in-process only
//! - [`FallbackStore`]: wraps a primary and switches to memory for good
//!   after the primary's first failure
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use feedpulse_db::{FallbackStore, FeedbackStore, JsonlStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let primary = JsonlStore::open("./data/feedback.jsonl").await?;
//!     let store = FallbackStore::new(Arc::new(primary));
//!     let items = store.scan().await?;
//!     println!("{} items", items.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod store;
pub mod memory;
pub mod jsonl;
pub mod fallback;

pub use error::{DbError, Result};
pub use fallback::FallbackStore;
pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use store::{stats, FeedbackStore};
