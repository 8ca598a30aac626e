//! feedpulse-common — Shared types and errors used across all Feedpulse crates.

pub mod error;
pub mod category;
pub mod feedback;
pub mod stats;

// Re-export commonly used types
pub use category::Category;
pub use feedback::{FeedbackItem, FeedbackText, MAX_FEEDBACK_CHARS};
pub use stats::{CategoryShare, FeedbackStats};
