//! Submitted feedback: the validated input text and the stored record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;
use crate::error::ValidationError;

/// Upper bound on submitted text, counted in characters.
pub const MAX_FEEDBACK_CHARS: usize = 1000;

/// Feedback text that passed submission checks.
///
/// Holds the trimmed text; the length limit applies to the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackText(String);

impl FeedbackText {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }
        let chars = raw.chars().count();
        if chars > MAX_FEEDBACK_CHARS {
            return Err(ValidationError::TooLong { chars });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `max` characters, with an ellipsis when truncated. Used for logs.
    pub fn preview(&self, max: usize) -> String {
        let mut chars = self.0.chars();
        let head: String = chars.by_ref().take(max).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A categorized, persisted feedback entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub id: Uuid,
    pub text: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

impl FeedbackItem {
    pub fn new(text: FeedbackText, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into_inner(),
            category,
            created_at: Utc::now(),
        }
    }
}
