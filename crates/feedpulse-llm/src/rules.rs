//! Deterministic keyword classifier used when the AI path is unavailable.
//!
//! Patterns are tested in table order against the lowercased text and the
//! first hit wins, so a bug report that also says "love" stays a bug report.
//! Word boundaries are ASCII: an accented letter does not join a keyword.

use std::sync::LazyLock;

use feedpulse_common::Category;
use regex::Regex;

/// Ordered (category, pattern) table. General Feedback is the catch-all and
/// has no entry.
static RULES: LazyLock<Vec<(Category, Regex)>> = LazyLock::new(|| {
    [
        (
            Category::BugReport,
            r"(?-u:\b)(bug|error|crash|broken|doesn't work|not working|issue|problem|fix)\w*",
        ),
        (
            Category::FeatureRequest,
            r"(?-u:\b)(feature|add|would be nice|could you|can you|please add|want|wish|suggest|idea)\w*",
        ),
        (
            Category::Praise,
            r"(?-u:\b)(love|great|awesome|amazing|excellent|fantastic|wonderful|best|thank|good job|well done)\w*",
        ),
        (
            Category::Complaint,
            r"(?-u:\b)(hate|terrible|awful|worst|disappoint|frustrat|annoy|bad|poor|useless)\w*",
        ),
        (
            Category::Question,
            r"\?$|(?-u:\b)(how|what|why|when|where|who|can i|is it)(?-u:\b)",
        ),
    ]
    .into_iter()
    .map(|(category, pattern)| {
        (category, Regex::new(pattern).expect("rule pattern must compile"))
    })
    .collect()
});

/// Classify by keyword rules. Always returns a category.
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(_, pattern)| pattern.is_match(&lower))
        .map(|(category, _)| *category)
        .unwrap_or(Category::GeneralFeedback)
}
