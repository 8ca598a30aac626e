//! Categorization prompt and parsing of the model's free-text answer.

use feedpulse_common::Category;

/// Outcome of matching a model answer against the category labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCategory {
    /// The answer names a category.
    Matched(Category),
    /// Non-empty answer naming no category; carries the trimmed text.
    Unrecognised(String),
    /// Blank answer.
    Empty,
}

/// Build the single-turn prompt asking the model for one category label.
pub fn build_prompt(feedback: &str) -> String {
    let categories: String = Category::ALL
        .iter()
        .map(|c| format!("- {} ({})\n", c.label(), c.description()))
        .collect();

    format!(
        "You are a feedback categorization assistant. Analyze the following feedback and \
categorize it into exactly ONE of these categories. Respond with ONLY the category name and \
its emoji, nothing else.\n\
\n\
Categories:\n\
{categories}\
\n\
Feedback: \"{feedback}\"\n\
\n\
Category:"
    )
}

/// Match a model answer to a category.
///
/// The answer is trimmed, then each category in declaration order is tested:
/// the full label (with symbol) or the bare name appearing anywhere in the
/// answer is a match. The first hit wins.
pub fn parse_category_response(raw: &str) -> ParsedCategory {
    let answer = raw.trim();
    if answer.is_empty() {
        return ParsedCategory::Empty;
    }

    Category::ALL
        .into_iter()
        .find(|c| answer.contains(c.label()) || answer.contains(c.name()))
        .map(ParsedCategory::Matched)
        .unwrap_or_else(|| ParsedCategory::Unrecognised(answer.to_string()))
}
