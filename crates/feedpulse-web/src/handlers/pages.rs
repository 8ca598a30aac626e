//! Server-rendered feedback page and its form.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use feedpulse_common::{error::ApiError, FeedbackItem, FeedbackStats, MAX_FEEDBACK_CHARS};

use crate::handlers::{feedback::submit, system::describe_mode};
use crate::state::{AppState, SharedState};

#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
struct ShareRow {
    label: &'static str,
    slug: &'static str,
    count: u64,
    percent: u32,
}

#[derive(Serialize)]
struct ItemRow {
    label: &'static str,
    slug: &'static str,
    text: String,
    created_at: String,
}

impl From<FeedbackItem> for ItemRow {
    fn from(item: FeedbackItem) -> Self {
        Self {
            label: item.category.label(),
            slug: item.category.slug(),
            text: item.text,
            created_at: item.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

async fn render_page(state: &AppState, error: Option<&str>, text: &str) -> Result<Html<String>, ApiError> {
    let items = state.store.scan().await.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load feedback for page");
        Vec::new()
    });
    let stats = FeedbackStats::from_items(&items);

    let shares: Vec<ShareRow> = stats
        .shares()
        .into_iter()
        .map(|s| ShareRow {
            label: s.category.label(),
            slug: s.category.slug(),
            count: s.count,
            percent: s.percent,
        })
        .collect();
    let items: Vec<ItemRow> = items.into_iter().map(ItemRow::from).collect();

    let html = state
        .templates
        .render("index.html", context! {
            mode => describe_mode(&state.classifier.mode()),
            max_chars => MAX_FEEDBACK_CHARS,
            total => stats.total,
            shares => shares,
            items => items,
            error => error,
            text => text,
        })
        .map_err(|e| ApiError::Internal(format!("Template error: {e}")))?;
    Ok(Html(html))
}

/// GET /
pub async fn index_page(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    render_page(&state, None, "").await
}

/// POST /feedback - Form submission; redirects back to the page on success
pub async fn submit_form(
    State(state): State<SharedState>,
    Form(form): Form<FeedbackForm>,
) -> Response {
    match submit(&state, &form.text).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(ApiError::BadRequest(message)) => {
            match render_page(&state, Some(&message), &form.text).await {
                Ok(page) => (StatusCode::BAD_REQUEST, page).into_response(),
                Err(e) => e.into_response(),
            }
        }
        Err(e) => e.into_response(),
    }
}
