//! JSON API for submitting and browsing feedback.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use feedpulse_common::{error::ApiError, Category, FeedbackItem, FeedbackText};

use crate::state::{AppEvent, AppState, SharedState};

const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Serialize)]
pub struct ApiCategory {
    pub label: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl From<Category> for ApiCategory {
    fn from(category: Category) -> Self {
        Self {
            label: category.label(),
            name: category.name(),
            description: category.description(),
        }
    }
}

/// Validate, categorize, store and announce one submission.
pub(crate) async fn submit(state: &AppState, raw: &str) -> Result<FeedbackItem, ApiError> {
    let text = FeedbackText::parse(raw)?;
    let category = state.classifier.classify(text.as_str()).await;
    let preview = text.preview(PREVIEW_CHARS);
    let item = FeedbackItem::new(text, category);

    state.store.put(&item).await.map_err(|e| {
        error!(error = %e, store = state.store.name(), "Failed to save feedback");
        ApiError::Internal("Failed to save feedback".into())
    })?;

    info!(id = %item.id, category = %item.category, preview = %preview, "Feedback categorized");
    state.publish(AppEvent::FeedbackSubmitted { id: item.id, category: item.category });
    Ok(item)
}

/// POST /api/feedback - Submit feedback for categorization
pub async fn create_feedback(
    State(state): State<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // An unreadable body, or a missing or non-string `text`, is reported the
    // same as an empty one.
    let body = body.map(|Json(v)| v).unwrap_or_else(|rejection| {
        debug!(error = %rejection, "Unreadable feedback body");
        Value::Null
    });
    let raw = body.get("text").and_then(Value::as_str).unwrap_or_default();
    let item = submit(&state, raw).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/feedback - All feedback, newest first
pub async fn list_feedback(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.store.scan().await.map_err(|e| {
        error!(error = %e, "Failed to fetch feedback");
        ApiError::Internal("Failed to fetch feedback".into())
    })?;
    Ok(Json(items))
}

/// GET /api/feedback/stats - Totals per category
pub async fn feedback_stats(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = feedpulse_db::stats(state.store.as_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch statistics");
        ApiError::Internal("Failed to fetch statistics".into())
    })?;
    Ok(Json(stats))
}

/// GET /api/categories - The fixed category set, in declaration order
pub async fn list_categories() -> Json<Vec<ApiCategory>> {
    Json(Category::ALL.into_iter().map(ApiCategory::from).collect())
}
