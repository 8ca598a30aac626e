//! Liveness and runtime status.

use axum::{extract::State, Json};
use chrono::Utc;
use feedpulse_llm::ClassifierMode;
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    pub classifier: String,
    pub storage: &'static str,
}

/// Human-readable name of the active categorization strategy.
pub fn describe_mode(mode: &ClassifierMode) -> String {
    match mode {
        ClassifierMode::Pending => "pending".to_string(),
        ClassifierMode::Ai { model } => format!("ai ({model})"),
        ClassifierMode::Rules => "rules".to_string(),
    }
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        classifier: describe_mode(&state.classifier.mode()),
        storage: state.store.name(),
    })
}
