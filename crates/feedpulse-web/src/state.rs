//! Shared application state for the web server.

use std::sync::Arc;

use feedpulse_common::Category;
use feedpulse_db::FeedbackStore;
use feedpulse_llm::FeedbackClassifier;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::templates::Templates;

/// Events pushed to connected clients via SSE.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A feedback item was categorized and stored
    FeedbackSubmitted { id: Uuid, category: Category },
}

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub classifier: Arc<FeedbackClassifier>,
    pub store: Arc<dyn FeedbackStore>,
    pub templates: Templates,
    /// Broadcast channel for SSE push events
    pub event_tx: broadcast::Sender<AppEvent>,
}

impl AppState {
    pub fn new(classifier: Arc<FeedbackClassifier>, store: Arc<dyn FeedbackStore>) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self { classifier, store, templates: Templates::new(), event_tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_tx.subscribe()
    }

    /// Notify subscribers. Having none is not an error.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.event_tx.send(event);
    }
}

pub type SharedState = Arc<AppState>;
