//! Feedback classifier: AI first, keyword rules as the fallback.
//!
//! The AI backend is resolved once, on the first call to
//! [`FeedbackClassifier::classify`], and cached for the life of the
//! classifier: either a client handle or "disabled". Configuration changes
//! after that point are not observed.

use std::fmt;
use std::sync::{Arc, LazyLock, OnceLock};

use feedpulse_common::Category;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::backend::{GeminiBackend, LlmBackend, LlmError, LlmRequest};
use crate::prompt::{build_prompt, parse_category_response, ParsedCategory};
use crate::rules;

/// Placeholder credential shipped in sample env files; treated as absent.
pub const DEMO_API_KEY: &str = "demo-key";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";

// ── Settings ──────────────────────────────────────────────────────────────────

/// Credential and model used to build the AI backend.
pub struct AiSettings {
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: Option<String>,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self { api_key: None, model: DEFAULT_MODEL.to_string(), base_url: None }
    }
}

impl fmt::Debug for AiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiSettings")
            .field("api_key", &self.credential().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AiSettings {
    /// Read `GEMINI_API_KEY` and `GEMINI_MODEL`.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok().map(SecretString::from);
        let model = std::env::var(MODEL_ENV)
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self { api_key, model, base_url: None }
    }

    /// The usable credential, if any. Empty and placeholder keys are absent.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().trim())
            .filter(|k| !k.is_empty() && *k != DEMO_API_KEY)
    }

    /// Build a Gemini backend, or `None` when no usable credential is set.
    pub fn build_backend(&self) -> Option<Arc<dyn LlmBackend>> {
        let key = self.credential()?;
        let mut backend = GeminiBackend::new(SecretString::from(key.to_string()), &self.model);
        if let Some(url) = &self.base_url {
            backend = backend.with_base_url(url);
        }
        Some(Arc::new(backend))
    }
}

// ── Classifier ────────────────────────────────────────────────────────────────

type BackendInit = Box<dyn Fn() -> Option<Arc<dyn LlmBackend>> + Send + Sync>;

/// Which strategy serves classification calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierMode {
    /// First call has not happened yet.
    Pending,
    /// AI backend cached, bound to this model.
    Ai { model: String },
    /// No credential; keyword rules only.
    Rules,
}

/// Assigns exactly one [`Category`] to a piece of feedback. Never fails.
pub struct FeedbackClassifier {
    init: BackendInit,
    backend: OnceLock<Option<Arc<dyn LlmBackend>>>,
}

impl FeedbackClassifier {
    /// Defer backend construction to `init`, run at most once on first use.
    pub fn lazy<F>(init: F) -> Self
    where
        F: Fn() -> Option<Arc<dyn LlmBackend>> + Send + Sync + 'static,
    {
        Self { init: Box::new(init), backend: OnceLock::new() }
    }

    /// Classifier configured from explicit settings.
    pub fn new(settings: AiSettings) -> Self {
        Self::lazy(move || settings.build_backend())
    }

    /// Classifier that reads the environment on first use.
    pub fn from_env() -> Self {
        Self::lazy(|| AiSettings::from_env().build_backend())
    }

    /// Classifier bound to a ready backend.
    pub fn with_backend(backend: Arc<dyn LlmBackend>) -> Self {
        Self::lazy(move || Some(backend.clone()))
    }

    /// Classifier that never calls out.
    pub fn rules_only() -> Self {
        Self::lazy(|| None)
    }

    fn backend(&self) -> Option<&Arc<dyn LlmBackend>> {
        self.backend
            .get_or_init(|| {
                let backend = (self.init)();
                match &backend {
                    Some(b) => info!(model = b.model_id(), "AI categorization enabled"),
                    None => info!("No AI credential configured, using rule-based categorization"),
                }
                backend
            })
            .as_ref()
    }

    /// Current strategy, without forcing initialization.
    pub fn mode(&self) -> ClassifierMode {
        match self.backend.get() {
            None => ClassifierMode::Pending,
            Some(Some(b)) => ClassifierMode::Ai { model: b.model_id().to_string() },
            Some(None) => ClassifierMode::Rules,
        }
    }

    /// Categorize `text`. AI failures are logged and answered by the rules.
    pub async fn classify(&self, text: &str) -> Category {
        let Some(backend) = self.backend() else {
            return rules::classify(text);
        };

        match classify_with_backend(backend.as_ref(), text).await {
            Ok(category) => {
                debug!(category = %category, model = backend.model_id(), "AI categorization");
                category
            }
            Err(e) => {
                warn!(error = %e, "AI categorization failed, falling back to rules");
                rules::classify(text)
            }
        }
    }
}

impl fmt::Debug for FeedbackClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackClassifier")
            .field("mode", &self.mode())
            .finish()
    }
}

/// One AI attempt. Unrecognised answers are errors so the caller can fall
/// back; the result always stays inside the closed category set.
async fn classify_with_backend(backend: &dyn LlmBackend, text: &str) -> Result<Category, LlmError> {
    let req = LlmRequest {
        prompt: build_prompt(text),
        max_tokens: Some(64),
        temperature: Some(0.0),
    };
    let resp = backend.complete(req).await?;

    match parse_category_response(&resp.content) {
        ParsedCategory::Matched(category) => Ok(category),
        ParsedCategory::Empty => Ok(Category::GeneralFeedback),
        ParsedCategory::Unrecognised(raw) => Err(LlmError::UnrecognisedCategory(raw)),
    }
}

// ── Process-wide default ──────────────────────────────────────────────────────

static DEFAULT_CLASSIFIER: LazyLock<FeedbackClassifier> = LazyLock::new(FeedbackClassifier::from_env);

/// Classify with the process-wide classifier configured from the environment.
pub async fn classify(text: &str) -> Category {
    DEFAULT_CLASSIFIER.classify(text).await
}
