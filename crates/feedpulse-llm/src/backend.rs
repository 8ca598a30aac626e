//! LLM backend trait and the Gemini implementation.
//!
//! The classifier only needs "generate text from a prompt", so any provider
//! implementing [`LlmBackend::complete`] can stand in for Gemini.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("API error [{status}]: {message}")]
    ApiError { status: u16, message: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Response did not name a known category: {0:?}")]
    UnrecognisedCategory(String),
}

// ── Request / Response ────────────────────────────────────────────────────────

/// A single-turn completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError>;
    fn model_id(&self) -> &str;
}

async fn check_response_status(resp: reqwest::Response) -> Result<serde_json::Value, LlmError> {
    let status = resp.status().as_u16();
    let body: serde_json::Value = resp.json().await?;
    if status >= 400 {
        let msg = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .unwrap_or("unknown API error")
            .to_string();
        return Err(LlmError::ApiError { status, message: msg });
    }
    Ok(body)
}

// ── Google Gemini ─────────────────────────────────────────────────────────────

pub struct GeminiBackend {
    pub model: String,
    pub base_url: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_body(req: &LlmRequest) -> serde_json::Value {
        serde_json::json!({
            "contents": [{ "parts": [{ "text": req.prompt }] }],
            "generationConfig": {
                "maxOutputTokens": req.max_tokens.unwrap_or(256),
                "temperature":     req.temperature.unwrap_or(0.1),
            }
        })
    }
}

/// Extract the first candidate's text. A response without candidates (for
/// example a blocked prompt) is malformed; a candidate with no text is "".
fn parse_gemini_response(json: &serde_json::Value, model: &str) -> Result<LlmResponse, LlmError> {
    let candidate = json["candidates"]
        .as_array()
        .and_then(|c| c.first())
        .ok_or_else(|| {
            let reason = json["promptFeedback"]["blockReason"]
                .as_str()
                .unwrap_or("no candidates returned");
            LlmError::MalformedResponse(reason.to_string())
        })?;

    let content = candidate["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts.iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(LlmResponse {
        content,
        model: model.to_string(),
        prompt_tokens: json["usageMetadata"]["promptTokenCount"]
            .as_u64().unwrap_or(0) as u32,
        completion_tokens: json["usageMetadata"]["candidatesTokenCount"]
            .as_u64().unwrap_or(0) as u32,
    })
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        // Key goes in a header so it never shows up in reqwest error URLs.
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let resp = self.client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&Self::request_body(&req))
            .send()
            .await?;
        let json = check_response_status(resp).await?;

        parse_gemini_response(&json, &self.model)
    }

    fn model_id(&self) -> &str { &self.model }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
