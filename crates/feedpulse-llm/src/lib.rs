//! feedpulse-llm — Feedback categorization.
//! Combines an LLM backend (Gemini) with a deterministic keyword fallback
//! behind a single never-failing `classify` call.

pub mod backend;
pub mod prompt;
pub mod rules;
pub mod classifier;

pub use backend::{GeminiBackend, LlmBackend, LlmError, LlmRequest, LlmResponse};
pub use classifier::{classify, AiSettings, ClassifierMode, FeedbackClassifier};
pub use prompt::{build_prompt, parse_category_response, ParsedCategory};
