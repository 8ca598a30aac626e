//! Contract tests for `FeedbackClassifier`: always one of six categories,
//! one-time backend resolution, and fallback to rules on AI failure.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use feedpulse_common::Category;
use feedpulse_llm::{
    ClassifierMode, FeedbackClassifier, LlmBackend, LlmError, LlmRequest, LlmResponse,
};

/// Backend that answers with a fixed string and counts calls.
struct ScriptedBackend {
    answer: String,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    fn new(answer: &str) -> Arc<Self> {
        Arc::new(Self { answer: answer.to_string(), calls: AtomicUsize::new(0) })
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(req.prompt.contains("🐛 Bug Report"));
        Ok(LlmResponse {
            content: self.answer.clone(),
            model: "scripted".to_string(),
            prompt_tokens: 0,
            completion_tokens: 0,
        })
    }

    fn model_id(&self) -> &str { "scripted" }
}

/// Backend that always fails, as if the network were down.
struct FailingBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl LlmBackend for FailingBackend {
    async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(LlmError::Unavailable("connection refused".to_string()))
    }

    fn model_id(&self) -> &str { "failing" }
}

#[tokio::test]
async fn test_rules_answer_when_no_backend() {
    let classifier = FeedbackClassifier::rules_only();
    let cases = [
        ("There is a bug in the login page", Category::BugReport),
        ("Can you add a dark mode feature?", Category::FeatureRequest),
        ("I love this app!", Category::Praise),
        ("So frustrated with this app", Category::Complaint),
        ("How do I reset my password?", Category::Question),
        ("The app has a blue theme", Category::GeneralFeedback),
    ];
    for (text, expected) in cases {
        assert_eq!(classifier.classify(text).await, expected, "{text}");
    }
    assert_eq!(classifier.mode(), ClassifierMode::Rules);
}

#[tokio::test]
async fn test_ai_answer_is_used() {
    let backend = ScriptedBackend::new("✨ Feature Request");
    let classifier = FeedbackClassifier::with_backend(backend.clone());

    // Rules would say Bug Report; the AI answer wins.
    let category = classifier.classify("The export is broken").await;
    assert_eq!(category, Category::FeatureRequest);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    assert_eq!(classifier.mode(), ClassifierMode::Ai { model: "scripted".to_string() });
}

#[tokio::test]
async fn test_ai_answer_without_symbol() {
    let classifier = FeedbackClassifier::with_backend(ScriptedBackend::new("Praise"));
    assert_eq!(classifier.classify("meh").await, Category::Praise);
}

#[tokio::test]
async fn test_empty_ai_answer_is_general() {
    let classifier = FeedbackClassifier::with_backend(ScriptedBackend::new("  \n"));
    assert_eq!(classifier.classify("There is a bug").await, Category::GeneralFeedback);
}

#[tokio::test]
async fn test_unrecognised_ai_answer_falls_back_to_rules() {
    let classifier = FeedbackClassifier::with_backend(ScriptedBackend::new("Rant"));
    assert_eq!(classifier.classify("The app crashes on start").await, Category::BugReport);
    assert_eq!(classifier.classify("Nice colours").await, Category::GeneralFeedback);
}

#[tokio::test]
async fn test_failing_backend_falls_back_to_rules() {
    let backend = Arc::new(FailingBackend { calls: AtomicUsize::new(0) });
    let classifier = FeedbackClassifier::with_backend(backend.clone());

    assert_eq!(classifier.classify("I love this app!").await, Category::Praise);
    assert_eq!(classifier.classify("Interesting approach").await, Category::GeneralFeedback);
    // One attempt per call, no retries.
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_backend_resolved_once() {
    let inits = Arc::new(AtomicUsize::new(0));
    let counter = inits.clone();
    let classifier = FeedbackClassifier::lazy(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        None
    });

    for _ in 0..5 {
        classifier.classify("How do I export?").await;
    }
    assert_eq!(inits.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_calls_resolve_once() {
    let inits = Arc::new(AtomicUsize::new(0));
    let counter = inits.clone();
    let backend = ScriptedBackend::new("❓ Question");
    let shared = backend.clone();
    let classifier = Arc::new(FeedbackClassifier::lazy(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Some(shared.clone() as Arc<dyn LlmBackend>)
    }));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let classifier = classifier.clone();
            tokio::spawn(async move { classifier.classify("anything").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), Category::Question);
    }
    assert_eq!(inits.load(Ordering::SeqCst), 1);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 16);
}

#[tokio::test]
async fn test_always_returns_known_category() {
    let classifier = FeedbackClassifier::with_backend(ScriptedBackend::new("Category: ???"));
    let inputs = vec![
        String::new(),
        "?".to_string(),
        "a".repeat(1000),
        "🐛🐛🐛".to_string(),
        "ERROR!!!".to_string(),
    ];
    for input in inputs {
        let category = classifier.classify(&input).await;
        assert!(Category::ALL.contains(&category));
    }
}
