//! Behaviour of the file store and the memory fallback.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use feedpulse_common::{Category, FeedbackItem, FeedbackText};
use feedpulse_db::{stats, DbError, FallbackStore, FeedbackStore, JsonlStore};

fn item(text: &str, category: Category, minutes_ago: i64) -> FeedbackItem {
    let mut item = FeedbackItem::new(FeedbackText::parse(text).unwrap(), category);
    item.created_at = Utc::now() - Duration::minutes(minutes_ago);
    item
}

/// Primary that fails every call.
struct BrokenStore {
    calls: AtomicUsize,
}

#[async_trait]
impl FeedbackStore for BrokenStore {
    async fn put(&self, _item: &FeedbackItem) -> feedpulse_db::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DbError::Unavailable("table missing".to_string()))
    }

    async fn scan(&self) -> feedpulse_db::Result<Vec<FeedbackItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DbError::Unavailable("table missing".to_string()))
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

#[tokio::test]
async fn test_jsonl_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("feedback.jsonl");

    {
        let store = JsonlStore::open(&path).await.unwrap();
        store.put(&item("older", Category::BugReport, 10)).await.unwrap();
        store.put(&item("newer", Category::Praise, 1)).await.unwrap();
    }

    let reopened = JsonlStore::open(&path).await.unwrap();
    let items = reopened.scan().await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].text, "newer");
    assert_eq!(items[0].category, Category::Praise);
    assert_eq!(items[1].text, "older");
}

#[tokio::test]
async fn test_jsonl_store_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonlStore::open(dir.path().join("feedback.jsonl")).await.unwrap();
    assert!(store.scan().await.unwrap().is_empty());
    assert_eq!(store.name(), "file");
}

#[tokio::test]
async fn test_jsonl_store_reports_corrupt_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feedback.jsonl");
    let store = JsonlStore::open(&path).await.unwrap();
    store.put(&item("fine", Category::Question, 0)).await.unwrap();

    let mut content = std::fs::read_to_string(&path).unwrap();
    content.push_str("\n{not json}\n");
    std::fs::write(&path, content).unwrap();

    match store.scan().await {
        Err(DbError::Corrupt { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected corrupt record error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_jsonl_concurrent_puts_do_not_interleave() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonlStore::open(dir.path().join("feedback.jsonl")).await.unwrap());

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store.put(&item(&format!("entry {i}"), Category::GeneralFeedback, 0)).await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.scan().await.unwrap().len(), 20);
}

#[tokio::test]
async fn test_fallback_passes_through_healthy_primary() {
    let dir = tempfile::tempdir().unwrap();
    let primary = Arc::new(JsonlStore::open(dir.path().join("feedback.jsonl")).await.unwrap());
    let store = FallbackStore::new(primary.clone());

    store.put(&item("kept on disk", Category::Praise, 0)).await.unwrap();
    assert!(!store.is_degraded());
    assert_eq!(store.name(), "file");
    assert_eq!(primary.scan().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_fallback_degrades_for_good_after_failure() {
    let primary = Arc::new(BrokenStore { calls: AtomicUsize::new(0) });
    let store = FallbackStore::new(primary.clone());

    store.put(&item("first", Category::BugReport, 1)).await.unwrap();
    assert!(store.is_degraded());
    assert_eq!(store.name(), "memory");

    store.put(&item("second", Category::Praise, 0)).await.unwrap();
    let items = store.scan().await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].text, "second");

    // Only the first put reached the broken primary.
    assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fallback_degrades_on_scan_failure() {
    let store = FallbackStore::new(Arc::new(BrokenStore { calls: AtomicUsize::new(0) }));
    assert!(store.scan().await.unwrap().is_empty());
    assert!(store.is_degraded());
}

#[tokio::test]
async fn test_stats_over_store() {
    let store = FallbackStore::degraded();
    store.put(&item("a", Category::Praise, 3)).await.unwrap();
    store.put(&item("b", Category::Praise, 2)).await.unwrap();
    store.put(&item("c", Category::Complaint, 1)).await.unwrap();

    let stats = stats(&store).await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.count(Category::Praise), 2);
    assert_eq!(stats.count(Category::Complaint), 1);
}
