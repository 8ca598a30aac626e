//! File-backed store: one JSON object per line.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use feedpulse_common::FeedbackItem;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{DbError, Result};
use crate::store::{sort_newest_first, FeedbackStore};

#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    /// Serializes appends so lines never interleave.
    write_lock: Mutex<()>,
}

impl JsonlStore {
    /// Open a store at `path`, creating parent directories and the file.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        tracing::debug!(path = %path.display(), "Opened feedback file store");
        Ok(Self { path, write_lock: Mutex::new(()) })
    }
}

#[async_trait]
impl FeedbackStore for JsonlStore {
    async fn put(&self, item: &FeedbackItem) -> Result<()> {
        let mut line = serde_json::to_string(item)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<FeedbackItem>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut items = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str::<FeedbackItem>(line).map_err(|e| DbError::Corrupt {
                    path: self.path.clone(),
                    line: idx + 1,
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        sort_newest_first(&mut items);
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
