//! Handing generated documents over to the editor.
//!
//! The editor reads the latest document from a small key-value store: a JSON object
//! file where each key holds one string. Writes go to a temporary file next to the
//! store and are renamed into place, so the editor never sees a half-written store.

use crate::constants::HANDOFF_KEY;
use crate::errors::{AppError, AppResult};
use crate::models::{HandoffMode, OrderedMap};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

#[derive(Debug, Clone)]
pub struct HandoffStore {
    path: PathBuf,
}

impl HandoffStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.load().await?.get(key).cloned())
    }

    pub async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.load().await?;
        entries.insert(key, value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::IoError(format!(
                    "Failed to create store directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let mut tmp_name = self.path.clone().into_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, serde_json::to_string_pretty(&entries)?)
            .await
            .map_err(|e| {
                AppError::IoError(format!(
                    "Failed to write temp file {}: {e}",
                    tmp_path.display()
                ))
            })?;

        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            AppError::IoError(format!(
                "Failed to rename temp file {} to {}: {e}",
                tmp_path.display(),
                self.path.display()
            ))
        })?;
        Ok(())
    }

    async fn load(&self) -> AppResult<OrderedMap<String>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(OrderedMap::new());
        }
        let contents = fs::read_to_string(&self.path).await?;
        if contents.trim().is_empty() {
            return Ok(OrderedMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            AppError::ParseError(format!(
                "Handoff store {} is not a JSON object of strings: {e}",
                self.path.display()
            ))
        })
    }
}

/// Where a generated document ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandoffOutcome {
    /// Stored for the editor, which should be opened next.
    Redirect { target: String, store: PathBuf },
    /// Returned as-is for display.
    Inline(String),
}

#[derive(Debug, Clone)]
pub struct Handoff {
    mode: HandoffMode,
    store: HandoffStore,
    editor_target: String,
}

impl Handoff {
    pub fn new(mode: HandoffMode, store: HandoffStore, editor_target: impl Into<String>) -> Self {
        Self {
            mode,
            store,
            editor_target: editor_target.into(),
        }
    }

    pub fn mode(&self) -> HandoffMode {
        self.mode
    }

    pub async fn deliver(&self, document: &str) -> AppResult<HandoffOutcome> {
        match self.mode {
            HandoffMode::Redirect => {
                self.store.set(HANDOFF_KEY, document).await?;
                info!(
                    store = %self.store.path().display(),
                    editor = %self.editor_target,
                    "Document stored, redirecting to editor"
                );
                Ok(HandoffOutcome::Redirect {
                    target: self.editor_target.clone(),
                    store: self.store.path().to_path_buf(),
                })
            }
            HandoffMode::Inline => Ok(HandoffOutcome::Inline(document.to_string())),
        }
    }
}
