//! File-backed storage for the user's API key, so it only has to be entered once.
//!
//! The retrieval engine never reads this itself; callers decide whether to use it.

use eyre::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the key file, relative to the working directory.
pub const DEFAULT_KEY_FILE: &str = "youtube_api_key.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredKey {
    youtube_api_key: Option<String>,
}

/// An API key persisted as JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored key, or `None` if there is no file or no (non-blank) key in it.
    pub async fn load(&self) -> eyre::Result<Option<String>> {
        if !tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("check for key file {}", self.path.display()))?
        {
            return Ok(None);
        }

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("read key file {}", self.path.display()))?;
        let stored: StoredKey = serde_json::from_str(&json)
            .with_context(|| format!("parse key file {}", self.path.display()))?;

        Ok(stored
            .youtube_api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty()))
    }

    /// Stores `key`, replacing any previously stored key. A blank key removes the stored one.
    pub async fn save(&self, key: &str) -> eyre::Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return self.forget().await;
        }

        let stored = StoredKey {
            youtube_api_key: Some(key.to_string()),
        };
        let json = serde_json::to_string_pretty(&stored).context("serialize API key")?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("write key file {}", self.path.display()))?;

        // Only the owner should be able to read the key.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .with_context(|| format!("restrict permissions of {}", self.path.display()))?;
        }

        tracing::debug!(path = %self.path.display(), "stored API key");
        Ok(())
    }

    /// Removes the stored key. Succeeds if there was none.
    pub async fn forget(&self) -> eyre::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "removed stored API key");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove key file {}", self.path.display())),
        }
    }
}
