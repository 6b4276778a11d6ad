//! File-backed media store
//!
//! Clips are written as `audio_<uuid>.mp3` into one directory and served
//! back by name. Names are checked before touching the filesystem so a
//! request path can never leave the directory.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use application::{error::ApplicationError, ports::MediaStorePort};
use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, instrument};
use uuid::Uuid;

const CLIP_EXTENSION: &str = ".mp3";

/// Stores clips as files in a directory
#[derive(Debug, Clone)]
pub struct FileMediaStore {
    dir: PathBuf,
}

impl FileMediaStore {
    /// Store clips under `dir`; it is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory clips are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn is_clip_name(name: &str) -> bool {
    name.len() > CLIP_EXTENSION.len()
        && name.ends_with(CLIP_EXTENSION)
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !name.contains("..")
}

#[async_trait]
impl MediaStorePort for FileMediaStore {
    #[instrument(skip(self, audio), fields(bytes = audio.len()))]
    async fn put(&self, audio: Bytes) -> Result<String, ApplicationError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            ApplicationError::Internal(format!(
                "cannot create media directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let name = format!("audio_{}{CLIP_EXTENSION}", Uuid::now_v7().simple());
        tokio::fs::write(self.dir.join(&name), &audio)
            .await
            .map_err(|e| ApplicationError::Internal(format!("cannot write {name}: {e}")))?;

        debug!(name = %name, "Stored clip");
        Ok(name)
    }

    async fn get(&self, name: &str) -> Result<Option<Bytes>, ApplicationError> {
        if !is_clip_name(name) {
            return Ok(None);
        }

        match tokio::fs::read(self.dir.join(name)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApplicationError::Internal(format!("cannot read {name}: {e}"))),
        }
    }
}
