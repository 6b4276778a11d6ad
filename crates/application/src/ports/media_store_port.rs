//! Media store port - Interface for hosting synthesized clips
//!
//! Messengers fetch reply audio by URL, so each clip is kept until the
//! messenger has downloaded it.

use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for storing MP3 clips under generated names
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MediaStorePort: Send + Sync {
    /// Store an MP3 clip and return its file name
    async fn put(&self, audio: Bytes) -> Result<String, ApplicationError>;

    /// Load a clip by the name `put` returned
    async fn get(&self, name: &str) -> Result<Option<Bytes>, ApplicationError>;
}
