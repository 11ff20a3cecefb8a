//! Attachment storage port

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::traits::RepoResult;

/// Stores uploaded attachment bytes and hands back a stable path
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Persist a file received at `now` and return the path recorded on the complaint
    async fn save(
        &self,
        original_name: &str,
        bytes: &[u8],
        now: DateTime<Utc>,
    ) -> RepoResult<String>;

    /// Remove a previously saved file
    async fn delete(&self, path: &str) -> RepoResult<()>;
}
