//! Attachment store writing uploads to a local directory
//!
//! Files are saved as `{unix millis}-{short uuid}-{sanitized name}` directly
//! under the upload root. The path recorded on the complaint is the public
//! one served by the HTTP layer, `uploads/{file}`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resolveit_core::traits::{AttachmentStore, RepoResult};
use resolveit_core::DomainError;
use tokio::fs;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// URL prefix under which the upload root is served
pub const PUBLIC_PREFIX: &str = "uploads";

const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone)]
pub struct LocalAttachmentStore {
    root: PathBuf,
}

impl LocalAttachmentStore {
    /// Create the upload root if needed
    pub async fn new(root: impl Into<PathBuf>) -> RepoResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            DomainError::StorageError(format!(
                "Failed to create upload directory '{}': {e}",
                root.display()
            ))
        })?;

        info!(path = %root.display(), "Attachment store initialized");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a recorded public path to a file under the root
    fn resolve(&self, public_path: &str) -> RepoResult<PathBuf> {
        let file = public_path
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(public_path);

        let mut components = Path::new(file).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.root.join(name)),
            _ => Err(DomainError::StorageError(format!(
                "Refusing to touch path outside the upload directory: {public_path}"
            ))),
        }
    }
}

#[async_trait]
impl AttachmentStore for LocalAttachmentStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn save(
        &self,
        original_name: &str,
        bytes: &[u8],
        now: DateTime<Utc>,
    ) -> RepoResult<String> {
        let id = Uuid::new_v4().simple().to_string();
        let file_name = format!(
            "{}-{}-{}",
            now.timestamp_millis(),
            &id[..8],
            sanitize_file_name(original_name)
        );

        fs::write(self.root.join(&file_name), bytes)
            .await
            .map_err(|e| DomainError::StorageError(format!("Failed to write {file_name}: {e}")))?;

        debug!(file = %file_name, "Stored attachment");
        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> RepoResult<()> {
        let target = self.resolve(path)?;
        fs::remove_file(&target)
            .await
            .map_err(|e| DomainError::StorageError(format!("Failed to delete {path}: {e}")))?;

        debug!(file = %target.display(), "Deleted attachment");
        Ok(())
    }
}

/// Keep only characters that are safe in a file name and a URL
pub fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        return "file".to_string();
    }

    // keep the extension when truncating
    if cleaned.len() > MAX_NAME_LEN {
        let start = cleaned.len() - MAX_NAME_LEN;
        return cleaned[start..].to_string();
    }
    cleaned.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("resolveit-{tag}-{}", Uuid::new_v4().simple()))
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("photo 1.png"), "photo_1.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "file");

        let long = format!("{}.pdf", "a".repeat(200));
        let cleaned = sanitize_file_name(&long);
        assert_eq!(cleaned.len(), MAX_NAME_LEN);
        assert!(cleaned.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_save_and_delete() {
        let root = temp_root("store");
        let store = LocalAttachmentStore::new(&root).await.unwrap();

        let received = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let path = store.save("scan.pdf", b"%PDF-1.4", received).await.unwrap();
        assert!(path.starts_with(&format!("uploads/{}-", received.timestamp_millis())));
        assert!(path.ends_with("-scan.pdf"));

        let on_disk = store.resolve(&path).unwrap();
        assert_eq!(fs::read(&on_disk).await.unwrap(), b"%PDF-1.4");

        store.delete(&path).await.unwrap();
        assert!(!on_disk.exists());

        let _ = fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn test_delete_rejects_traversal() {
        let root = temp_root("traversal");
        let store = LocalAttachmentStore::new(&root).await.unwrap();

        assert!(store.delete("uploads/../secret").await.is_err());
        assert!(store.delete("/etc/passwd").await.is_err());

        let _ = fs::remove_dir_all(&root).await;
    }
}
