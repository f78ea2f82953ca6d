use crate::keys::generate_object_key;
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use showroom_core::StorageBackend;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for uploads (e.g., "uploads")
    /// * `base_url` - URL prefix served by the frontend proxy (e.g., "/uploads")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Map a public URL back to the object key, rejecting URLs outside this
    /// backend's prefix.
    fn url_to_key<'a>(&self, url: &'a str) -> StorageResult<&'a str> {
        let key = url
            .strip_prefix(&self.base_url)
            .map(|rest| rest.trim_start_matches('/'))
            .ok_or_else(|| StorageError::InvalidKey(format!("URL not under {}", self.base_url)))?;
        if key.is_empty() {
            return Err(StorageError::InvalidKey("Empty storage key".to_string()));
        }
        Ok(key)
    }

    /// Convert storage key to filesystem path with traversal validation.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.contains("..") || storage_key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(self.base_path.join(storage_key))
    }

    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(
        &self,
        folder: &str,
        original_name: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        let key = generate_object_key(folder, original_name);
        let path = self.key_to_path(&key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(url)
    }

    async fn download(&self, url: &str) -> StorageResult<Vec<u8>> {
        let key = self.url_to_key(url)?;
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(key.to_string()));
        }

        fs::read(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })
    }

    async fn delete(&self, url: &str) -> StorageResult<()> {
        let key = self.url_to_key(url)?;
        let path = self.key_to_path(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            // Already gone; idempotent.
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(key = %key, "Local storage delete successful");

        Ok(())
    }

    async fn exists(&self, url: &str) -> StorageResult<bool> {
        let key = self.url_to_key(url)?;
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn test_storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path(), "/uploads".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn store_then_download_round_trips() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let data = b"jpeg bytes".to_vec();
        let url = storage
            .store("cars", "photo.jpg", "image/jpeg", data.clone())
            .await
            .unwrap();

        assert!(url.starts_with("/uploads/cars/"));
        assert!(url.ends_with(".jpg"));

        let downloaded = storage.download(&url).await.unwrap();
        assert_eq!(data, downloaded);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let url = storage
            .store("news", "pic.png", "image/png", b"png".to_vec())
            .await
            .unwrap();

        storage.delete(&url).await.unwrap();
        // Second delete of the same URL must not error.
        storage.delete(&url).await.unwrap();
        // Neither does deleting something that never existed.
        storage.delete("/uploads/news/never-there.png").await.unwrap();

        assert!(!storage.exists(&url).await.unwrap());
    }

    #[tokio::test]
    async fn path_traversal_is_rejected() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let result = storage.download("/uploads/../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("/uploads/../secret.txt").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn urls_outside_prefix_are_rejected() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let result = storage.download("https://elsewhere.example/cars/x.jpg").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn concurrent_stores_never_collide() {
        let dir = tempdir().unwrap();
        let storage = test_storage(&dir).await;

        let mut urls = Vec::new();
        for _ in 0..8 {
            urls.push(
                storage
                    .store("cars", "same-name.jpg", "image/jpeg", b"x".to_vec())
                    .await
                    .unwrap(),
            );
        }
        let unique: std::collections::HashSet<_> = urls.iter().collect();
        assert_eq!(unique.len(), urls.len());
    }
}
