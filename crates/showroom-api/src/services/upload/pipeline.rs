//! Normalize-and-store batch pipeline.
//!
//! All files are normalized before anything touches storage, so a decode or
//! size failure costs nothing to undo. Storage writes then run one by one;
//! if write k fails, writes 0..k are deleted best-effort and the error is
//! surfaced — callers never observe partial success.

use std::sync::Arc;

use showroom_core::AppError;
use showroom_processing::ImageNormalizer;
use showroom_storage::Storage;

use super::ingest::UploadedFile;
use crate::error::storage_to_app;

/// Normalize every file, then store the batch under `folder`.
/// Returns the stored URLs in input order.
pub async fn process_and_store(
    normalizer: &ImageNormalizer,
    storage: &Arc<dyn Storage>,
    folder: &str,
    files: Vec<UploadedFile>,
) -> Result<Vec<String>, AppError> {
    let mut normalized = Vec::with_capacity(files.len());
    for file in files {
        let image = normalizer
            .normalize_async(file.data, file.content_type)
            .await?;
        normalized.push((file.original_name, image));
    }

    let mut stored_urls: Vec<String> = Vec::with_capacity(normalized.len());
    for (original_name, image) in normalized {
        match storage
            .store(folder, &original_name, &image.content_type, image.data)
            .await
        {
            Ok(url) => stored_urls.push(url),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    stored_so_far = stored_urls.len(),
                    "Batch store failed, rolling back stored images"
                );
                best_effort_delete(storage, &stored_urls).await;
                return Err(storage_to_app(e));
            }
        }
    }

    Ok(stored_urls)
}

/// Take the single file under `field` (if any) and run it through the
/// pipeline. Used by the one-image entities (news, offers, partners, home
/// page slots).
pub async fn store_single_image(
    normalizer: &ImageNormalizer,
    storage: &Arc<dyn Storage>,
    folder: &str,
    form: &mut super::ingest::MultipartForm,
    field: &str,
) -> Result<Option<String>, AppError> {
    match form.take_files(field).into_iter().next() {
        None => Ok(None),
        Some(file) => {
            let mut urls = process_and_store(normalizer, storage, folder, vec![file]).await?;
            Ok(urls.pop())
        }
    }
}

/// Delete URLs, logging failures instead of propagating them. Used for
/// rollback and for cleaning up superseded images, where the primary
/// operation has already succeeded or failed on its own terms.
pub async fn best_effort_delete(storage: &Arc<dyn Storage>, urls: &[String]) {
    for url in urls {
        if let Err(e) = storage.delete(url).await {
            tracing::warn!(url = %url, error = %e, "Failed to delete stored image");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_storage::LocalStorage;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([10, 20, 30, 255]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn upload(name: &str, data: Vec<u8>) -> UploadedFile {
        UploadedFile {
            field_name: "images".into(),
            original_name: name.into(),
            content_type: "image/png".into(),
            data,
        }
    }

    async fn local_storage(dir: &std::path::Path) -> Arc<dyn Storage> {
        Arc::new(
            LocalStorage::new(dir.to_string_lossy().into_owned(), "/uploads".into())
                .await
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn stores_whole_batch_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let storage = local_storage(dir.path()).await;
        let normalizer = ImageNormalizer::new(10 * 1024 * 1024, 1200, 80);

        let files = vec![upload("a.png", png_bytes()), upload("b.png", png_bytes())];
        let urls = process_and_store(&normalizer, &storage, "cars", files)
            .await
            .unwrap();

        assert_eq!(urls.len(), 2);
        for url in &urls {
            assert!(storage.exists(url).await.unwrap());
        }
    }

    #[tokio::test]
    async fn bad_file_fails_before_anything_is_stored() {
        let dir = tempfile::tempdir().unwrap();
        let storage = local_storage(dir.path()).await;
        let normalizer = ImageNormalizer::new(10 * 1024 * 1024, 1200, 80);

        // Second file is not an image; normalization fails up front.
        let files = vec![
            upload("a.png", png_bytes()),
            upload("b.png", b"not an image".to_vec()),
        ];
        let err = process_and_store(&normalizer, &storage, "cars", files)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ImageDecode(_)));

        // Nothing reached storage.
        let entries: Vec<_> = std::fs::read_dir(dir.path().join("cars"))
            .map(|d| d.collect())
            .unwrap_or_default();
        assert!(entries.is_empty());
    }

    /// Wraps a real backend but fails every store after the first N,
    /// recording deletes, so the mid-batch rollback path can be observed.
    struct FailingStorage {
        inner: Arc<dyn Storage>,
        store_budget: AtomicUsize,
        deleted: Mutex<Vec<String>>,
    }

    impl FailingStorage {
        fn new(inner: Arc<dyn Storage>, store_budget: usize) -> Self {
            Self {
                inner,
                store_budget: AtomicUsize::new(store_budget),
                deleted: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl Storage for FailingStorage {
        async fn store(
            &self,
            folder: &str,
            original_name: &str,
            content_type: &str,
            data: Vec<u8>,
        ) -> showroom_storage::StorageResult<String> {
            if self.store_budget.fetch_sub(1, Ordering::SeqCst) == 0 {
                return Err(showroom_storage::StorageError::WriteFailed(
                    "disk full".into(),
                ));
            }
            self.inner
                .store(folder, original_name, content_type, data)
                .await
        }

        async fn download(&self, url: &str) -> showroom_storage::StorageResult<Vec<u8>> {
            self.inner.download(url).await
        }

        async fn delete(&self, url: &str) -> showroom_storage::StorageResult<()> {
            self.deleted.lock().unwrap().push(url.to_string());
            self.inner.delete(url).await
        }

        async fn exists(&self, url: &str) -> showroom_storage::StorageResult<bool> {
            self.inner.exists(url).await
        }

        fn backend_type(&self) -> showroom_storage::StorageBackend {
            self.inner.backend_type()
        }
    }

    #[tokio::test]
    async fn store_failure_mid_batch_rolls_back_earlier_files() {
        let dir = tempfile::tempdir().unwrap();
        let inner = local_storage(dir.path()).await;
        let failing = Arc::new(FailingStorage::new(inner.clone(), 1));
        let storage: Arc<dyn Storage> = failing.clone();
        let normalizer = ImageNormalizer::new(10 * 1024 * 1024, 1200, 80);

        // Both files normalize fine; the second store write fails.
        let files = vec![upload("a.png", png_bytes()), upload("b.png", png_bytes())];
        let err = process_and_store(&normalizer, &storage, "cars", files)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));

        // The first file was stored and then rolled back.
        let deleted = failing.deleted.lock().unwrap().clone();
        assert_eq!(deleted.len(), 1);
        assert!(!inner.exists(&deleted[0]).await.unwrap());
    }

    #[tokio::test]
    async fn best_effort_delete_ignores_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = local_storage(dir.path()).await;
        // Should not panic or error on URLs that were never stored.
        best_effort_delete(&storage, &["/uploads/cars/ghost.png".to_string()]).await;
    }
}
