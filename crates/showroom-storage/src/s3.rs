use crate::keys::generate_object_key;
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{Error as ObjectStoreError, ObjectStoreExt, PutPayload};
use showroom_core::StorageBackend;

/// S3 storage implementation (AWS or any S3-compatible provider).
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    base_url: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        // Public URL prefix: custom-endpoint form for S3-compatible providers,
        // virtual-hosted style for AWS proper.
        let base_url = match endpoint_url {
            Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), bucket),
            None => format!("https://{}.s3.{}.amazonaws.com", bucket, region),
        };

        Ok(S3Storage { store, base_url })
    }

    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    fn url_to_key<'a>(&self, url: &'a str) -> StorageResult<&'a str> {
        url.strip_prefix(&self.base_url)
            .map(|rest| rest.trim_start_matches('/'))
            .filter(|key| !key.is_empty())
            .ok_or_else(|| StorageError::InvalidKey(format!("URL not under {}", self.base_url)))
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn store(
        &self,
        folder: &str,
        original_name: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        let key = generate_object_key(folder, original_name);
        let path = Path::from(key.as_str());
        let size = data.len();
        let start = std::time::Instant::now();

        self.store
            .put(&path, PutPayload::from(data))
            .await
            .map_err(|e| StorageError::WriteFailed(format!("S3 put failed for {}: {}", key, e)))?;

        tracing::info!(
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 write successful"
        );

        Ok(self.generate_url(&key))
    }

    async fn download(&self, url: &str) -> StorageResult<Vec<u8>> {
        let key = self.url_to_key(url)?;
        let path = Path::from(key);

        let result = self.store.get(&path).await.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(key.to_string()),
            other => StorageError::ReadFailed(format!("S3 get failed for {}: {}", key, other)),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::ReadFailed(format!("S3 read failed for {}: {}", key, e)))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, url: &str) -> StorageResult<()> {
        let key = self.url_to_key(url)?;
        let path = Path::from(key);

        match self.store.delete(&path).await {
            Ok(()) => {
                tracing::info!(key = %key, "S3 delete successful");
                Ok(())
            }
            // Already gone; idempotent.
            Err(ObjectStoreError::NotFound { .. }) => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "S3 delete failed for {}: {}",
                key, e
            ))),
        }
    }

    async fn exists(&self, url: &str) -> StorageResult<bool> {
        let key = self.url_to_key(url)?;
        let path = Path::from(key);

        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::ReadFailed(format!(
                "S3 head failed for {}: {}",
                key, e
            ))),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
