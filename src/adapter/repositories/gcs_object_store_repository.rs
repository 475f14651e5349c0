//! GCS Object Store Repository Implementation
//!
//! ObjectStoreRepositoryのCloud Storage実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use google_cloud_storage::client::Client;
use google_cloud_storage::http::buckets::get::GetBucketRequest;
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};

use crate::adapter::gcs::client::is_not_found;
use crate::domain::repositories::object_store_repository::ObjectStoreRepository;

/// Cloud Storageのバケット1つに束縛されたリポジトリ
pub struct GcsObjectStoreRepository {
    client: Client,
    bucket: String,
}

impl GcsObjectStoreRepository {
    /// 新しいリポジトリを作成
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl ObjectStoreRepository for GcsObjectStoreRepository {
    async fn bucket_exists(&self) -> Result<bool> {
        let request = GetBucketRequest {
            bucket: self.bucket.clone(),
            ..Default::default()
        };

        match self.client.get_bucket(&request).await {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to look up bucket {}", self.bucket)),
        }
    }

    async fn upload(&self, name: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        let request = UploadObjectRequest {
            bucket: self.bucket.clone(),
            ..Default::default()
        };
        let mut media = Media::new(name.to_string());
        media.content_type = content_type.to_string().into();
        media.content_length = Some(data.len() as u64);

        self.client
            .upload_object(&request, data, &UploadType::Simple(media))
            .await
            .with_context(|| format!("Failed to upload {} to {}", name, self.bucket))?;

        Ok(())
    }
}
