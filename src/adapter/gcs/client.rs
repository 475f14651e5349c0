//! Cloud Storage Client
//!
//! サービスアカウントで認証したCloud Storageクライアントの生成

use anyhow::Result;
use google_cloud_storage::client::Client;
use google_cloud_storage::http::Error as StorageError;

use crate::adapter::auth::{create_storage_config, ServiceAccountKey};

/// Creates a Cloud Storage client authenticated with the service account.
#[cfg_attr(coverage_nightly, coverage(off))]
pub async fn create_storage_client(key: &ServiceAccountKey) -> Result<Client> {
    let config = create_storage_config(key).await?;
    Ok(Client::new(config))
}

/// HTTP status carried by an API error response, if any.
pub fn response_status(error: &StorageError) -> Option<u16> {
    match error {
        StorageError::Response(response) => Some(response.code),
        _ => None,
    }
}

/// Whether the API answered 404.
pub fn is_not_found(error: &StorageError) -> bool {
    response_status(error) == Some(404)
}
