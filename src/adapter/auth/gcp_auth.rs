//! GCP Authentication
//!
//! サービスアカウントJSONの形式チェックと、Cloud Storageクライアント設定の生成

use anyhow::{Context, Result};
use google_cloud_storage::client::google_cloud_auth::credentials::CredentialsFile;
use google_cloud_storage::client::ClientConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// Errors found while checking a service-account key.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("not a JSON object with string fields: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("\"type\" is \"{0}\", expected \"service_account\"")]
    WrongType(String),

    #[error("\"{0}\" is missing or empty")]
    MissingField(&'static str),
}

#[derive(Deserialize)]
struct KeyFields {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    project_id: String,
    #[serde(default)]
    client_email: String,
    #[serde(default)]
    private_key: String,
}

/// Service-account key as read from `GCP_KEY`.
///
/// Only the fields the job reports on are extracted; the full JSON is kept
/// verbatim and handed to the SDK.
pub struct ServiceAccountKey {
    project_id: String,
    client_email: String,
    json: SecretString,
}

impl ServiceAccountKey {
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        let fields: KeyFields = serde_json::from_str(raw)?;

        if fields.kind != SERVICE_ACCOUNT_TYPE {
            return Err(KeyError::WrongType(fields.kind));
        }
        for (name, value) in [
            ("project_id", &fields.project_id),
            ("client_email", &fields.client_email),
            ("private_key", &fields.private_key),
        ] {
            if value.trim().is_empty() {
                return Err(KeyError::MissingField(name));
            }
        }

        Ok(Self {
            project_id: fields.project_id,
            client_email: fields.client_email,
            json: SecretString::from(raw.to_string()),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    pub fn expose_json(&self) -> &str {
        self.json.expose_secret()
    }
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("json", &"[REDACTED]")
            .finish()
    }
}

/// Builds an authenticated Cloud Storage client configuration from the key.
#[cfg_attr(coverage_nightly, coverage(off))]
pub async fn create_storage_config(key: &ServiceAccountKey) -> Result<ClientConfig> {
    let credentials = CredentialsFile::new_from_str(key.expose_json())
        .await
        .context("Failed to read GCP service account credentials")?;

    ClientConfig::default()
        .with_credentials(credentials)
        .await
        .context("Failed to authenticate with service account. Check GCP JSON Credentials")
}
