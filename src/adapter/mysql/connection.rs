//! MySQL Connection
//!
//! sqlxによる接続プールの作成と疎通確認

use anyhow::{Context, Result};
use log::info;
use secrecy::ExposeSecret;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;

use crate::adapter::config::DatabaseParams;

/// The job runs its queries one after another.
pub const MAX_CONNECTIONS: u32 = 2;
pub const ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Builds connect options from the configured parameters.
pub fn connect_options(params: &DatabaseParams) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&params.host)
        .port(params.port)
        .username(&params.user)
        .password(params.password.expose_secret())
        .database(&params.name)
}

/// Opens the pool and validates it with a trivial query.
#[cfg_attr(coverage_nightly, coverage(off))]
pub async fn connect(params: &DatabaseParams) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .connect_with(connect_options(params))
        .await
        .with_context(|| {
            format!(
                "Failed to establish DB connection to {}:{}/{}",
                params.host, params.port, params.name
            )
        })?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("Failed to validate DB connection")?;

    info!("DB connection established and validated.");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_connect_options_carry_params() {
        let params = DatabaseParams {
            name: "research".to_string(),
            user: "exporter".to_string(),
            password: SecretString::from("pw".to_string()),
            host: "db.internal".to_string(),
            port: 3307,
        };

        let options = connect_options(&params);
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 3307);
        assert_eq!(options.get_username(), "exporter");
        assert_eq!(options.get_database(), Some("research"));
    }
}
