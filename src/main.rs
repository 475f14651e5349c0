//! mpr-export - Course Data Exporter
//!
//! コースデータをMySQLから取得し Cloud Storage にアップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::{bail, Result};
use clap::Parser;
use log::{debug, error, info, warn};

use mpr_export::adapter::config::{load_env_file, Config};
use mpr_export::adapter::logging::{init_logger, LogLevel, LOG_LEVEL_KEY};
use mpr_export::driver::{Args, CourseExportWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // LOG_LEVEL may come from the env file, so load it before the logger
    let env_file_loaded = load_env_file(&args.env_file)?;

    let level = LogLevel::resolve(std::env::var(LOG_LEVEL_KEY).ok().as_deref());
    init_logger(level.level)?;
    if let Some(raw) = &level.rejected {
        warn!(
            "Validation error for config item LOG_LEVEL value \"{}\". Defaulting to INFO.",
            raw
        );
    }
    if env_file_loaded {
        debug!("Loaded environment from {}", args.env_file.display());
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            for issue in &e.issues {
                error!("Configuration error: {}", issue);
            }
            bail!("Exiting due to configuration parameter import problems.");
        }
    };
    info!("All configuration parameters set up successfully.");

    if args.check_config {
        info!(
            "Configuration OK: bucket {}, {} month(s), DB {}@{}:{}/{}, service account {}",
            config.bucket,
            config.number_of_months,
            config.database.user,
            config.database.host,
            config.database.port,
            config.database.name,
            config.gcp_key.client_email()
        );
        return Ok(());
    }

    let workflow = CourseExportWorkflow::connect(&config, args.dry_run).await?;
    workflow.execute().await?;

    Ok(())
}
