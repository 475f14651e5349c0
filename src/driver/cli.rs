//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;
use std::path::PathBuf;

/// 直近のコースデータをCloud Storageへエクスポートするバッチ
#[derive(Parser, Debug, Clone)]
#[command(name = "mpr-export")]
#[command(about = "Export recent course data from MySQL to a Cloud Storage bucket", long_about = None)]
pub struct Args {
    /// Dry run mode - query and slice, but don't upload
    #[arg(long)]
    pub dry_run: bool,

    /// Validate the configuration and exit
    #[arg(long)]
    pub check_config: bool,

    /// Env file loaded before reading configuration (missing file is ignored)
    #[arg(short, long, default_value = ".env")]
    pub env_file: PathBuf,
}
