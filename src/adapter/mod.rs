//! Adapter Layer
//!
//! 外部システム（MySQL, Cloud Storage, ファイルシステム, 環境変数）との統合

pub mod auth;
pub mod config;
pub mod gcs;
pub mod logging;
pub mod mysql;
pub mod repositories;
