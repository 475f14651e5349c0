//! Configuration
//!
//! 環境変数（必要に応じて `.env` から補完）から実行設定を読み込む。
//! すべてのキーを検証してから失敗するので、1回の実行で全ての問題が分かる。

use secrecy::SecretString;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::adapter::auth::ServiceAccountKey;

pub const DEFAULT_BUCKET: &str = "mpr-research-data-uploads";
pub const DEFAULT_NUMBER_OF_MONTHS: u32 = 4;
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_QUERY_FOLDER: &str = "queries/";
pub const DEFAULT_COURSE_QUERY: &str = "courseQuery.sql";
pub const DEFAULT_RETRIEVE_QUERY: &str = "retrieveQuery.sql";

/// One problem with one configuration key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("{key} is required but not set")]
    Missing { key: &'static str },

    #[error("{key} value \"{value}\" is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigIssue {
    pub fn key(&self) -> &'static str {
        match self {
            ConfigIssue::Missing { key } | ConfigIssue::Invalid { key, .. } => key,
        }
    }
}

/// Every issue found while loading the configuration.
#[derive(Debug, Error)]
#[error("{} configuration problem(s): {}", .issues.len(), join_issues(.issues))]
pub struct ConfigError {
    pub issues: Vec<ConfigIssue>,
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// MySQL接続パラメータ
#[derive(Debug)]
pub struct DatabaseParams {
    pub name: String,
    pub user: String,
    pub password: SecretString,
    pub host: String,
    pub port: u16,
}

/// クエリフォルダとテンプレートファイル名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFiles {
    pub folder: PathBuf,
    pub course: String,
    pub retrieve: String,
}

/// 実行設定
#[derive(Debug)]
pub struct Config {
    pub bucket: String,
    pub number_of_months: u32,
    pub database: DatabaseParams,
    pub gcp_key: ServiceAccountKey,
    pub queries: QueryFiles,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// Unset and empty keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut reader = KeyReader::new(lookup);

        let bucket = reader.text("GCLOUD_BUCKET", Some(DEFAULT_BUCKET));
        let number_of_months =
            reader.number("NUMBER_OF_MONTHS", DEFAULT_NUMBER_OF_MONTHS, |months| {
                if *months >= 1 {
                    Ok(())
                } else {
                    Err("must be at least 1".to_string())
                }
            });

        let queries = reader.query_files();

        let db_name = reader.text("DB_NAME", None);
        let db_user = reader.text("DB_USER", None);
        let db_password = reader.secret("DB_PASSWORD");
        let db_host = reader.text("DB_HOST", None);
        let db_port = reader
            .number("DB_PORT", u32::from(DEFAULT_DB_PORT), |port| {
                if (1..=u32::from(u16::MAX)).contains(port) {
                    Ok(())
                } else {
                    Err("must be a TCP port between 1 and 65535".to_string())
                }
            })
            .and_then(|port| u16::try_from(port).ok());

        let gcp_key = reader.service_account_key("GCP_KEY");

        match (
            bucket,
            number_of_months,
            queries,
            db_name,
            db_user,
            db_password,
            db_host,
            db_port,
            gcp_key,
        ) {
            (
                Some(bucket),
                Some(number_of_months),
                Some(queries),
                Some(name),
                Some(user),
                Some(password),
                Some(host),
                Some(port),
                Some(gcp_key),
            ) if reader.issues.is_empty() => Ok(Self {
                bucket,
                number_of_months,
                database: DatabaseParams {
                    name,
                    user,
                    password,
                    host,
                    port,
                },
                gcp_key,
                queries,
            }),
            _ => Err(ConfigError {
                issues: reader.issues,
            }),
        }
    }
}

impl QueryFiles {
    pub fn course_path(&self) -> PathBuf {
        self.folder.join(&self.course)
    }

    pub fn retrieve_path(&self) -> PathBuf {
        self.folder.join(&self.retrieve)
    }
}

/// Seeds the process environment from a dotenv file.
///
/// Variables already present win. Returns `false` when the file does not exist.
pub fn load_env_file(path: &Path) -> anyhow::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    dotenvy::from_path(path)
        .map_err(|e| anyhow::anyhow!("Failed to read env file {}: {}", path.display(), e))?;
    Ok(true)
}

struct KeyReader<F> {
    lookup: F,
    issues: Vec<ConfigIssue>,
}

impl<F> KeyReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn new(lookup: F) -> Self {
        Self {
            lookup,
            issues: Vec::new(),
        }
    }

    fn raw(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.is_empty())
    }

    fn invalid(&mut self, key: &'static str, value: &str, reason: impl Into<String>) {
        self.issues.push(ConfigIssue::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        });
    }

    fn text(&mut self, key: &'static str, default: Option<&str>) -> Option<String> {
        match self.raw(key).or_else(|| default.map(str::to_string)) {
            Some(value) if value.trim().is_empty() => {
                self.invalid(key, &value, "must not be blank");
                None
            }
            Some(value) => Some(value),
            None => {
                self.issues.push(ConfigIssue::Missing { key });
                None
            }
        }
    }

    fn secret(&mut self, key: &'static str) -> Option<SecretString> {
        match self.raw(key) {
            Some(value) => Some(SecretString::from(value)),
            None => {
                self.issues.push(ConfigIssue::Missing { key });
                None
            }
        }
    }

    fn number<T, C>(&mut self, key: &'static str, default: T, check: C) -> Option<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
        C: Fn(&T) -> Result<(), String>,
    {
        let Some(value) = self.raw(key) else {
            return Some(default);
        };

        match value.trim().parse::<T>() {
            Ok(parsed) => match check(&parsed) {
                Ok(()) => Some(parsed),
                Err(reason) => {
                    self.invalid(key, &value, reason);
                    None
                }
            },
            Err(e) => {
                self.invalid(key, &value, format!("not an integer ({})", e));
                None
            }
        }
    }

    fn query_files(&mut self) -> Option<QueryFiles> {
        let folder = self.text("QUERY_FOLDER", Some(DEFAULT_QUERY_FOLDER))?;
        let expanded = PathBuf::from(shellexpand::tilde(&folder).as_ref());
        if !expanded.is_dir() {
            self.invalid("QUERY_FOLDER", &folder, "directory does not exist");
            return None;
        }

        let course = self.query_file("COURSE_QUERY", DEFAULT_COURSE_QUERY, &expanded);
        let retrieve = self.query_file("RETRIEVE_QUERY", DEFAULT_RETRIEVE_QUERY, &expanded);

        Some(QueryFiles {
            folder: expanded,
            course: course?,
            retrieve: retrieve?,
        })
    }

    fn query_file(&mut self, key: &'static str, default: &str, folder: &Path) -> Option<String> {
        let name = self.text(key, Some(default))?;
        if folder.join(&name).is_file() {
            Some(name)
        } else {
            let reason = format!("file not found in {}", folder.display());
            self.invalid(key, &name, reason);
            None
        }
    }

    fn service_account_key(&mut self, key: &'static str) -> Option<ServiceAccountKey> {
        let raw = match self.raw(key) {
            Some(raw) => raw,
            None => {
                self.issues.push(ConfigIssue::Missing { key });
                return None;
            }
        };

        match ServiceAccountKey::parse(&raw) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                self.invalid(key, "<redacted>", e.to_string());
                None
            }
        }
    }
}
