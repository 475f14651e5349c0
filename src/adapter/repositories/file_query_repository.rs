//! File Query Repository Implementation
//!
//! QueryRepositoryのファイルシステム実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;

use crate::domain::repositories::query_repository::QueryRepository;

/// クエリフォルダからテンプレートを読むリポジトリ
pub struct FileQueryRepository {
    folder: PathBuf,
}

impl FileQueryRepository {
    /// 新しいリポジトリを作成
    ///
    /// # Arguments
    ///
    /// * `folder` - クエリフォルダ（`~` 展開済み）
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }
}

#[async_trait]
impl QueryRepository for FileQueryRepository {
    async fn load(&self, name: &str) -> Result<String> {
        let path = self.folder.join(name);
        let template = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read query file: {}", path.display()))?;

        debug!("Loaded query template {} ({} bytes)", path.display(), template.len());
        Ok(template)
    }
}
