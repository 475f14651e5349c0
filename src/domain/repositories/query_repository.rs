//! # Query Repository Trait
//!
//! SQLテンプレートの読み込みを抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// クエリリポジトリ
///
/// 名前を指定してSQLテンプレートを読み込む
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QueryRepository: Send + Sync {
    /// テンプレートを読み込む
    ///
    /// # Arguments
    ///
    /// * `name` - テンプレート名（クエリフォルダ内のファイル名）
    ///
    /// # Errors
    ///
    /// テンプレートが読めない場合にエラーを返す
    async fn load(&self, name: &str) -> Result<String>;
}
