//! # Object Store Repository Trait
//!
//! 出力先バケットへの保存を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// オブジェクトストアリポジトリ
///
/// 1つのバケットに束縛された保存先
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStoreRepository: Send + Sync {
    /// バケットが存在するか確認する
    ///
    /// # Errors
    ///
    /// 認証失敗など、存在確認そのものができなかった場合
    async fn bucket_exists(&self) -> Result<bool>;

    /// オブジェクトを保存する
    ///
    /// # Arguments
    ///
    /// * `name` - オブジェクト名
    /// * `data` - 内容
    /// * `content_type` - Content-Type
    ///
    /// # Errors
    ///
    /// 保存に失敗した場合にエラーを返す
    async fn upload(&self, name: &str, data: Vec<u8>, content_type: &str) -> Result<()>;
}
