//! # Course Repository Trait
//!
//! コースとコースデータの取得を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::course::Course;
use crate::domain::entities::course_data::CourseDataTable;

/// コースリポジトリ
///
/// 展開済みのSQLを実行し、ドメインの型で結果を返す
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// コースクエリを実行する
    ///
    /// 結果の1列目をID、2列目を名前として扱う
    ///
    /// # Errors
    ///
    /// クエリが失敗した場合、または結果が2列未満の場合
    async fn fetch_courses(&self, sql: &str) -> Result<Vec<Course>>;

    /// 取得クエリを実行する
    ///
    /// # Errors
    ///
    /// クエリが失敗した場合にエラーを返す
    async fn fetch_course_data(&self, sql: &str) -> Result<CourseDataTable>;
}
