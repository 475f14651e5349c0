//! # Fetch Course Data Use Case
//!
//! コースデータ取得ユースケース

use anyhow::{bail, Context, Result};
use log::info;
use std::sync::Arc;

use crate::application::dto::export_config::ExportConfig;
use crate::domain::entities::course::Course;
use crate::domain::entities::course_data::CourseDataTable;
use crate::domain::repositories::course_repository::CourseRepository;
use crate::domain::repositories::query_repository::QueryRepository;
use crate::domain::services::query_template::QueryTemplateService;

/// コースデータ取得ユースケース
///
/// 取得クエリにコースIDのリストを埋め込んで実行する
pub struct FetchCourseDataUseCase<Q: QueryRepository + ?Sized, C: CourseRepository + ?Sized> {
    query_repository: Arc<Q>,
    course_repository: Arc<C>,
}

impl<Q: QueryRepository + ?Sized, C: CourseRepository + ?Sized> FetchCourseDataUseCase<Q, C> {
    /// 新しいユースケースを作成
    pub fn new(query_repository: Arc<Q>, course_repository: Arc<C>) -> Self {
        Self {
            query_repository,
            course_repository,
        }
    }

    /// コースデータを取得する
    ///
    /// # Arguments
    ///
    /// * `config` - エクスポート設定
    /// * `courses` - 対象コース（空であってはならない）
    ///
    /// # Errors
    ///
    /// コースが空の場合、テンプレートの読み込み・展開、またはクエリの実行に失敗した場合
    pub async fn execute(&self, config: &ExportConfig, courses: &[Course]) -> Result<CourseDataTable> {
        if courses.is_empty() {
            bail!("No course IDs to retrieve data for");
        }

        let template = self.query_repository.load(&config.retrieve_query).await?;
        let ids = QueryTemplateService::course_id_list(courses);
        let sql = QueryTemplateService::render(&template, Some(&ids))
            .with_context(|| format!("Invalid query template {}", config.retrieve_query))?;

        let table = self.course_repository.fetch_course_data(&sql).await?;
        info!("Course Data retrieved: {} rows", table.len());

        Ok(table)
    }
}
