//! # Fetch Courses Use Case
//!
//! 期間内のコース一覧を取得するユースケース

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

use crate::application::dto::export_config::ExportConfig;
use crate::domain::entities::course::Course;
use crate::domain::repositories::course_repository::CourseRepository;
use crate::domain::repositories::query_repository::QueryRepository;
use crate::domain::services::query_template::QueryTemplateService;

/// コース一覧取得ユースケース
///
/// コースクエリに月数を埋め込んで実行する
pub struct FetchCoursesUseCase<Q: QueryRepository + ?Sized, C: CourseRepository + ?Sized> {
    query_repository: Arc<Q>,
    course_repository: Arc<C>,
}

impl<Q: QueryRepository + ?Sized, C: CourseRepository + ?Sized> FetchCoursesUseCase<Q, C> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `query_repository` - クエリリポジトリ
    /// * `course_repository` - コースリポジトリ
    pub fn new(query_repository: Arc<Q>, course_repository: Arc<C>) -> Self {
        Self {
            query_repository,
            course_repository,
        }
    }

    /// コース一覧を取得する
    ///
    /// # Returns
    ///
    /// クエリの返した順のコース（空の場合もある）
    ///
    /// # Errors
    ///
    /// テンプレートの読み込み・展開、またはクエリの実行に失敗した場合
    pub async fn execute(&self, config: &ExportConfig) -> Result<Vec<Course>> {
        let template = self.query_repository.load(&config.course_query).await?;
        let months = QueryTemplateService::months_modifier(config.number_of_months);
        let sql = QueryTemplateService::render(&template, Some(&months))
            .with_context(|| format!("Invalid query template {}", config.course_query))?;

        let courses = self.course_repository.fetch_courses(&sql).await?;
        info!("Courses retrieved: {}", courses.len());

        Ok(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::course_repository::MockCourseRepository;
    use crate::domain::repositories::query_repository::MockQueryRepository;

    fn config() -> ExportConfig {
        ExportConfig::new(
            "bucket".to_string(),
            6,
            "courseQuery.sql".to_string(),
            "retrieveQuery.sql".to_string(),
        )
    }

    #[tokio::test]
    async fn test_execute_renders_months_into_query() {
        let mut queries = MockQueryRepository::new();
        queries
            .expect_load()
            .withf(|name| name == "courseQuery.sql")
            .times(1)
            .returning(|_| Ok("SELECT id, name FROM c WHERE m <= {}".to_string()));

        let mut courses = MockCourseRepository::new();
        courses
            .expect_fetch_courses()
            .withf(|sql| sql == "SELECT id, name FROM c WHERE m <= 6")
            .times(1)
            .returning(|_| Ok(vec![Course::new("1", "A"), Course::new("2", "B")]));

        let use_case = FetchCoursesUseCase::new(Arc::new(queries), Arc::new(courses));
        let result = use_case.execute(&config()).await.unwrap();

        assert_eq!(result, vec![Course::new("1", "A"), Course::new("2", "B")]);
    }

    #[tokio::test]
    async fn test_execute_bad_template_skips_query() {
        let mut queries = MockQueryRepository::new();
        queries
            .expect_load()
            .returning(|_| Ok("SELECT {months}".to_string()));

        let mut courses = MockCourseRepository::new();
        courses.expect_fetch_courses().never();

        let use_case = FetchCoursesUseCase::new(Arc::new(queries), Arc::new(courses));
        let err = use_case.execute(&config()).await.unwrap_err();

        assert!(err.to_string().contains("courseQuery.sql"));
    }

    #[tokio::test]
    async fn test_execute_propagates_query_failure() {
        let mut queries = MockQueryRepository::new();
        queries
            .expect_load()
            .returning(|_| Ok("SELECT {}".to_string()));

        let mut courses = MockCourseRepository::new();
        courses
            .expect_fetch_courses()
            .returning(|_| Err(anyhow::anyhow!("Lost connection to MySQL server")));

        let use_case = FetchCoursesUseCase::new(Arc::new(queries), Arc::new(courses));
        assert!(use_case.execute(&config()).await.is_err());
    }
}
