//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::{error, info, warn};
use std::sync::Arc;
use thiserror::Error;

use crate::adapter::config::Config;
use crate::adapter::gcs::create_storage_client;
use crate::adapter::mysql;
use crate::adapter::repositories::file_query_repository::FileQueryRepository;
use crate::adapter::repositories::gcs_object_store_repository::GcsObjectStoreRepository;
use crate::adapter::repositories::mysql_course_repository::MySqlCourseRepository;
use crate::application::dto::export_config::ExportConfig;
use crate::application::use_cases::export_courses::ExportCoursesUseCase;
use crate::application::use_cases::fetch_course_data::FetchCourseDataUseCase;
use crate::application::use_cases::fetch_courses::FetchCoursesUseCase;
use crate::domain::entities::export_summary::ExportSummary;
use crate::domain::repositories::course_repository::CourseRepository;
use crate::domain::repositories::object_store_repository::ObjectStoreRepository;
use crate::domain::repositories::query_repository::QueryRepository;

/// Conditions that stop the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("Exiting due to no courses being found in current configuration.")]
    NoCourses,

    #[error("Bucket {bucket} in {project} not found.")]
    BucketNotFound { bucket: String, project: String },
}

/// Projects the loaded configuration onto what the use cases need.
pub fn export_config(config: &Config) -> ExportConfig {
    ExportConfig::new(
        config.bucket.clone(),
        config.number_of_months,
        config.queries.course.clone(),
        config.queries.retrieve.clone(),
    )
}

/// Fails unless the target bucket exists.
pub async fn verify_bucket(
    store: &dyn ObjectStoreRepository,
    bucket: &str,
    project: &str,
) -> Result<()> {
    if store.bucket_exists().await? {
        info!("Bucket {} found in {}.", bucket, project);
        Ok(())
    } else {
        error!("Bucket {} in {} not found.", bucket, project);
        Err(ExportError::BucketNotFound {
            bucket: bucket.to_string(),
            project: project.to_string(),
        }
        .into())
    }
}

/// Course Export Workflow
pub struct CourseExportWorkflow {
    config: ExportConfig,
    fetch_courses_use_case: FetchCoursesUseCase<dyn QueryRepository, dyn CourseRepository>,
    fetch_course_data_use_case: FetchCourseDataUseCase<dyn QueryRepository, dyn CourseRepository>,
    export_use_case: ExportCoursesUseCase<dyn ObjectStoreRepository>,
}

impl CourseExportWorkflow {
    /// Create a new workflow instance with dependency injection
    ///
    /// `object_store` が `None` の場合はドライラン
    pub fn new(
        config: ExportConfig,
        query_repository: Arc<dyn QueryRepository>,
        course_repository: Arc<dyn CourseRepository>,
        object_store: Option<Arc<dyn ObjectStoreRepository>>,
    ) -> Self {
        let fetch_courses_use_case =
            FetchCoursesUseCase::new(query_repository.clone(), course_repository.clone());
        let fetch_course_data_use_case =
            FetchCourseDataUseCase::new(query_repository, course_repository);
        let export_use_case = match object_store {
            Some(store) => ExportCoursesUseCase::new(store),
            None => ExportCoursesUseCase::dry_run(),
        };

        Self {
            config,
            fetch_courses_use_case,
            fetch_course_data_use_case,
            export_use_case,
        }
    }

    /// Connects to MySQL and, unless `dry_run`, to the Cloud Storage bucket.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn connect(config: &Config, dry_run: bool) -> Result<Self> {
        let pool = mysql::connect(&config.database).await?;
        let course_repository: Arc<dyn CourseRepository> =
            Arc::new(MySqlCourseRepository::new(pool));
        let query_repository: Arc<dyn QueryRepository> =
            Arc::new(FileQueryRepository::new(config.queries.folder.clone()));

        let object_store = if dry_run {
            info!("Dry run: GCP connection skipped.");
            None
        } else {
            let client = create_storage_client(&config.gcp_key).await?;
            let store: Arc<dyn ObjectStoreRepository> =
                Arc::new(GcsObjectStoreRepository::new(client, config.bucket.clone()));
            verify_bucket(store.as_ref(), &config.bucket, config.gcp_key.project_id()).await?;
            info!("GCP connection established and validated.");
            Some(store)
        };

        Ok(Self::new(
            export_config(config),
            query_repository,
            course_repository,
            object_store,
        ))
    }

    /// Execute the export workflow
    pub async fn execute(&self) -> Result<ExportSummary> {
        info!("Starting course export...");
        info!("Bucket: {}", self.config.bucket);
        info!("Lookback window: {} month(s)", self.config.number_of_months);
        info!("Dry run: {}", self.export_use_case.is_dry_run());

        let courses = self.fetch_courses_use_case.execute(&self.config).await?;
        if courses.is_empty() {
            info!("No courses to be retrieved.");
            return Err(ExportError::NoCourses.into());
        }

        let table = self
            .fetch_course_data_use_case
            .execute(&self.config, &courses)
            .await?;

        let summary = self.export_use_case.execute(&courses, &table).await;

        // 個々のコースの失敗では止めないので、最後にまとめて警告する
        if !summary.all_sliced() {
            warn!("Not all course data could be sliced correctly.");
        }
        if !summary.all_saved() {
            warn!("Not all course data could be saved to GCP correctly.");
        }

        info!(
            "Export complete: {} of {} course file(s) saved.",
            summary.saved.len(),
            summary.total_courses
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::course::Course;
    use crate::domain::entities::course_data::CourseDataTable;
    use crate::domain::repositories::course_repository::MockCourseRepository;
    use crate::domain::repositories::object_store_repository::MockObjectStoreRepository;
    use crate::domain::repositories::query_repository::MockQueryRepository;

    fn config() -> ExportConfig {
        ExportConfig::new(
            "mpr-research-data-uploads".to_string(),
            4,
            "courseQuery.sql".to_string(),
            "retrieveQuery.sql".to_string(),
        )
    }

    fn queries() -> MockQueryRepository {
        let mut queries = MockQueryRepository::new();
        queries
            .expect_load()
            .returning(|name| Ok(format!("-- {}\nSELECT {{}}", name)));
        queries
    }

    #[tokio::test]
    async fn test_execute_no_courses_is_error() {
        let mut courses = MockCourseRepository::new();
        courses.expect_fetch_courses().returning(|_| Ok(vec![]));
        courses.expect_fetch_course_data().never();

        let workflow =
            CourseExportWorkflow::new(config(), Arc::new(queries()), Arc::new(courses), None);
        let err = workflow.execute().await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<ExportError>(),
            Some(&ExportError::NoCourses)
        );
    }

    #[tokio::test]
    async fn test_execute_uploads_all_courses() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_fetch_courses()
            .withf(|sql| sql.ends_with("SELECT 4"))
            .returning(|_| Ok(vec![Course::new("5", "Five"), Course::new("6", "Six")]));
        courses
            .expect_fetch_course_data()
            .withf(|sql| sql.ends_with("SELECT 5,6"))
            .returning(|_| {
                Ok(CourseDataTable::new(
                    vec!["CourseID".to_string()],
                    vec![vec![Some("5".to_string())], vec![Some("6".to_string())]],
                )
                .unwrap())
            });

        let mut store = MockObjectStoreRepository::new();
        store.expect_upload().times(2).returning(|_, _, _| Ok(()));

        let workflow = CourseExportWorkflow::new(
            config(),
            Arc::new(queries()),
            Arc::new(courses),
            Some(Arc::new(store)),
        );
        let summary = workflow.execute().await.unwrap();

        assert!(summary.all_saved());
        assert_eq!(summary.saved, vec!["5 - Five.tsv", "6 - Six.tsv"]);
    }

    #[tokio::test]
    async fn test_execute_partial_upload_failure_still_succeeds() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_fetch_courses()
            .returning(|_| Ok(vec![Course::new("5", "Five")]));
        courses
            .expect_fetch_course_data()
            .returning(|_| Ok(CourseDataTable::new(vec!["CourseID".to_string()], vec![]).unwrap()));

        let mut store = MockObjectStoreRepository::new();
        store
            .expect_upload()
            .returning(|_, _, _| Err(anyhow::anyhow!("403 Forbidden")));

        let workflow = CourseExportWorkflow::new(
            config(),
            Arc::new(queries()),
            Arc::new(courses),
            Some(Arc::new(store)),
        );
        let summary = workflow.execute().await.unwrap();

        assert!(!summary.all_saved());
        assert_eq!(summary.save_failures, vec!["5 - Five.tsv"]);
    }

    #[tokio::test]
    async fn test_verify_bucket_missing() {
        let mut store = MockObjectStoreRepository::new();
        store.expect_bucket_exists().returning(|| Ok(false));

        let err = verify_bucket(&store, "missing-bucket", "mpr-research")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Bucket missing-bucket in mpr-research not found."
        );
    }

    #[tokio::test]
    async fn test_verify_bucket_present() {
        let mut store = MockObjectStoreRepository::new();
        store.expect_bucket_exists().returning(|| Ok(true));

        assert!(verify_bucket(&store, "b", "p").await.is_ok());
    }
}
