//! # Export Courses Use Case
//!
//! コース単位のスライスとアップロード

use anyhow::Result;
use log::{error, info};
use std::sync::Arc;

use crate::domain::entities::course::Course;
use crate::domain::entities::course_data::CourseDataTable;
use crate::domain::entities::export_summary::ExportSummary;
use crate::domain::repositories::object_store_repository::ObjectStoreRepository;
use crate::domain::services::tsv::{TsvService, TSV_CONTENT_TYPE};

/// エクスポートユースケース
///
/// コースごとにデータをスライスしてTSVとして保存する。
/// 1コースの失敗は記録して次のコースに進む。
pub struct ExportCoursesUseCase<S: ObjectStoreRepository + ?Sized> {
    /// `None` ならドライラン（保存せずにログだけ出す）
    object_store: Option<Arc<S>>,
}

impl<S: ObjectStoreRepository + ?Sized> ExportCoursesUseCase<S> {
    /// 保存先を指定してユースケースを作成
    pub fn new(object_store: Arc<S>) -> Self {
        Self {
            object_store: Some(object_store),
        }
    }

    /// ドライラン用のユースケースを作成
    pub fn dry_run() -> Self {
        Self { object_store: None }
    }

    pub fn is_dry_run(&self) -> bool {
        self.object_store.is_none()
    }

    /// 全コースをエクスポートする
    ///
    /// # Arguments
    ///
    /// * `courses` - コースクエリの結果（この順で処理する）
    /// * `table` - 取得クエリの結果
    ///
    /// # Returns
    ///
    /// エクスポート結果のサマリー。個々の失敗はエラーにならない
    pub async fn execute(&self, courses: &[Course], table: &CourseDataTable) -> ExportSummary {
        let mut summary = ExportSummary::new(courses.len());

        for course in courses {
            let filename = course.output_filename();

            info!("Slicing: {}", filename);
            let slice = match table.slice_for_course(&course.id) {
                Ok(slice) => slice,
                Err(e) => {
                    error!("Error Message: {}", e);
                    error!("Failed to slice Course Data for {}.", filename);
                    summary.record_slice_failure(filename);
                    continue;
                }
            };
            let body = TsvService::render(&slice).into_bytes();

            match self.save(&filename, body).await {
                Ok(()) => summary.record_saved(filename),
                Err(e) => {
                    error!("Error Message: {:#}", e);
                    error!("Failed to upload Course Data for {} to GCP.", filename);
                    summary.record_save_failure(filename);
                }
            }
        }

        summary
    }

    async fn save(&self, filename: &str, body: Vec<u8>) -> Result<()> {
        match &self.object_store {
            Some(store) => {
                info!("Saving to GCP: {}", filename);
                store.upload(filename, body, TSV_CONTENT_TYPE).await
            }
            None => {
                info!("Dry run, not saving: {} ({} bytes)", filename, body.len());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::object_store_repository::MockObjectStoreRepository;

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn table() -> CourseDataTable {
        CourseDataTable::new(
            vec!["CourseID".to_string(), "Value".to_string()],
            vec![
                vec![cell("1"), cell("a")],
                vec![cell("2"), cell("b")],
                vec![cell("1"), cell("c")],
            ],
        )
        .unwrap()
    }

    fn courses() -> Vec<Course> {
        vec![Course::new("1", "One"), Course::new("2", "Two")]
    }

    #[tokio::test]
    async fn test_execute_uploads_each_course() {
        let mut store = MockObjectStoreRepository::new();
        store
            .expect_upload()
            .withf(|name, data, content_type| {
                name == "1 - One.tsv"
                    && data.as_slice() == b"\tCourseID\tValue\n0\t1\ta\n2\t1\tc\n"
                    && content_type == "text/tsv"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        store
            .expect_upload()
            .withf(|name, data, _| name == "2 - Two.tsv" && data.as_slice() == b"\tCourseID\tValue\n1\t2\tb\n")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let use_case = ExportCoursesUseCase::new(Arc::new(store));
        let summary = use_case.execute(&courses(), &table()).await;

        assert!(summary.all_sliced());
        assert!(summary.all_saved());
        assert_eq!(summary.saved, vec!["1 - One.tsv", "2 - Two.tsv"]);
    }

    #[tokio::test]
    async fn test_execute_continues_after_upload_failure() {
        let mut store = MockObjectStoreRepository::new();
        store
            .expect_upload()
            .withf(|name, _, _| name == "1 - One.tsv")
            .returning(|_, _, _| Err(anyhow::anyhow!("404 Not Found")));
        store
            .expect_upload()
            .withf(|name, _, _| name == "2 - Two.tsv")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let use_case = ExportCoursesUseCase::new(Arc::new(store));
        let summary = use_case.execute(&courses(), &table()).await;

        assert!(summary.all_sliced());
        assert!(!summary.all_saved());
        assert_eq!(summary.save_failures, vec!["1 - One.tsv"]);
        assert_eq!(summary.saved, vec!["2 - Two.tsv"]);
    }

    #[tokio::test]
    async fn test_execute_missing_course_id_column() {
        let mut store = MockObjectStoreRepository::new();
        store.expect_upload().never();

        let table = CourseDataTable::new(vec!["id".to_string()], vec![vec![cell("1")]]).unwrap();
        let use_case = ExportCoursesUseCase::new(Arc::new(store));
        let summary = use_case.execute(&courses(), &table).await;

        assert!(!summary.all_sliced());
        assert!(!summary.all_saved());
        assert_eq!(summary.slice_failures.len(), 2);
    }

    #[tokio::test]
    async fn test_execute_uploads_header_only_for_course_without_rows() {
        let mut store = MockObjectStoreRepository::new();
        store
            .expect_upload()
            .withf(|name, data, _| name == "3 - Three.tsv" && data.as_slice() == b"\tCourseID\tValue\n")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let use_case = ExportCoursesUseCase::new(Arc::new(store));
        let summary = use_case
            .execute(&[Course::new("3", "Three")], &table())
            .await;

        assert!(summary.all_saved());
    }

    #[tokio::test]
    async fn test_dry_run_saves_nothing() {
        let use_case = ExportCoursesUseCase::<MockObjectStoreRepository>::dry_run();
        assert!(use_case.is_dry_run());

        let summary = use_case.execute(&courses(), &table()).await;
        assert!(summary.all_saved());
        assert_eq!(summary.saved.len(), 2);
    }
}
