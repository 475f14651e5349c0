//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **FetchCoursesUseCase**: 期間内のコース一覧の取得
//! - **FetchCourseDataUseCase**: コースデータの取得
//! - **ExportCoursesUseCase**: コース単位のスライスとアップロード

pub mod export_courses;
pub mod fetch_course_data;
pub mod fetch_courses;
