//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod file_query_repository;
pub mod gcs_object_store_repository;
pub mod mysql_course_repository;
