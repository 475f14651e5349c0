//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **Course**: コースクエリの1行
//! - **CourseDataTable**: 取得クエリの結果セットとコース単位のスライス
//! - **ExportSummary**: エクスポート実行結果のバリューオブジェクト

pub mod course;
pub mod course_data;
pub mod export_summary;
