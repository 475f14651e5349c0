//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（Rust標準ライブラリと最小限の依存のみ）
//! - データベースやクラウドストレージについて何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（Course, CourseDataTableなど）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（クエリテンプレート、TSV変換）

pub mod entities;
pub mod repositories;
pub mod services;
