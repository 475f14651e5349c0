//! # Application Layer
//!
//! コースデータのエクスポートという一連の流れ（ユースケース）
//!
//! ## 特徴
//!
//! - クエリテンプレートの展開とTSV変換はDomain層のサービスに任せる
//! - MySQLやCloud StorageにはRepository trait越しにだけアクセスする
//! - 1コースの失敗は記録して処理を続ける
//!
//! ## 構成要素
//!
//! - **dto**: ExportConfig（ユースケースが必要とする設定だけ）
//! - **use_cases**: FetchCourses, FetchCourseData, ExportCourses

pub mod dto;
pub mod use_cases;
