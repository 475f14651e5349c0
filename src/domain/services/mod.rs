//! # Domain Services
//!
//! エンティティに属さない純粋なビジネスロジック
//!
//! - **query_template**: SQLテンプレートへのパラメータ埋め込み
//! - **tsv**: スライスのTSV変換

pub mod query_template;
pub mod tsv;
