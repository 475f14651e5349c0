//! # Export Configuration DTO
//!
//! エクスポート設定のData Transfer Object

/// エクスポート設定
///
/// ユースケースが必要とする設定だけを持つ（接続情報や秘密情報は含まない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// 出力先バケット名
    pub bucket: String,
    /// コースを探す期間（月数）
    pub number_of_months: u32,
    /// コースクエリのテンプレート名
    pub course_query: String,
    /// 取得クエリのテンプレート名
    pub retrieve_query: String,
}

impl ExportConfig {
    /// 新しいエクスポート設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use mpr_export::application::dto::export_config::ExportConfig;
    ///
    /// let config = ExportConfig::new(
    ///     "mpr-research-data-uploads".to_string(),
    ///     4,
    ///     "courseQuery.sql".to_string(),
    ///     "retrieveQuery.sql".to_string(),
    /// );
    ///
    /// assert_eq!(config.number_of_months, 4);
    /// ```
    pub fn new(
        bucket: String,
        number_of_months: u32,
        course_query: String,
        retrieve_query: String,
    ) -> Self {
        Self {
            bucket,
            number_of_months,
            course_query,
            retrieve_query,
        }
    }
}
