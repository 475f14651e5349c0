//! # ExportSummary Value Object
//!
//! 1回のエクスポート実行の結果

/// エクスポート結果のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// 対象コース数
    pub total_courses: usize,
    /// 保存に成功したオブジェクト名
    pub saved: Vec<String>,
    /// スライスに失敗したオブジェクト名
    pub slice_failures: Vec<String>,
    /// アップロードに失敗したオブジェクト名
    pub save_failures: Vec<String>,
}

impl ExportSummary {
    pub fn new(total_courses: usize) -> Self {
        Self {
            total_courses,
            ..Default::default()
        }
    }

    pub fn record_saved(&mut self, name: String) {
        self.saved.push(name);
    }

    pub fn record_slice_failure(&mut self, name: String) {
        self.slice_failures.push(name);
    }

    pub fn record_save_failure(&mut self, name: String) {
        self.save_failures.push(name);
    }

    /// 全コースのスライスに成功したか
    pub fn all_sliced(&self) -> bool {
        self.slice_failures.is_empty()
    }

    /// 全コースの保存に成功したか
    ///
    /// スライスに失敗したコースも保存されていないので `false` になる
    ///
    /// # 例
    ///
    /// ```
    /// use mpr_export::domain::entities::export_summary::ExportSummary;
    ///
    /// let mut summary = ExportSummary::new(2);
    /// summary.record_saved("1 - A.tsv".to_string());
    /// assert!(!summary.all_saved());
    ///
    /// summary.record_saved("2 - B.tsv".to_string());
    /// assert!(summary.all_saved());
    /// ```
    pub fn all_saved(&self) -> bool {
        self.saved.len() == self.total_courses
    }
}
