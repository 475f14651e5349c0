//! # CourseDataTable Value Object
//!
//! 取得クエリの結果セットと、コース単位のスライス

use thiserror::Error;

/// スライスに使う列名
pub const COURSE_ID_COLUMN: &str = "CourseID";

/// テーブル操作のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CourseDataError {
    #[error("row {row} has {actual} cells but the result has {expected} columns")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column \"{0}\" not found in course data")]
    MissingColumn(String),
}

/// 取得クエリの結果セット
///
/// 列名と、NULLを許容するテキストセルの行で構成される
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl CourseDataTable {
    /// 新しいテーブルを作成
    ///
    /// # Errors
    ///
    /// 列数と一致しない行がある場合に `RowWidthMismatch` を返す
    pub fn new(
        columns: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Result<Self, CourseDataError> {
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(CourseDataError::RowWidthMismatch {
                row,
                expected: columns.len(),
                actual: cells.len(),
            });
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 行数を返す
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 指定した列のインデックスを返す
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// `CourseID` 列が一致する行だけを取り出す
    ///
    /// 各行は結果セット全体での行番号を保持する
    ///
    /// # Errors
    ///
    /// `CourseID` 列が存在しない場合に `MissingColumn` を返す
    pub fn slice_for_course(&self, course_id: &str) -> Result<CourseDataSlice<'_>, CourseDataError> {
        let idx = self
            .column_index(COURSE_ID_COLUMN)
            .ok_or_else(|| CourseDataError::MissingColumn(COURSE_ID_COLUMN.to_string()))?;

        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| cells[idx].as_deref() == Some(course_id))
            .map(|(row_index, cells)| (row_index, cells.as_slice()))
            .collect();

        Ok(CourseDataSlice {
            columns: &self.columns,
            rows,
        })
    }
}

/// 1コース分のスライス（元テーブルを借用する）
#[derive(Debug, Clone)]
pub struct CourseDataSlice<'a> {
    columns: &'a [String],
    rows: Vec<(usize, &'a [Option<String>])>,
}

impl<'a> CourseDataSlice<'a> {
    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    /// (元テーブルでの行番号, セル) の列
    pub fn rows(&self) -> &[(usize, &'a [Option<String>])] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
