//! # TSV Service
//!
//! コース単位のスライスをTSVに変換する
//!
//! - 区切り文字はタブ、行末は `\n`
//! - クォートはしない。`\`、タブ、改行、復帰はバックスラッシュでエスケープ
//! - 先頭列は元の結果セットでの行番号（ヘッダは空）
//! - NULLは空フィールド

use crate::domain::entities::course_data::CourseDataSlice;

/// アップロード時のContent-Type
pub const TSV_CONTENT_TYPE: &str = "text/tsv";

const DELIMITER: char = '\t';
const ESCAPE: char = '\\';

/// TSVサービス
pub struct TsvService;

impl TsvService {
    /// スライスをTSV文字列に変換する
    pub fn render(slice: &CourseDataSlice<'_>) -> String {
        let mut out = String::new();

        for column in slice.columns() {
            out.push(DELIMITER);
            Self::push_escaped(&mut out, column);
        }
        out.push('\n');

        for (row_index, cells) in slice.rows() {
            out.push_str(&row_index.to_string());
            for cell in cells.iter() {
                out.push(DELIMITER);
                if let Some(value) = cell {
                    Self::push_escaped(&mut out, value);
                }
            }
            out.push('\n');
        }

        out
    }

    fn push_escaped(out: &mut String, field: &str) {
        for c in field.chars() {
            if matches!(c, ESCAPE | DELIMITER | '\n' | '\r') {
                out.push(ESCAPE);
            }
            out.push(c);
        }
    }
}
