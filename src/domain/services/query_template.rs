//! # Query Template Service
//!
//! SQLテンプレートへのパラメータ埋め込み

use thiserror::Error;

use crate::domain::entities::course::Course;

/// テンプレート展開のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder {{{field}}} at byte {position}")]
    UnknownField { field: String, position: usize },

    #[error("unclosed '{{' at byte {position}")]
    UnclosedBrace { position: usize },

    #[error("single '}}' at byte {position}; use '}}}}' for a literal brace")]
    UnmatchedClosingBrace { position: usize },
}

/// クエリテンプレートサービス
///
/// テンプレート中の `{}` / `{0}` をパラメータで置き換える。
/// `{{` と `}}` はリテラルの波括弧になる。
pub struct QueryTemplateService;

impl QueryTemplateService {
    /// テンプレートを展開する
    ///
    /// # Arguments
    ///
    /// * `template` - SQLテンプレート
    /// * `modifier` - 埋め込む値。`None` または空文字ならテンプレートをそのまま返す
    ///
    /// # Errors
    ///
    /// `{}` / `{0}` 以外のプレースホルダや対応しない波括弧がある場合
    ///
    /// # 例
    ///
    /// ```
    /// use mpr_export::domain::services::query_template::QueryTemplateService;
    ///
    /// let sql = "SELECT id, name FROM course WHERE created > NOW() - INTERVAL {} MONTH";
    /// let rendered = QueryTemplateService::render(sql, Some("4")).unwrap();
    /// assert!(rendered.ends_with("INTERVAL 4 MONTH"));
    /// ```
    pub fn render(template: &str, modifier: Option<&str>) -> Result<String, TemplateError> {
        let modifier = match modifier {
            Some(m) if !m.is_empty() => m,
            _ => return Ok(template.to_string()),
        };

        let mut out = String::with_capacity(template.len() + modifier.len());
        let mut chars = template.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            match c {
                '{' => {
                    if chars.next_if(|&(_, next)| next == '{').is_some() {
                        out.push('{');
                        continue;
                    }

                    let mut field = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, '{')) | None => {
                                return Err(TemplateError::UnclosedBrace { position })
                            }
                            Some((_, ch)) => field.push(ch),
                        }
                    }

                    match field.as_str() {
                        "" | "0" => out.push_str(modifier),
                        other => {
                            return Err(TemplateError::UnknownField {
                                field: other.to_string(),
                                position,
                            })
                        }
                    }
                }
                '}' => {
                    if chars.next_if(|&(_, next)| next == '}').is_some() {
                        out.push('}');
                    } else {
                        return Err(TemplateError::UnmatchedClosingBrace { position });
                    }
                }
                _ => out.push(c),
            }
        }

        Ok(out)
    }

    /// コースクエリに渡す月数
    pub fn months_modifier(number_of_months: u32) -> String {
        number_of_months.to_string()
    }

    /// 取得クエリに渡すコースIDリスト（カンマ区切り、引用符なし）
    pub fn course_id_list(courses: &[Course]) -> String {
        courses
            .iter()
            .map(|c| c.id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}
