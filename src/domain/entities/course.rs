//! # Course Entity
//!
//! コースクエリが返すコースのエンティティ

/// コース
///
/// コースクエリの1行（1列目がID、2列目が名前）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// コースID（クエリ結果のテキスト表現）
    pub id: String,
    /// コース名
    pub name: String,
}

impl Course {
    /// 新しいコースを作成
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// バケットに保存するオブジェクト名を返します。
    ///
    /// # 例
    ///
    /// ```
    /// use mpr_export::domain::entities::course::Course;
    ///
    /// let course = Course::new("1234", "Intro to Statistics");
    /// assert_eq!(course.output_filename(), "1234 - Intro to Statistics.tsv");
    /// ```
    pub fn output_filename(&self) -> String {
        format!("{} - {}.tsv", self.id, self.name)
    }
}
