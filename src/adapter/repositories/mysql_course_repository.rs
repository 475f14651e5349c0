//! MySQL Course Repository Implementation
//!
//! CourseRepositoryのMySQL実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{Column, Executor};

use crate::adapter::mysql::rows::{column_names, courses_from_cells, text_cells};
use crate::domain::entities::course::Course;
use crate::domain::entities::course_data::CourseDataTable;
use crate::domain::repositories::course_repository::CourseRepository;

/// MySQLコースリポジトリ
pub struct MySqlCourseRepository {
    pool: MySqlPool,
}

impl MySqlCourseRepository {
    /// 新しいリポジトリを作成
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// テキストプロトコルでクエリを実行し、行を返す
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<MySqlRow>> {
        let rows = sqlx::raw_sql(sql).fetch_all(&self.pool).await?;
        debug!("Query returned {} rows", rows.len());
        Ok(rows)
    }

    /// 結果が0行のときは列名を得るためにステートメントを記述する
    ///
    /// # Errors
    ///
    /// 記述に失敗した場合
    async fn describe_columns(&self, sql: &str) -> Result<Vec<String>> {
        let describe = (&self.pool)
            .describe(sql)
            .await
            .context("Could not describe empty Course Data result for its column names")?;

        Ok(describe
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect())
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl CourseRepository for MySqlCourseRepository {
    async fn fetch_courses(&self, sql: &str) -> Result<Vec<Course>> {
        let rows = self
            .fetch_rows(sql)
            .await
            .context("Failed to retrieve Course List")?;
        let cells = rows.iter().map(text_cells).collect::<Result<Vec<_>>>()?;
        courses_from_cells(cells)
    }

    async fn fetch_course_data(&self, sql: &str) -> Result<CourseDataTable> {
        let rows = self
            .fetch_rows(sql)
            .await
            .context("Failed to retrieve Course Data")?;

        let columns = match rows.first() {
            Some(row) => column_names(row),
            None => self.describe_columns(sql).await?,
        };
        let cells = rows.iter().map(text_cells).collect::<Result<Vec<_>>>()?;

        Ok(CourseDataTable::new(columns, cells)?)
    }
}
