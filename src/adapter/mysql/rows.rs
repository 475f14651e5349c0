//! MySQL Row Conversion
//!
//! Queries run over the text protocol, so every cell is read as its textual
//! representation regardless of the column type.

use anyhow::{bail, Context, Result};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row};

use crate::domain::entities::course::Course;

/// Column names in result order.
pub fn column_names(row: &MySqlRow) -> Vec<String> {
    row.columns().iter().map(|c| c.name().to_string()).collect()
}

/// Reads every cell as text. Non UTF-8 bytes are replaced.
pub fn text_cells(row: &MySqlRow) -> Result<Vec<Option<String>>> {
    (0..row.len())
        .map(|i| {
            row.try_get_unchecked::<Option<Vec<u8>>, _>(i)
                .map(|bytes| bytes.map(|b| String::from_utf8_lossy(&b).into_owned()))
                .with_context(|| format!("Failed to read column {}", i))
        })
        .collect()
}

/// Maps course query rows. Each row must be exactly `(id, name)`.
pub fn courses_from_cells(rows: Vec<Vec<Option<String>>>) -> Result<Vec<Course>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, cells)| {
            if cells.len() != 2 {
                bail!(
                    "Course query row {} has {} column(s); expected exactly id and name",
                    index,
                    cells.len()
                );
            }
            let mut cells = cells.into_iter();
            let id = cells.next().flatten().unwrap_or_default();
            let name = cells.next().flatten().unwrap_or_default();
            Ok(Course::new(id, name))
        })
        .collect()
}
