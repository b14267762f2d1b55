//! Data Processor Module
//! Selects the ranking columns and reshapes them to long format (melt).

use crate::config::CourseMapping;
use crate::error::{RankerError, Result};
use polars::prelude::*;
use tracing::debug;

/// Column names of the long table.
pub const COURSE_COL: &str = "Course";
pub const RANK_COL: &str = "Rank";

/// How many available column names a schema-mismatch error shows.
const AVAILABLE_SAMPLE: usize = 10;

/// Handles column selection and the wide-to-long transform.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep only the mapped question columns, renamed to course labels.
    ///
    /// Fails with the full list of absent question codes if any is missing.
    pub fn select_courses(df: &DataFrame, mapping: &[CourseMapping]) -> Result<DataFrame> {
        let available: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<String> = mapping
            .iter()
            .filter(|m| !available.contains(&m.question_code))
            .map(|m| m.question_code.clone())
            .collect();

        if !missing.is_empty() {
            return Err(RankerError::MissingColumns {
                missing,
                available: available.into_iter().take(AVAILABLE_SAMPLE).collect(),
            });
        }

        let mut selected = df.select(mapping.iter().map(|m| m.question_code.as_str()))?;
        for m in mapping {
            selected.rename(&m.question_code, m.course.as_str().into())?;
        }

        debug!(columns = selected.width(), "selected course columns");
        Ok(selected)
    }

    /// Transform the course columns to long format (stack operation).
    ///
    /// Output columns: ["Course", "Rank"]. Blank cells are dropped; every
    /// remaining cell must parse as a finite number.
    pub fn stack_to_long(df: &DataFrame) -> Result<DataFrame> {
        let mut courses: Vec<String> = Vec::new();
        let mut ranks: Vec<f64> = Vec::new();

        for column in df.get_columns() {
            let course = column.name().to_string();
            let text = column.cast(&DataType::String)?;

            for (row, cell) in text.str()?.into_iter().enumerate() {
                let Some(raw) = cell.map(str::trim).filter(|s| !s.is_empty()) else {
                    continue;
                };

                let rank = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| RankerError::RankCoercion {
                        course: course.clone(),
                        row: row + 1,
                        value: raw.to_string(),
                    })?;

                courses.push(course.clone());
                ranks.push(rank);
            }
        }

        debug!(observations = ranks.len(), "stacked rankings to long format");

        let df = DataFrame::new(vec![
            Column::new(COURSE_COL.into(), courses),
            Column::new(RANK_COL.into(), ranks),
        ])?;

        Ok(df)
    }
}
