//! Statistics Calculator Module
//! Computes the mean rank per course and orders courses by preference.

use crate::data::{COURSE_COL, RANK_COL};
use crate::error::Result;
use polars::prelude::*;
use std::fmt;

/// Mean rank of one course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRank {
    pub course: String,
    pub mean_rank: f64,
    pub responses: usize,
}

/// Courses ordered by ascending mean rank (lower is more preferred).
///
/// Courses with identical means are ordered by course label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingSummary {
    entries: Vec<CourseRank>,
}

impl RankingSummary {
    /// Build a summary from unordered entries, applying the ranking order.
    pub fn from_entries(mut entries: Vec<CourseRank>) -> Self {
        entries.sort_by(|a, b| {
            a.mean_rank
                .total_cmp(&b.mean_rank)
                .then_with(|| a.course.cmp(&b.course))
        });
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CourseRank> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[CourseRank] {
        &self.entries
    }

    pub fn get(&self, course: &str) -> Option<&CourseRank> {
        self.entries.iter().find(|e| e.course == course)
    }

    /// Course labels in ranking order.
    pub fn courses(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.course.as_str()).collect()
    }

    pub fn max_mean(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.mean_rank).reduce(f64::max)
    }
}

impl<'a> IntoIterator for &'a RankingSummary {
    type Item = &'a CourseRank;
    type IntoIter = std::slice::Iter<'a, CourseRank>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for RankingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rank Order (Lower is Better):")?;
        let width = self
            .entries
            .iter()
            .map(|e| e.course.chars().count())
            .max()
            .unwrap_or(0);
        for e in &self.entries {
            writeln!(
                f,
                "{:<width$}  {:>7.4}  (n={})",
                e.course,
                e.mean_rank,
                e.responses,
                width = width
            )?;
        }
        Ok(())
    }
}

/// Handles the group-by/mean aggregation over the long table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Mean rank per course, sorted ascending.
    pub fn rank_courses(long_df: &DataFrame) -> Result<RankingSummary> {
        let grouped = long_df
            .clone()
            .lazy()
            .group_by([col(COURSE_COL)])
            .agg([
                col(RANK_COL).mean().alias("mean_rank"),
                col(RANK_COL).count().alias("responses"),
            ])
            .collect()?;

        let courses = grouped.column(COURSE_COL)?.str()?;
        let means = grouped.column("mean_rank")?.f64()?;
        let counts = grouped.column("responses")?.cast(&DataType::UInt64)?;
        let counts = counts.u64()?;

        let entries = courses
            .into_iter()
            .zip(means)
            .zip(counts)
            .filter_map(|((course, mean), count)| {
                Some(CourseRank {
                    course: course?.to_string(),
                    mean_rank: mean?,
                    responses: count.unwrap_or(0) as usize,
                })
            })
            .collect();

        Ok(RankingSummary::from_entries(entries))
    }
}
