//! Stats module - Course ranking aggregation

mod calculator;

pub use calculator::{CourseRank, RankingSummary, StatsCalculator};
