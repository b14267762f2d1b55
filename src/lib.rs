//! Course Ranker - survey course ranking analysis
//!
//! Loads a survey export, averages the course ranking question per course and
//! renders the ordering as a bar chart.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod stats;

pub use config::{ChartStyle, CourseMapping, SurveyConfig};
pub use data::SourceFormat;
pub use error::{RankerError, Result};
pub use pipeline::{PipelineReport, RankingPipeline};
pub use stats::{CourseRank, RankingSummary};
