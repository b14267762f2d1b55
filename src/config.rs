//! Run configuration.
//! Everything the pipeline used to read from fixed constants lives here so
//! tests can inject their own paths and question mappings.

use crate::data::SourceFormat;
use crate::error::{RankerError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "data/survey_data.xlsx";
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
pub const DEFAULT_OUTPUT_FILE: &str = "rank_order.png";

/// One survey question and the course label it is reported under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseMapping {
    pub question_code: String,
    pub course: String,
}

impl CourseMapping {
    pub fn new(question_code: &str, course: &str) -> Self {
        Self {
            question_code: question_code.to_string(),
            course: course.to_string(),
        }
    }
}

/// The MAcc core-course ranking question (Q35) and its eight sub-items.
pub fn default_course_mapping() -> Vec<CourseMapping> {
    [
        ("Q35_1", "ACC 6060: Pro. & Leadership"),
        ("Q35_5", "ACC 6300: Data Analytics"),
        ("Q35_2", "ACC 6400: Adv. Tax Entities"),
        ("Q35_4", "ACC 6510: Financial Audit"),
        ("Q35_3", "ACC 6540: Pro. Ethics"),
        ("Q35_8", "ACC 6560: Fin. Theory I"),
        ("Q35_9", "ACC 6350: Mgmt Control Sys"),
        ("Q35_10", "ACC 6600: Business Law"),
    ]
    .iter()
    .map(|(code, course)| CourseMapping::new(code, course))
    .collect()
}

/// Chart appearance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub width: u32,
    pub height: u32,
    pub x_gridlines: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "MAcc Core Course Student Rankings".to_string(),
            x_label: "Average Rank (1 = Most Beneficial)".to_string(),
            width: 1000,
            height: 600,
            x_gridlines: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    pub input_path: PathBuf,
    /// Overrides extension-based format detection when set.
    pub format: Option<SourceFormat>,
    pub header_rows_to_skip: usize,
    pub output_dir: PathBuf,
    pub output_file: String,
    pub course_mapping: Vec<CourseMapping>,
    pub chart: ChartStyle,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            format: None,
            header_rows_to_skip: 2,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            course_mapping: default_course_mapping(),
            chart: ChartStyle::default(),
        }
    }
}

impl SurveyConfig {
    /// Load a JSON override file. Fields left out keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            RankerError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let config: SurveyConfig = serde_json::from_str(&text).map_err(|e| {
            RankerError::Config(format!("invalid config '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.course_mapping.is_empty() {
            return Err(RankerError::Config("course_mapping is empty".to_string()));
        }
        let mut codes = HashSet::new();
        let mut courses = HashSet::new();
        for m in &self.course_mapping {
            if !codes.insert(m.question_code.as_str()) {
                return Err(RankerError::Config(format!(
                    "question code '{}' is mapped twice",
                    m.question_code
                )));
            }
            if !courses.insert(m.course.as_str()) {
                return Err(RankerError::Config(format!(
                    "course '{}' is mapped twice",
                    m.course
                )));
            }
        }
        if self.output_file.trim().is_empty() {
            return Err(RankerError::Config("output_file is empty".to_string()));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(RankerError::Config(
                "chart width and height must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    pub fn resolved_format(&self) -> Result<SourceFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => SourceFormat::from_path(&self.input_path),
        }
    }
}
