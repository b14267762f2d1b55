//! End-to-end ranking run: survey export in, summary and chart out.

use std::path::PathBuf;

use crate::charts::StaticChartRenderer;
use crate::config::SurveyConfig;
use crate::data::{DataLoader, DataProcessor};
use crate::error::Result;
use crate::stats::{RankingSummary, StatsCalculator};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub summary: RankingSummary,
    pub chart_path: PathBuf,
    pub rows_loaded: usize,
    pub observations: usize,
}

/// load -> select courses -> melt -> mean rank -> chart.
pub struct RankingPipeline {
    config: SurveyConfig,
}

impl RankingPipeline {
    pub fn new(config: SurveyConfig) -> Self {
        Self { config }
    }

    /// Everything up to and including the aggregation; nothing is written.
    pub fn summarize(&self) -> Result<(RankingSummary, usize, usize)> {
        let config = &self.config;
        config.validate()?;
        let format = config.resolved_format()?;

        // Step 1: Load the raw survey table
        let raw = DataLoader::load(&config.input_path, format, config.header_rows_to_skip)?;
        let rows_loaded = raw.height();

        // Step 2: Keep the ranking columns under their course names
        let selected = DataProcessor::select_courses(&raw, &config.course_mapping)?;

        // Step 3: Melt to (Course, Rank)
        let long = DataProcessor::stack_to_long(&selected)?;
        let observations = long.height();
        tracing::info!(
            "Stacked {} rank observations from {} respondents",
            observations,
            rows_loaded
        );

        // Step 4: Mean rank per course
        let summary = StatsCalculator::rank_courses(&long)?;
        for m in &config.course_mapping {
            if summary.get(&m.course).is_none() {
                tracing::warn!("No responses for {} ({})", m.course, m.question_code);
            }
        }

        Ok((summary, rows_loaded, observations))
    }

    pub fn run(&self) -> Result<PipelineReport> {
        let (summary, rows_loaded, observations) = self.summarize()?;

        // Step 5: Chart
        let chart_path = StaticChartRenderer::render_ranking(
            &summary,
            &self.config.chart,
            &self.config.output_path(),
        )?;

        Ok(PipelineReport {
            summary,
            chart_path,
            rows_loaded,
            observations,
        })
    }
}
