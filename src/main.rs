//! Course Ranker - Survey Course Ranking Chart Generator
//!
//! Reads the course ranking question from a survey export, prints the mean
//! rank per course and saves the ordering as a bar chart.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use course_ranker::{PipelineReport, RankerError, RankingPipeline, SourceFormat, SurveyConfig};

#[derive(Parser, Debug)]
#[command(name = "course_ranker")]
#[command(version)]
#[command(about = "Rank courses by their average survey rank and chart the result")]
struct Args {
    /// Survey export to read (defaults to data/survey_data.xlsx)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Input format; detected from the file extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Directory the chart is written to (defaults to outputs)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Chart file name (defaults to rank_order.png)
    #[arg(long)]
    output_file: Option<String>,

    /// JSON file overriding the built-in configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Draw the chart without x-axis gridlines
    #[arg(long)]
    no_grid: bool,
}

/// Same names as the `format` field of the JSON config.
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum FormatArg {
    Csv,
    Tsv,
    #[value(alias = "xlsx")]
    Spreadsheet,
}

impl From<FormatArg> for SourceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => SourceFormat::Csv,
            FormatArg::Tsv => SourceFormat::Tsv,
            FormatArg::Spreadsheet => SourceFormat::Spreadsheet,
        }
    }
}

fn build_config(args: Args) -> anyhow::Result<SurveyConfig> {
    let mut config = match &args.config {
        Some(path) => SurveyConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SurveyConfig::default(),
    };

    if let Some(input) = args.input {
        config.input_path = input;
    }
    if let Some(format) = args.format {
        config.format = Some(format.into());
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(file) = args.output_file {
        config.output_file = file;
    }
    if args.no_grid {
        config.chart.x_gridlines = false;
    }

    Ok(config)
}

fn run(args: Args) -> anyhow::Result<PipelineReport> {
    let config = build_config(args)?;
    tracing::info!(
        "Analyzing {} ({} ranking questions)",
        config.input_path.display(),
        config.course_mapping.len()
    );

    let report = RankingPipeline::new(config).run()?;
    Ok(report)
}

/// Single stderr line naming the failed stage.
fn diagnostic(err: &anyhow::Error) -> String {
    let checkpoint = err
        .downcast_ref::<RankerError>()
        .map(RankerError::checkpoint)
        .unwrap_or("error");
    format!("ERROR [{}]: {:#}", checkpoint, err)
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the ranking
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_ranker=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(report) => {
            print!("{}", report.summary);
            println!("Chart saved to {}", report.chart_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", diagnostic(&err));
            ExitCode::FAILURE
        }
    }
}
