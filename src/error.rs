//! Error types shared by every pipeline stage.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Contents of the directory that was expected to hold the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryListing {
    Entries { dir: PathBuf, names: Vec<String> },
    DirectoryMissing(PathBuf),
}

impl fmt::Display for DirectoryListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryListing::Entries { dir, names } => {
                write!(f, "files in '{}' directory: {:?}", dir.display(), names)
            }
            DirectoryListing::DirectoryMissing(dir) => {
                write!(f, "'{}' directory missing", dir.display())
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum RankerError {
    #[error("the file '{}' was not found; {listing}", path.display())]
    MissingInput {
        path: PathBuf,
        listing: DirectoryListing,
    },

    #[error("failed to read '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported input format for '{}' (expected csv, tsv, txt, xlsx, xlsm, xlsb, xls or ods)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("could not find columns: {missing:?}; columns found in file: {available:?}")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("rank value {value:?} for course '{course}' (respondent row {row}) is not numeric")]
    RankCoercion {
        course: String,
        row: usize,
        value: String,
    },

    #[error("failed to render chart: {0}")]
    Render(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, RankerError>;

impl RankerError {
    /// Short name of the pipeline checkpoint that failed.
    pub fn checkpoint(&self) -> &'static str {
        match self {
            RankerError::MissingInput { .. } => "missing-input",
            RankerError::Parse { .. } | RankerError::UnsupportedFormat { .. } => "parse-failure",
            RankerError::MissingColumns { .. } => "schema-mismatch",
            RankerError::RankCoercion { .. } => "value-coercion-failure",
            RankerError::Render(_) => "render",
            RankerError::Config(_) => "config",
            RankerError::Io(_) => "io",
            RankerError::Polars(_) => "dataframe",
        }
    }
}
