//! Survey Data Loader Module
//! Loads a survey export (delimited text or spreadsheet) into a Polars
//! DataFrame whose columns are the question codes from the first header row.

use crate::error::{DirectoryListing, RankerError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Tabular input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Comma separated text
    Csv,
    /// Tab separated text
    Tsv,
    /// First sheet of a workbook (xlsx, xlsm, xlsb, xls, ods)
    Spreadsheet,
}

impl SourceFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "txt" => Ok(SourceFormat::Csv),
            "tsv" => Ok(SourceFormat::Tsv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Spreadsheet),
            _ => Err(RankerError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn separator(self) -> u8 {
        match self {
            SourceFormat::Tsv => b'\t',
            _ => b',',
        }
    }
}

/// Loads survey exports. Every column comes back as text so that numeric
/// coercion happens in one place, after blanks have been dropped.
pub struct DataLoader;

impl DataLoader {
    /// Load `path`, dropping `skip_rows` rows that follow the header row.
    ///
    /// The file must exist before any parsing is attempted.
    pub fn load(path: &Path, format: SourceFormat, skip_rows: usize) -> Result<DataFrame> {
        ensure_exists(path)?;

        let df = match format {
            SourceFormat::Csv | SourceFormat::Tsv => {
                Self::read_delimited(path, format.separator(), skip_rows)
            }
            SourceFormat::Spreadsheet => Self::read_spreadsheet(path, skip_rows),
        }?;

        info!(
            path = %path.display(),
            ?format,
            rows = df.height(),
            columns = df.width(),
            "loaded survey data"
        );

        Ok(df)
    }

    fn read_delimited(path: &Path, separator: u8, skip_rows: usize) -> Result<DataFrame> {
        let parse_err = |e: PolarsError| RankerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        // Schema inference over zero rows reads every column as String.
        LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(separator)
            .with_skip_rows_after_header(skip_rows)
            .with_infer_schema_length(Some(0))
            .finish()
            .map_err(parse_err)?
            .collect()
            .map_err(parse_err)
    }

    fn read_spreadsheet(path: &Path, skip_rows: usize) -> Result<DataFrame> {
        let parse_err = |message: String| RankerError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let mut workbook = open_workbook_auto(path).map_err(|e| parse_err(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| parse_err("workbook contains no sheets".to_string()))?
            .map_err(|e| parse_err(e.to_string()))?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| parse_err("first sheet is empty".to_string()))?;

        let headers = dedup_headers(header_row.iter().enumerate().map(|(idx, cell)| {
            cell_to_text(cell).unwrap_or_else(|| format!("column_{}", idx + 1))
        }));

        let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for row in rows.skip(skip_rows) {
            for (idx, column) in values.iter_mut().enumerate() {
                column.push(row.get(idx).and_then(cell_to_text));
            }
        }
        debug!(sheet_rows = range.height(), "read first worksheet");

        let columns: Vec<Column> = headers
            .iter()
            .zip(values)
            .map(|(name, vals)| Column::new(name.as_str().into(), vals))
            .collect();

        DataFrame::new(columns).map_err(|e| parse_err(e.to_string()))
    }
}

/// Repeated header names get a `_duplicated_{n}` suffix, the same names the
/// CSV reader assigns, so both formats expose identical columns.
fn dedup_headers(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    names
        .map(|name| {
            let count = counts.entry(name.clone()).or_insert(0);
            let out = if *count == 0 {
                name
            } else {
                format!("{}_duplicated_{}", name, *count - 1)
            };
            *count += 1;
            out
        })
        .collect()
}

/// Spreadsheet cell as text; `None` for blanks.
fn cell_to_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        // f64 Display drops the trailing ".0" on whole numbers
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Error(e) => format!("#{:?}", e),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        return Ok(());
    }

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let listing = match std::fs::read_dir(&dir) {
        Ok(entries) => {
            let mut names: Vec<String> = entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect();
            names.sort();
            DirectoryListing::Entries { dir, names }
        }
        Err(_) => DirectoryListing::DirectoryMissing(dir),
    };

    Err(RankerError::MissingInput {
        path: path.to_path_buf(),
        listing,
    })
}
