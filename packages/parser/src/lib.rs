#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Parser for the home sales CSV dataset.
//!
//! The dataset is a header row followed by 21 positional columns per row
//! (see [`COLUMNS`]). Quoted fields are supported. Each valid row becomes a
//! [`PropertyRecord`] with its derived fields computed once.
//!
//! A malformed row never aborts a load: it is skipped and recorded in
//! [`ParseReport::skipped`] so callers can surface an "N rows skipped"
//! signal. Only failures that prevent reading the input at all are returned
//! as [`ParseError`].

pub mod fields;

use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};

use house_insights_property_models::PropertyRecord;
use serde::Serialize;
use thiserror::Error;

pub use fields::parse_row;

/// Column names in dataset order.
pub const COLUMNS: [&str; 21] = [
    "id",
    "date",
    "price",
    "bedrooms",
    "bathrooms",
    "sqft_living",
    "sqft_lot",
    "floors",
    "waterfront",
    "view",
    "condition",
    "grade",
    "sqft_above",
    "sqft_basement",
    "yr_built",
    "yr_renovated",
    "zipcode",
    "lat",
    "long",
    "sqft_living15",
    "sqft_lot15",
];

/// Errors that abort an entire parse.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The dataset file could not be opened.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The header row could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input has no header row.
    #[error("CSV input contains no header row")]
    MissingHeader,
}

/// Why a single row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowError {
    /// The row does not have exactly [`COLUMNS`]`.len()` fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Required number of fields.
        expected: usize,
        /// Number of fields present.
        found: usize,
    },

    /// A required field is empty or not a valid number.
    #[error("invalid value for {column}: {value:?}")]
    InvalidField {
        /// Column name.
        column: &'static str,
        /// Raw field text.
        value: String,
    },

    /// The sale date is not a valid `YYYYMMDD` date.
    #[error("invalid date {value:?}: expected YYYYMMDD")]
    InvalidDate {
        /// Raw field text.
        value: String,
    },

    /// The CSV reader could not decode the row (e.g. invalid UTF-8).
    #[error("unreadable row: {message}")]
    Unreadable {
        /// Reader error description.
        message: String,
    },
}

/// A rejected row and the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    /// 1-based line number in the input, when known.
    pub line: Option<u64>,
    /// Why the row was rejected.
    pub error: RowError,
}

/// Result of a completed parse.
#[derive(Debug, Clone)]
pub struct ParseReport {
    /// Parsed records in file order.
    pub records: Vec<PropertyRecord>,
    /// Rows that were rejected, in file order.
    pub skipped: Vec<SkippedRow>,
    /// How long the parse took.
    pub duration: Duration,
}

impl ParseReport {
    /// Number of rows that were rejected.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Whether every data row parsed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Parses CSV text held in memory.
///
/// # Errors
///
/// Returns [`ParseError`] if the input has no header row.
pub fn parse_csv(text: &str) -> Result<ParseReport, ParseError> {
    parse_reader(text.as_bytes())
}

/// Parses a dataset file from disk.
///
/// # Errors
///
/// Returns [`ParseError`] if the file cannot be opened or has no header row.
pub fn parse_file(path: &Path) -> Result<ParseReport, ParseError> {
    log::info!("Loading dataset from {}", path.display());

    let file = std::fs::File::open(path).map_err(|e| ParseError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_reader(std::io::BufReader::new(file))
}

/// Parses CSV records from any `Read` source.
///
/// # Errors
///
/// Returns [`ParseError`] if the header row cannot be read or is missing.
pub fn parse_reader(reader: impl Read) -> Result<ParseReport, ParseError> {
    let start = Instant::now();

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?;
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(ParseError::MissingHeader);
    }
    if headers.len() != COLUMNS.len() {
        log::warn!(
            "Header has {} columns, expected {}; reading columns positionally",
            headers.len(),
            COLUMNS.len()
        );
    }

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for result in csv_reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                let line = e.position().map(csv::Position::line);
                log::trace!("  skipping unreadable row at line {line:?}: {e}");
                skipped.push(SkippedRow {
                    line,
                    error: RowError::Unreadable {
                        message: e.to_string(),
                    },
                });
                continue;
            }
        };

        let line = row.position().map(csv::Position::line);
        match parse_row(&row) {
            Ok(sale) => records.push(PropertyRecord::new(sale)),
            Err(error) => {
                log::trace!("  skipping malformed row at line {line:?}: {error}");
                skipped.push(SkippedRow { line, error });
            }
        }
    }

    let duration = start.elapsed();

    if !skipped.is_empty() {
        log::warn!("{} malformed row(s) skipped", skipped.len());
    }
    log::info!(
        "Parsed {} records in {:.1}ms",
        records.len(),
        duration.as_secs_f64() * 1000.0
    );

    Ok(ParseReport {
        records,
        skipped,
        duration,
    })
}
