//! towr trajectory file reader
//!
//! A trajectory file is comma-separated text with one header line naming the
//! columns, followed by one data row per sample. The relative-time column of
//! the second data row gives the sampling interval in nanoseconds. See
//! [`layout`] for the column layout of a row.

mod error;
pub mod layout;
mod sample;

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub use error::{LoadError, ParseError};
pub use layout::EffectorLayout;
pub use sample::TrajectorySample;

use layout::{NANOS_PER_SECOND, TIMESTEP_COLUMN};

/// A trajectory needs at least this many data rows to be played back.
pub const MIN_DATA_ROWS: usize = 3;

/// Index (among data rows) of the row whose relative time is the timestep.
const TIMESTEP_ROW: usize = 1;

/// A fully parsed trajectory file.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryFile {
    /// Column names from the header line
    pub columns: Vec<String>,
    /// Samples in file order
    pub samples: Vec<TrajectorySample>,
    /// Seconds between two consecutive samples
    pub timestep: f64,
}

impl TrajectoryFile {
    /// Parse a trajectory file from a path
    pub fn parse<P: AsRef<Path>>(path: P, layout: EffectorLayout) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| LoadError::ResourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse_reader(BufReader::new(file), layout)
    }

    /// Parse a trajectory file from a reader
    pub fn parse_reader<R: BufRead>(reader: R, layout: EffectorLayout) -> Result<Self, LoadError> {
        let mut lines = reader.lines();

        // First line is the header
        let header = lines
            .next()
            .ok_or_else(|| LoadError::MalformedFile("file is empty".to_string()))??;
        let columns = split_row(&header).map(str::to_string).collect();

        let mut samples: Vec<TrajectorySample> = Vec::new();
        let mut timestep = None;

        for (line_num, line) in lines.enumerate() {
            let line = line?;
            let row = line_num + 1;

            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = split_row(&line).collect();

            if samples.len() == TIMESTEP_ROW {
                timestep = Some(parse_timestep(&fields, row)?);
            }

            let sample = TrajectorySample::parse(&fields, row, layout)?;
            if let Some(first) = samples.first() {
                if first.effector_count() != sample.effector_count() {
                    return Err(ParseError::EffectorCountMismatch {
                        row,
                        expected: first.effector_count(),
                        found: sample.effector_count(),
                    }
                    .into());
                }
            }
            samples.push(sample);
        }

        if samples.len() < MIN_DATA_ROWS {
            return Err(LoadError::MalformedFile(format!(
                "expected at least {} data rows, found {}",
                MIN_DATA_ROWS,
                samples.len()
            )));
        }

        // The row count check above guarantees the timestep row was seen
        let timestep = timestep.ok_or_else(|| {
            LoadError::MalformedFile("missing timestep row".to_string())
        })?;

        Ok(Self {
            columns,
            samples,
            timestep,
        })
    }

    /// Parse from a string
    pub fn parse_str(content: &str, layout: EffectorLayout) -> Result<Self, LoadError> {
        Self::parse_reader(BufReader::new(content.as_bytes()), layout)
    }

    /// Number of end effectors per sample
    pub fn effector_count(&self) -> usize {
        self.samples.first().map_or(0, TrajectorySample::effector_count)
    }

    /// Time covered from the first to the last sample, in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len().saturating_sub(1) as f64 * self.timestep
    }
}

fn split_row(line: &str) -> impl Iterator<Item = &str> {
    line.strip_suffix('\r').unwrap_or(line).split(',')
}

fn parse_timestep(fields: &[&str], row: usize) -> Result<f64, LoadError> {
    let token = fields.get(TIMESTEP_COLUMN).copied().unwrap_or_default();
    let nanos: f64 = token.trim().parse().map_err(|_| ParseError::InvalidNumber {
        row,
        column: TIMESTEP_COLUMN,
        token: token.to_string(),
    })?;

    let timestep = nanos / NANOS_PER_SECOND;
    if !timestep.is_finite() || timestep <= 0.0 {
        return Err(LoadError::MalformedFile(format!(
            "row {}: timestep must be positive, got {} ns",
            row, token
        )));
    }

    Ok(timestep)
}
