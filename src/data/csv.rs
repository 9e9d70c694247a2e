//! CSV loading for training and validation sets.
//!
//! Format:
//! - comma-separated integers, one example per line, no header
//! - column 0 is the integer class label, the remaining columns are binary
//!   features (0 or 1)
//! - blank lines are skipped; every row must have the same width

use std::path::Path;

use log::debug;

use crate::data::dataset::Dataset;
use crate::error::{NnError, Result};
use crate::math::matrix::Matrix;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parses CSV text into a `Dataset`.
pub fn parse_csv(text: &str, num_classes: usize) -> Result<Dataset> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<usize> = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row_num = line_idx + 1;

        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.len() < 2 {
            return Err(NnError::Parse(format!(
                "Row {}: expected a label and at least one feature, got {} column(s)",
                row_num,
                cells.len()
            )));
        }

        let label = parse_label(cells[0], row_num, num_classes)?;
        let feats = parse_features(&cells[1..], row_num)?;

        if let Some(first) = rows.first() {
            if feats.len() != first.len() {
                return Err(NnError::Parse(format!(
                    "Row {}: feature count {} does not match first row's {}",
                    row_num,
                    feats.len(),
                    first.len()
                )));
            }
        }

        labels.push(label);
        rows.push(feats);
    }

    if rows.is_empty() {
        return Err(NnError::Parse("CSV contains no data rows".into()));
    }

    let cols = rows[0].len();
    Dataset::new(Matrix::from_rows(rows, cols), labels, num_classes)
}

/// Reads and parses a CSV file.
pub fn load_csv<P: AsRef<Path>>(path: P, num_classes: usize) -> Result<Dataset> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let ds = parse_csv(&text, num_classes)?;
    debug!(
        "loaded {} examples with {} features from {}",
        ds.len(),
        ds.num_features(),
        path.display()
    );
    Ok(ds)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn parse_label(cell: &str, row_num: usize, num_classes: usize) -> Result<usize> {
    let label: usize = cell.parse().map_err(|_| {
        NnError::Parse(format!(
            "Row {}: label '{}' is not a non-negative integer",
            row_num, cell
        ))
    })?;
    if label >= num_classes {
        return Err(NnError::Parse(format!(
            "Row {}: label {} >= number of classes {}",
            row_num, label, num_classes
        )));
    }
    Ok(label)
}

fn parse_features(cells: &[&str], row_num: usize) -> Result<Vec<f64>> {
    cells.iter()
        .map(|c| match c.parse::<i64>() {
            Ok(0) => Ok(0.0),
            Ok(1) => Ok(1.0),
            Ok(v) => Err(NnError::Parse(format!(
                "Row {}: feature {} is not binary (0 or 1)",
                row_num, v
            ))),
            Err(_) => Err(NnError::Parse(format!(
                "Row {}: '{}' is not an integer",
                row_num, c
            ))),
        })
        .collect()
}
