//! Header and 2-D parity validation.
//!
//! Each payload row and column carries an even-parity bit in the last column
//! and row respectively, and the corner cell must be 0. Parity is computed
//! with the truncating remainder, so a negative sum yields a negative parity
//! that only matches an equally negative cell.

use thiserror::Error;

use crate::frame::{DataMatrix, Header};
use crate::sequence::layout::{
    CORNER_EXPECTED, HEADER_MARKER, PARITY_COLUMN, PARITY_ROW, PAYLOAD_DIM,
};

/// How much of the parity matrix takes part in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParityCheck {
    /// Every payload row and column must match its parity bit.
    #[default]
    Full,
    /// Only row 0 and column 0 are checked, matching the legacy decoder.
    FirstPairOnly,
}

/// First reason a record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("header is not all ones")]
    Header,
    #[error("parity corner is {value}, expected 0")]
    Corner { value: i32 },
    #[error("row {row} parity mismatch")]
    RowParity { row: usize },
    #[error("column {column} parity mismatch")]
    ColumnParity { column: usize },
}

/// Outcome of every individual check over one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub header: bool,
    pub corner: bool,
    pub rows: [bool; PAYLOAD_DIM],
    pub columns: [bool; PAYLOAD_DIM],
    corner_value: i32,
}

impl Verdict {
    pub fn is_valid(&self, mode: ParityCheck) -> bool {
        self.failure(mode).is_none()
    }

    pub fn failure(&self, mode: ParityCheck) -> Option<ValidationFailure> {
        if !self.header {
            return Some(ValidationFailure::Header);
        }
        if !self.corner {
            return Some(ValidationFailure::Corner {
                value: self.corner_value,
            });
        }
        let checked = match mode {
            ParityCheck::Full => PAYLOAD_DIM,
            ParityCheck::FirstPairOnly => 1,
        };
        for index in 0..checked {
            if !self.rows[index] {
                return Some(ValidationFailure::RowParity { row: index });
            }
            if !self.columns[index] {
                return Some(ValidationFailure::ColumnParity { column: index });
            }
        }
        None
    }
}

pub fn validate(header: &Header, matrix: &DataMatrix) -> Verdict {
    Verdict {
        header: validate_header(header),
        corner: matrix.corner() == CORNER_EXPECTED,
        rows: std::array::from_fn(|row| row_parity_ok(matrix, row)),
        columns: std::array::from_fn(|column| column_parity_ok(matrix, column)),
        corner_value: matrix.corner(),
    }
}

pub fn validate_header(header: &Header) -> bool {
    header.values().iter().all(|value| *value == HEADER_MARKER)
}

pub fn row_parity_ok(matrix: &DataMatrix, row: usize) -> bool {
    let sum: i64 = (0..PAYLOAD_DIM)
        .map(|column| i64::from(matrix.cell(row, column)))
        .sum();
    sum % 2 == i64::from(matrix.cell(row, PARITY_COLUMN))
}

pub fn column_parity_ok(matrix: &DataMatrix, column: usize) -> bool {
    let sum: i64 = (0..PAYLOAD_DIM)
        .map(|row| i64::from(matrix.cell(row, column)))
        .sum();
    sum % 2 == i64::from(matrix.cell(PARITY_ROW, column))
}
