//! Structural split of a sequence into header and parity matrix.

use serde::Serialize;

use crate::sequence::RawSequence;
use crate::sequence::layout::{COLUMNS, HEADER_LEN, PARITY_COLUMN, PARITY_ROW, ROWS};

/// The fixed prefix of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Header([i32; HEADER_LEN]);

impl Header {
    pub const fn new(values: [i32; HEADER_LEN]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[i32; HEADER_LEN] {
        &self.0
    }
}

/// 5×5 grid: payload in rows/columns 0..4, parity in the last row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct DataMatrix([[i32; COLUMNS]; ROWS]);

impl DataMatrix {
    pub const fn new(cells: [[i32; COLUMNS]; ROWS]) -> Self {
        Self(cells)
    }

    pub fn cell(&self, row: usize, column: usize) -> i32 {
        self.0[row][column]
    }

    pub fn rows(&self) -> &[[i32; COLUMNS]; ROWS] {
        &self.0
    }

    pub fn corner(&self) -> i32 {
        self.0[PARITY_ROW][PARITY_COLUMN]
    }
}

/// Header and matrix decoded from one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub header: Header,
    pub matrix: DataMatrix,
}

pub fn decode_frame(sequence: &RawSequence) -> Frame {
    let mut header = [0i32; HEADER_LEN];
    header.copy_from_slice(sequence.header_slice());

    let mut cells = [[0i32; COLUMNS]; ROWS];
    for (offset, value) in sequence.data_slice().iter().enumerate() {
        cells[offset / COLUMNS][offset % COLUMNS] = *value;
    }

    Frame {
        header: Header::new(header),
        matrix: DataMatrix::new(cells),
    }
}
