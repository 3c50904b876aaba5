//! Payload identifier extraction.

use crate::frame::DataMatrix;
use crate::sequence::layout::{
    COLUMNS, PARITY_COLUMN, PARITY_ROW, PAYLOAD_BITS, PAYLOAD_DIM, ROWS,
};

/// Rendered in place of an identifier that could not be computed.
pub const IDENTIFIER_SENTINEL: i64 = -1;

/// Fold the 4×4 payload into an integer, reading it as a big-endian bit string.
///
/// Returns `None` for records that failed validation. Cells are expected to be
/// 0 or 1; other values are weighted as-is and not truncated, so the result
/// may fall outside the 16-bit range or be negative.
pub fn extract_identifier(matrix: &DataMatrix, valid: bool) -> Option<i64> {
    if !valid {
        return None;
    }
    let id = (0..PAYLOAD_BITS)
        .map(|i| {
            let bit = i64::from(matrix.cell(i / PAYLOAD_DIM, i % PAYLOAD_DIM));
            bit << (PAYLOAD_BITS - 1 - i)
        })
        .sum();
    Some(id)
}

/// Build a parity-consistent matrix carrying `value` as its payload.
///
/// # Examples
/// ```
/// use rfid_core::{encode_payload, extract_identifier};
///
/// let matrix = encode_payload(3072);
/// assert_eq!(extract_identifier(&matrix, true), Some(3072));
/// ```
pub fn encode_payload(value: u16) -> DataMatrix {
    let mut cells = [[0i32; COLUMNS]; ROWS];
    for i in 0..PAYLOAD_BITS {
        let bit = i32::from((value >> (PAYLOAD_BITS - 1 - i)) & 1);
        cells[i / PAYLOAD_DIM][i % PAYLOAD_DIM] = bit;
    }
    for index in 0..PAYLOAD_DIM {
        let row_sum: i32 = (0..PAYLOAD_DIM).map(|c| cells[index][c]).sum();
        let column_sum: i32 = (0..PAYLOAD_DIM).map(|r| cells[r][index]).sum();
        cells[index][PARITY_COLUMN] = row_sum % 2;
        cells[PARITY_ROW][index] = column_sum % 2;
    }
    DataMatrix::new(cells)
}
