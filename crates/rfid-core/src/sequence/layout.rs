pub const HEADER_LEN: usize = 9;
pub const DATA_LEN: usize = 25;
pub const SEQUENCE_LEN: usize = HEADER_LEN + DATA_LEN;

pub const HEADER_RANGE: std::ops::Range<usize> = 0..HEADER_LEN;
pub const DATA_RANGE: std::ops::Range<usize> = HEADER_LEN..SEQUENCE_LEN;

pub const ROWS: usize = 5;
pub const COLUMNS: usize = 5;

/// Payload occupies rows and columns `0..PAYLOAD_DIM`; the last row and
/// column carry parity.
pub const PAYLOAD_DIM: usize = 4;
pub const PARITY_ROW: usize = ROWS - 1;
pub const PARITY_COLUMN: usize = COLUMNS - 1;
pub const PAYLOAD_BITS: usize = PAYLOAD_DIM * PAYLOAD_DIM;

pub const HEADER_MARKER: i32 = 1;
pub const CORNER_EXPECTED: i32 = 0;
