use serde::{Serialize, Serializer};

use super::layout;
use super::reader::TokenReader;

/// One input line as a fixed-length value sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSequence([i32; layout::SEQUENCE_LEN]);

impl RawSequence {
    pub fn new(values: [i32; layout::SEQUENCE_LEN]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[i32; layout::SEQUENCE_LEN] {
        &self.0
    }

    pub fn header_slice(&self) -> &[i32] {
        &self.0[layout::HEADER_RANGE]
    }

    pub fn data_slice(&self) -> &[i32] {
        &self.0[layout::DATA_RANGE]
    }
}

impl Serialize for RawSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// A parsed line together with what the parser had to paper over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSequence {
    pub sequence: RawSequence,
    /// Number of whitespace-separated tokens on the line.
    pub tokens: usize,
    /// Tokens that read as 0 because they had no leading digits.
    pub non_numeric: usize,
}

impl ParsedSequence {
    pub fn is_well_formed(&self) -> bool {
        self.tokens == layout::SEQUENCE_LEN && self.non_numeric == 0
    }
}

/// Parse one line into a sequence.
///
/// Returns `None` for a blank line. Missing trailing values are 0, tokens past
/// the fixed length are ignored and non-numeric tokens read as 0.
pub fn parse_sequence(line: &str) -> Option<ParsedSequence> {
    let mut values = [0i32; layout::SEQUENCE_LEN];
    let mut tokens = 0usize;
    let mut non_numeric = 0usize;

    for (index, token) in TokenReader::new(line).enumerate() {
        tokens += 1;
        let value = token.unwrap_or_else(|| {
            non_numeric += 1;
            0
        });
        if let Some(slot) = values.get_mut(index) {
            *slot = value;
        }
    }

    if tokens == 0 {
        return None;
    }

    Some(ParsedSequence {
        sequence: RawSequence::new(values),
        tokens,
        non_numeric,
    })
}
