//! Decoder for RFID tag readings protected by a 2-D parity scheme.
//!
//! Each record is a line of 34 integers: a 9-value header of ones followed by
//! a 5×5 matrix whose last row and column hold even parity over a 4×4 payload.
//! The pipeline is a chain of pure stages:
//! `sequence` (line → values) → `frame` (header + matrix) → `validate`
//! (header, corner and parity) → `identifier` (payload → 16-bit value) →
//! `color` (value → label) → `report` (text block).
//!
//! I/O lives in `source` and in the caller-provided report sink; the stages
//! themselves never fail. Malformed lines fall back to defined values and
//! failed validation is an ordinary outcome reported as `-1` / `Invalid`.
//!
//! # Examples
//! ```
//! use rfid_core::{Color, DecodeOptions, decode_line};
//!
//! let line = "1 1 1 1 1 1 1 1 1 0 0 0 0 0 1 1 0 0 0 0 0 0 0 0 0 0 0 0 0 1 1 0 0 0";
//! let result = decode_line(line, &DecodeOptions::default()).expect("non-blank line");
//! assert!(result.valid);
//! assert_eq!(result.identifier, Some(3072));
//! assert_eq!(result.color, Color::White);
//! ```

use serde::{Serialize, Serializer};

pub mod color;
pub mod frame;
pub mod identifier;
pub mod pipeline;
pub mod report;
pub mod sequence;
pub mod source;
pub mod validate;

pub use color::{Color, ColorTable, ColorTableKind};
pub use frame::{DataMatrix, Frame, Header, decode_frame};
pub use identifier::{IDENTIFIER_SENTINEL, encode_payload, extract_identifier};
pub use pipeline::{PipelineError, RunSummary, decode_file, decode_source};
pub use report::{ReportFormat, ReportWriter, render_text};
pub use sequence::{ParsedSequence, RawSequence, parse_sequence};
pub use source::{LineSource, RecordLine, RecordSource, SourceError};
pub use validate::{ParityCheck, ValidationFailure, Verdict, validate};

/// Interpretation choices for records the legacy decoder handled loosely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub parity: ParityCheck,
    pub colors: ColorTableKind,
}

/// Everything learned from one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeResult {
    pub sequence: RawSequence,
    pub header: Header,
    pub matrix: DataMatrix,
    pub valid: bool,
    /// `None` when the record failed validation; serialized as `-1`.
    #[serde(serialize_with = "serialize_identifier")]
    pub identifier: Option<i64>,
    pub color: Color,
    /// First check that rejected the record.
    #[serde(skip)]
    pub failure: Option<ValidationFailure>,
}

impl DecodeResult {
    /// Identifier as reported, with the sentinel standing in for `None`.
    pub fn reported_identifier(&self) -> i64 {
        self.identifier.unwrap_or(IDENTIFIER_SENTINEL)
    }
}

fn serialize_identifier<S: Serializer>(
    id: &Option<i64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(id.unwrap_or(IDENTIFIER_SENTINEL))
}

/// Run every stage over an already parsed sequence.
pub fn decode_sequence(sequence: &RawSequence, options: &DecodeOptions) -> DecodeResult {
    let Frame { header, matrix } = decode_frame(sequence);
    let verdict = validate(&header, &matrix);
    let failure = verdict.failure(options.parity);
    let valid = failure.is_none();
    let identifier = extract_identifier(&matrix, valid);
    let color = ColorTable::new(options.colors).resolve(identifier);

    DecodeResult {
        sequence: *sequence,
        header,
        matrix,
        valid,
        identifier,
        color,
        failure,
    }
}

/// Parse and decode one input line; `None` for a blank line.
pub fn decode_line(line: &str, options: &DecodeOptions) -> Option<DecodeResult> {
    parse_sequence(line).map(|parsed| decode_sequence(&parsed.sequence, options))
}
