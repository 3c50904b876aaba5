//! Sequence line decoding.
//!
//! A record is one line of whitespace-separated integers. The parser turns it
//! into a fixed-length [`RawSequence`] without rejecting anything: short lines
//! are zero-padded, long lines truncated, non-numeric tokens read as 0. Only a
//! blank line produces no sequence.
//!
//! Offsets and dimensions live in `layout`, token conventions in `reader`.

pub mod layout;
pub mod parser;
pub(crate) mod reader;

pub use parser::{ParsedSequence, RawSequence, parse_sequence};
