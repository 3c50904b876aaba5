//! Report rendering.
//!
//! The text layout is fixed: every value is followed by one space, the matrix
//! is drawn with a `|` before the parity column and a dashed rule before the
//! parity row, and each block ends with a blank line.

use std::fmt::Write as _;
use std::io::{self, Write};

use serde::Serialize;

use crate::DecodeResult;
use crate::sequence::layout::{PARITY_COLUMN, PARITY_ROW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    /// One JSON object per record.
    JsonLines,
}

/// Render one record block.
pub fn render_text(sequence_number: u64, result: &DecodeResult) -> String {
    let mut out = String::new();

    let _ = write!(out, "Sequence {sequence_number}: ");
    push_values(&mut out, result.sequence.values());
    out.push('\n');

    out.push_str("\tHeader: \n\t\t");
    push_values(&mut out, result.header.values());
    out.push('\n');

    out.push_str("\tData: \n");
    for (index, row) in result.matrix.rows().iter().enumerate() {
        if index == PARITY_ROW {
            out.push_str("\t\t");
            out.push_str(&"--".repeat(PARITY_COLUMN));
            out.push_str("|--\n");
        }
        out.push_str("\t\t");
        push_values(&mut out, &row[..PARITY_COLUMN]);
        let _ = writeln!(out, "| {} ", row[PARITY_COLUMN]);
    }

    let _ = writeln!(out, "\tValue:\n\t\t{}", result.reported_identifier());
    let _ = writeln!(out, "\tColor:\n\t\t{}\n", result.color);
    out
}

fn push_values(out: &mut String, values: &[i32]) {
    for value in values {
        let _ = write!(out, "{value} ");
    }
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    sequence_number: u64,
    #[serde(flatten)]
    result: &'a DecodeResult,
}

/// Output sink shared by every record of a run.
pub struct ReportWriter<W: Write> {
    inner: W,
    format: ReportFormat,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W, format: ReportFormat) -> Self {
        Self { inner, format }
    }

    pub fn write_record(
        &mut self,
        sequence_number: u64,
        result: &DecodeResult,
    ) -> io::Result<()> {
        match self.format {
            ReportFormat::Text => self
                .inner
                .write_all(render_text(sequence_number, result).as_bytes()),
            ReportFormat::JsonLines => {
                let record = JsonRecord {
                    sequence_number,
                    result,
                };
                serde_json::to_writer(&mut self.inner, &record)?;
                self.inner.write_all(b"\n")
            }
        }
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
