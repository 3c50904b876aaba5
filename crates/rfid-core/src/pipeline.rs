use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::report::ReportWriter;
use crate::sequence::layout::SEQUENCE_LEN;
use crate::sequence::parse_sequence;
use crate::source::{LineSource, RecordSource, SourceError};
use crate::{DecodeOptions, decode_sequence};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Source(#[from] SourceError),
    #[error("failed to write report: {0}")]
    Sink(#[from] std::io::Error),
}

/// Counts for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub records: u64,
    pub valid: u64,
    pub invalid: u64,
    /// Records whose line needed padding, truncation or non-numeric fallback.
    pub malformed: u64,
}

pub fn decode_file<W: Write>(
    input: &Path,
    options: &DecodeOptions,
    writer: &mut ReportWriter<W>,
) -> Result<RunSummary, PipelineError> {
    let source = LineSource::open(input)?;
    decode_source(source, options, writer)
}

/// Decode every record of `source` in order, writing each block as soon as it
/// is decoded. Blank lines are skipped and do not advance the numbering.
pub fn decode_source<S: RecordSource, W: Write>(
    mut source: S,
    options: &DecodeOptions,
    writer: &mut ReportWriter<W>,
) -> Result<RunSummary, PipelineError> {
    let mut summary = RunSummary::default();

    while let Some(line) = source.next_line()? {
        let Some(parsed) = parse_sequence(&line.text) else {
            continue;
        };
        summary.records += 1;
        let sequence_number = summary.records;

        if !parsed.is_well_formed() {
            summary.malformed += 1;
            warn!(
                line = line.line_number,
                tokens = parsed.tokens,
                expected = SEQUENCE_LEN,
                non_numeric = parsed.non_numeric,
                "malformed record line"
            );
        }

        let result = decode_sequence(&parsed.sequence, options);
        if result.valid {
            summary.valid += 1;
        } else {
            summary.invalid += 1;
        }
        debug!(
            sequence = sequence_number,
            line = line.line_number,
            valid = result.valid,
            identifier = result.reported_identifier(),
            color = %result.color,
            failure = ?result.failure,
            "record decoded"
        );

        writer.write_record(sequence_number, &result)?;
    }

    Ok(summary)
}
