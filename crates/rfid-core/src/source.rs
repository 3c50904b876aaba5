use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// One raw input line, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLine {
    pub line_number: u64,
    pub text: String,
}

pub trait RecordSource {
    fn next_line(&mut self) -> Result<Option<RecordLine>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not open {} for reading: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Line-oriented source over any buffered reader.
///
/// Bytes that are not valid UTF-8 are replaced instead of failing the read.
pub struct LineSource<R> {
    reader: R,
    line_number: u64,
    buf: Vec<u8>,
}

impl LineSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> RecordSource for LineSource<R> {
    fn next_line(&mut self) -> Result<Option<RecordLine>, SourceError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        let text = String::from_utf8_lossy(&self.buf)
            .trim_end_matches(['\n', '\r'])
            .to_string();
        Ok(Some(RecordLine {
            line_number: self.line_number,
            text,
        }))
    }
}
