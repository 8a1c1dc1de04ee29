//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger operations from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as `Err(LedgerError::ParseError)` with
//!   the line number, so the caller can log and skip them

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{LedgerError, LedgerOperation};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Open `path`, distinguishing a missing file from other I/O failures
pub(crate) fn open_input(path: &Path) -> Result<File, LedgerError> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LedgerError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => LedgerError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        },
    })
}

/// Synchronous CSV reader
///
/// Reads one row at a time; memory use does not grow with file size.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Open a CSV operations file for streaming
    ///
    /// Fields are trimmed and rows may omit trailing columns.
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = open_input(path)?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            // Header occupies line 1
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerOperation, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let next = deserializer.next()?;
        self.line_num += 1;
        let line = Some(self.line_num);

        Some(match next {
            Ok(csv_record) => convert_csv_record(csv_record).map_err(|e| LedgerError::ParseError {
                line,
                message: e.to_string(),
            }),
            Err(e) => Err(LedgerError::ParseError {
                line,
                message: e.to_string(),
            }),
        })
    }
}
