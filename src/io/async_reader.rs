//! Asynchronous CSV reader with batch interface
//!
//! Reads ledger operations from any `futures::io::AsyncRead` source in
//! fixed-size batches for the async strategy.
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of LedgerOperations
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::LedgerOperation;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// A batch of operations plus how many rows were skipped reading it
#[derive(Debug, Default)]
pub struct Batch {
    pub operations: Vec<LedgerOperation>,
    pub malformed: usize,
}

impl Batch {
    /// True once the reader has reached end of input
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty() && self.malformed == 0
    }
}

/// Asynchronous CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Wrap an async byte source
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
        }
    }

    /// Read up to `batch_size` rows
    ///
    /// Rows that fail to parse or convert are logged with their line number,
    /// counted in `malformed`, and skipped. An empty batch means end of input.
    pub async fn read_batch(&mut self, batch_size: usize) -> Batch {
        let mut batch = Batch {
            operations: Vec::with_capacity(batch_size),
            malformed: 0,
        };
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.operations.len() + batch.malformed < batch_size {
            let Some(next) = records.next().await else {
                break;
            };
            self.line_num += 1;

            match next.map_err(|e| e.to_string()).and_then(|record| {
                convert_csv_record(record).map_err(|e| e.to_string())
            }) {
                Ok(operation) => batch.operations.push(operation),
                Err(message) => {
                    tracing::warn!(line = self.line_num, error = %message, "skipping malformed row");
                    batch.malformed += 1;
                }
            }
        }

        batch
    }
}
