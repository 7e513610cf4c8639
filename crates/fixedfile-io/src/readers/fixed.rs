//! Sequential fixed-width reader.
//!
//! State machine: `Unstarted → Active → Exhausted`, with `Failed` reachable
//! from `start`/`advance` on an I/O error or (under `OnError::Fail`) a decode
//! error. `current()` never consumes input.
//!
//! The reader owns its `LineSource`; the source is released as soon as the
//! reader is exhausted or failed, and in any case when the reader is dropped.

use std::io::BufRead;
use std::sync::Arc;

use fixedfile_core::config::OnError;
use fixedfile_core::infer::runtime_schema;
use fixedfile_core::schema::Schema;
use fixedfile_core::trim::TrimMap;
use fixedfile_core::types::{OutOfBand, Record};
use fixedfile_core::FixedWidthCodec;

use crate::error::{Error, Result};
use crate::lines::LineSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    Unstarted,
    Active,
    Exhausted,
    Failed,
}

/// A decoded record paired with its out-of-band metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadItem {
    pub record: Record,
    pub out_of_band: OutOfBand,
}

/// How each line's runtime schema is obtained.
enum RuntimeCodec {
    /// The design schema, compiled once.
    Design(FixedWidthCodec),
    /// Include-all-fields: infer from every line.
    PerLine {
        design: Arc<Schema>,
        length: usize,
        trims: TrimMap,
    },
}

impl RuntimeCodec {
    fn decode(&self, line: &str) -> fixedfile_core::Result<Record> {
        match self {
            RuntimeCodec::Design(codec) => codec.decode(line),
            RuntimeCodec::PerLine {
                design,
                length,
                trims,
            } => {
                let schema = runtime_schema(design, line, *length)?;
                FixedWidthCodec::new(schema, *length, trims.clone())?.decode(line)
            }
        }
    }
}

pub struct FixedFileReader<R: BufRead> {
    source: Option<LineSource<R>>,
    codec: RuntimeCodec,
    on_error: OnError,
    state: ReaderState,
    current: Option<ReadItem>,
    lines_consumed: u64,
    rejected: u64,
}

impl<R: BufRead> FixedFileReader<R> {
    pub fn new(
        source: LineSource<R>,
        design_schema: Arc<Schema>,
        length: usize,
        trims: TrimMap,
        on_error: OnError,
    ) -> Result<Self> {
        let codec = if design_schema.include_all_fields {
            // Validates the length up front, like the design-schema path.
            FixedWidthCodec::new(Arc::new(Schema::default()), length, TrimMap::new())?;
            RuntimeCodec::PerLine {
                design: design_schema,
                length,
                trims,
            }
        } else {
            RuntimeCodec::Design(FixedWidthCodec::new(design_schema, length, trims)?)
        };
        Ok(Self {
            source: Some(source),
            codec,
            on_error,
            state: ReaderState::Unstarted,
            current: None,
            lines_consumed: 0,
            rejected: 0,
        })
    }

    /// Read and decode the first record. Returns whether one exists.
    pub fn start(&mut self) -> Result<bool> {
        if self.state != ReaderState::Unstarted {
            return Err(Error::InvalidState {
                op: "start",
                state: self.state,
            });
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("fixed-width reader starting");
        self.step()
    }

    /// The current record; repeated calls return the same pair.
    pub fn current(&self) -> Result<&ReadItem> {
        match (&self.state, &self.current) {
            (ReaderState::Active, Some(item)) => Ok(item),
            _ => Err(Error::NoCurrentRecord),
        }
    }

    /// Move to the next record. Returns false once the input is exhausted.
    pub fn advance(&mut self) -> Result<bool> {
        match self.state {
            ReaderState::Active => self.step(),
            ReaderState::Exhausted => Ok(false),
            state => Err(Error::InvalidState {
                op: "advance",
                state,
            }),
        }
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Lines read from the source so far, including rejected ones.
    pub fn lines_read(&self) -> u64 {
        self.lines_consumed
    }

    /// Lines skipped under `OnError::Skip`.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Iterate over the remaining records, starting the reader if needed.
    pub fn records(self) -> Records<R> {
        Records { reader: self }
    }

    fn step(&mut self) -> Result<bool> {
        match self.next_item() {
            Ok(Some(item)) => {
                self.current = Some(item);
                self.state = ReaderState::Active;
                Ok(true)
            }
            Ok(None) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    lines = self.lines_consumed,
                    rejected = self.rejected,
                    "fixed-width reader exhausted"
                );
                self.finish(ReaderState::Exhausted);
                Ok(false)
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(line = self.lines_consumed, error = %e, "fixed-width reader failed");
                self.finish(ReaderState::Failed);
                Err(e)
            }
        }
    }

    fn next_item(&mut self) -> Result<Option<ReadItem>> {
        loop {
            let Some(source) = self.source.as_mut() else {
                return Ok(None);
            };
            let Some(line) = source.next_line()? else {
                return Ok(None);
            };
            let index = self.lines_consumed;
            self.lines_consumed += 1;

            match self.codec.decode(&line) {
                Ok(record) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(line = index, fields = record.len(), "decoded record");
                    return Ok(Some(ReadItem {
                        record,
                        out_of_band: OutOfBand::new(index),
                    }));
                }
                Err(e) if self.on_error == OnError::Skip => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(line = index, error = %e, "rejected fixed-width line");
                    #[cfg(not(feature = "tracing"))]
                    let _ = e;
                    self.rejected += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn finish(&mut self, state: ReaderState) {
        self.state = state;
        self.current = None;
        self.source = None;
    }
}

/// Owning iterator over a reader's records. Stops after the first error.
pub struct Records<R: BufRead> {
    reader: FixedFileReader<R>,
}

impl<R: BufRead> Records<R> {
    pub fn reader(&self) -> &FixedFileReader<R> {
        &self.reader
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<ReadItem>;

    fn next(&mut self) -> Option<Self::Item> {
        let moved = match self.reader.state {
            ReaderState::Unstarted => self.reader.start(),
            ReaderState::Active => self.reader.advance(),
            ReaderState::Exhausted | ReaderState::Failed => return None,
        };
        match moved {
            Ok(true) => self.reader.current.take().map(Ok),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
