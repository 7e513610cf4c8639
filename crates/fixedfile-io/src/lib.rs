#![forbid(unsafe_code)]
//! fixedfile-io: line sources, the sequential fixed-width reader, and record
//! writers.
//!
//! The codec itself is pure and lives in `fixedfile-core`; this crate only
//! adds file handling and the reader state machine around it.

pub mod error;
pub mod lines;
pub mod readers;
pub mod source;
pub mod writers;

pub use error::{Error, Result};
pub use lines::LineSource;
pub use readers::{FixedFileReader, ReadItem, ReaderState, Records};
pub use source::FixedFileSource;
pub use writers::{FixedWidthWriter, JsonlWriter};
