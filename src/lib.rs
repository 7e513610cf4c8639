#![forbid(unsafe_code)]
//! fixedfile: read and write fixed-width text files as typed records.
//!
//! This crate re-exports the workspace members:
//! - [`fixedfile_core`]: schema, values, trim policy, converters, and the codec.
//! - [`fixedfile_io`]: line sources, the sequential reader, and writers.

pub use fixedfile_core;
pub use fixedfile_io;

pub use fixedfile_core::{Error, FixedWidthCodec, Result};
pub use fixedfile_io::{FixedFileReader, FixedFileSource, ReadItem, ReaderState};

pub mod prelude {
    pub use fixedfile_core::prelude::*;
    pub use fixedfile_io::{
        FixedFileReader, FixedFileSource, FixedWidthWriter, JsonlWriter, LineSource, ReadItem,
        ReaderState,
    };
}
