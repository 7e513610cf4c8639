//! Pull-based readers that surface one decoded record at a time.

pub mod fixed;

pub use fixed::{FixedFileReader, ReadItem, ReaderState, Records};
