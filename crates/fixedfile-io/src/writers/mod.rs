//! Streaming writers.

pub mod fixed;
pub mod jsonl;

pub use fixed::FixedWidthWriter;
pub use jsonl::JsonlWriter;
