#![forbid(unsafe_code)]
//! fixedfile-core: schema, typed values, trim policy, converters, and the
//! fixed-width record codec.
//!
//! Everything here is pure and synchronous. Reading files and driving the
//! line-by-line reader lives in `fixedfile-io`.

pub mod codec;
pub mod config;
pub mod convert;
pub mod error;
pub mod infer;
pub mod prelude;
pub mod schema;
pub mod split;
pub mod trim;
pub mod types;

pub use codec::FixedWidthCodec;
pub use error::{Error, Result};
