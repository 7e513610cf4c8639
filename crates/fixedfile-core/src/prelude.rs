//! Convenient re-exports for downstream crates.

pub use crate::codec::FixedWidthCodec;
pub use crate::config::{OnError, SourceConfig, TrimTable};
pub use crate::convert::{Converter, TimestampFormat};
pub use crate::error::{Error, Result};
pub use crate::infer::{infer_schema, runtime_schema};
pub use crate::schema::{Field, LogicalType, Schema};
pub use crate::split::split;
pub use crate::trim::{TrimKind, TrimMap};
pub use crate::types::{OutOfBand, Record, Value};
