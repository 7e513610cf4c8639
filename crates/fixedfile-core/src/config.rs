//! Source configuration that the CLI and host layers serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::trim::{TrimKind, TrimMap};

/// Field length used when no explicit default length is configured.
pub const DEFAULT_FIELD_LENGTH: usize = 10;

/// Read buffer size for the line source.
pub const DEFAULT_READ_BUFFER_BYTES: usize = 64 * 1024;

/// What the reader does with a line that fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// Propagate the error and stop reading.
    #[default]
    Fail,
    /// Log the line, count it as rejected, and continue.
    Skip,
}

impl std::str::FromStr for OnError {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(OnError::Fail),
            "skip" => Ok(OnError::Skip),
            _ => Err(Error::InvalidConfiguration(format!(
                "unknown error policy '{s}' (expected 'fail' or 'skip')"
            ))),
        }
    }
}

/// Per-field trim overrides as two index-aligned columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimTable {
    pub field: Vec<String>,
    pub trim: Vec<TrimKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path of the fixed-width file to read.
    pub file_path: String,

    /// When false, `DEFAULT_FIELD_LENGTH` applies and `default_length` is ignored.
    pub has_default_length: bool,

    /// Signed so that bad input survives deserialization and is rejected by `validate`.
    pub default_length: i64,

    /// Trim kind for fields not listed in `table_trim`.
    pub trim: TrimKind,

    pub table_trim: TrimTable,

    /// Design schema; `include_all_fields` defers structure to each line.
    pub schema: Schema,

    pub on_error: OnError,

    pub read_buffer_bytes: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            file_path: String::new(),
            has_default_length: false,
            default_length: 0,
            trim: TrimKind::None,
            table_trim: TrimTable::default(),
            schema: Schema::dynamic(),
            on_error: OnError::Fail,
            read_buffer_bytes: DEFAULT_READ_BUFFER_BYTES,
        }
    }
}

impl SourceConfig {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `FIXEDFILE_PATH`: file to read
    /// - `FIXEDFILE_DEFAULT_LENGTH`: field length (also enables it)
    /// - `FIXEDFILE_TRIM`: fallback trim kind (`NONE`, `BEGIN`, `END`, `BOTH`)
    /// - `FIXEDFILE_ON_ERROR`: `fail` or `skip`
    /// - `FIXEDFILE_READ_BUFFER_BYTES`: line source buffer size
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("FIXEDFILE_PATH") {
            cfg.file_path = s;
        }

        if let Ok(s) = std::env::var("FIXEDFILE_DEFAULT_LENGTH") {
            if let Ok(v) = s.parse::<i64>() {
                cfg.has_default_length = true;
                cfg.default_length = v;
            }
        }

        if let Ok(s) = std::env::var("FIXEDFILE_TRIM") {
            if let Ok(v) = s.parse::<TrimKind>() {
                cfg.trim = v;
            }
        }

        if let Ok(s) = std::env::var("FIXEDFILE_ON_ERROR") {
            if let Ok(v) = s.parse::<OnError>() {
                cfg.on_error = v;
            }
        }

        if let Ok(s) = std::env::var("FIXEDFILE_READ_BUFFER_BYTES") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.read_buffer_bytes = v;
            }
        }

        cfg
    }

    /// Effective width of every field.
    pub fn field_length(&self) -> usize {
        if self.has_default_length {
            usize::try_from(self.default_length).unwrap_or(0)
        } else {
            DEFAULT_FIELD_LENGTH
        }
    }

    pub fn trim_map(&self) -> Result<TrimMap> {
        Ok(TrimMap::from_columns(&self.table_trim.field, &self.table_trim.trim)?
            .with_default(self.trim))
    }

    /// Checks that need no I/O.
    pub fn validate(&self) -> Result<()> {
        if self.file_path.trim().is_empty() {
            return Err(Error::InvalidConfiguration("file path is empty".into()));
        }
        if self.has_default_length && self.default_length < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "default length must be at least 1, got {}",
                self.default_length
            )));
        }
        if self.read_buffer_bytes == 0 {
            return Err(Error::InvalidConfiguration(
                "read buffer size must be positive".into(),
            ));
        }
        self.trim_map()?;
        self.schema.validate()
    }
}
