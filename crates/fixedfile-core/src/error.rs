use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Input line has wrong number of fields: {actual} != {expected}")]
    FieldCountMismatch { expected: usize, actual: usize },

    #[error("Malformed value {raw:?} for field '{field}': {cause}")]
    MalformedField {
        field: String,
        raw: String,
        cause: String,
    },

    #[error("Encoded field '{field}' has length {actual}, expected {expected}")]
    FieldLengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Record does not match schema: {0}")]
    SchemaMismatch(String),
}

impl Error {
    pub(crate) fn malformed(field: &str, raw: &str, cause: impl ToString) -> Self {
        Error::MalformedField {
            field: field.to_string(),
            raw: raw.to_string(),
            cause: cause.to_string(),
        }
    }
}
