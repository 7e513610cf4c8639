//! Logical schema types. Pure data; the converters live in `convert.rs`.
//!
//! A schema is an ordered list of fields. Order is significant: the codec maps
//! the N-th fixed-width chunk of a line to the N-th field.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalType {
    Boolean,
    Double,
    Float,
    Int,
    Long,
    String,
    Timestamp,
}

impl LogicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Boolean => "BOOLEAN",
            LogicalType::Double => "DOUBLE",
            LogicalType::Float => "FLOAT",
            LogicalType::Int => "INT",
            LogicalType::Long => "LONG",
            LogicalType::String => "STRING",
            LogicalType::Timestamp => "TIMESTAMP",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "BOOLEAN" => Ok(LogicalType::Boolean),
            "DOUBLE" => Ok(LogicalType::Double),
            "FLOAT" => Ok(LogicalType::Float),
            "INT" => Ok(LogicalType::Int),
            "LONG" => Ok(LogicalType::Long),
            "STRING" => Ok(LogicalType::String),
            "TIMESTAMP" => Ok(LogicalType::Timestamp),
            _ => Err(Error::InvalidConfiguration(format!(
                "unknown logical type '{s}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub logical_type: LogicalType,
    /// Date pattern such as `yyyy-MM-dd`; required iff the type is `TIMESTAMP`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_pattern: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
            timestamp_pattern: None,
        }
    }

    pub fn timestamp(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logical_type: LogicalType::Timestamp,
            timestamp_pattern: Some(pattern.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Design-time marker: structure is inferred from each line at runtime.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_all_fields: bool,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            include_all_fields: false,
        }
    }

    /// Build a schema and check its invariants.
    pub fn try_new(fields: Vec<Field>) -> Result<Self> {
        let schema = Self::new(fields);
        schema.validate()?;
        Ok(schema)
    }

    /// A design schema that defers its structure to runtime inference.
    pub fn dynamic() -> Self {
        Self {
            fields: Vec::new(),
            include_all_fields: true,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, idx: usize) -> Option<&Field> {
        self.fields.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Field names must be unique and a pattern must accompany every
    /// `TIMESTAMP` field (and only those).
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for f in &self.fields {
            if !seen.insert(f.name.as_str()) {
                return Err(Error::InvalidConfiguration(format!(
                    "duplicate field name '{}'",
                    f.name
                )));
            }
            match (f.logical_type, &f.timestamp_pattern) {
                (LogicalType::Timestamp, None) => {
                    return Err(Error::InvalidConfiguration(format!(
                        "timestamp field '{}' has no pattern",
                        f.name
                    )))
                }
                (LogicalType::Timestamp, Some(_)) | (_, None) => {}
                (other, Some(_)) => {
                    return Err(Error::InvalidConfiguration(format!(
                        "field '{}' of type {other} cannot carry a timestamp pattern",
                        f.name
                    )))
                }
            }
        }
        Ok(())
    }
}
