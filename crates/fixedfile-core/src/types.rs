//! Typed values and the records the codec produces.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::{LogicalType, Schema};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    /// Milliseconds since the Unix epoch, UTC.
    Timestamp(i64),
}

impl Value {
    pub fn logical_type(&self) -> LogicalType {
        match self {
            Value::Bool(_) => LogicalType::Boolean,
            Value::Int(_) => LogicalType::Int,
            Value::Long(_) => LogicalType::Long,
            Value::Float(_) => LogicalType::Float,
            Value::Double(_) => LogicalType::Double,
            Value::Str(_) => LogicalType::String,
            Value::Timestamp(_) => LogicalType::Timestamp,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        use Value::*;
        match self {
            Bool(b) => serde_json::Value::Bool(*b),
            Int(i) => serde_json::Value::from(*i),
            Long(i) => serde_json::Value::from(*i),
            Float(f) => serde_json::Value::from(*f as f64),
            Double(f) => serde_json::Value::from(*f),
            Str(s) => serde_json::Value::String(s.clone()),
            Timestamp(ms) => serde_json::Value::from(*ms),
        }
    }
}

/// One decoded line: values index-aligned to the schema that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Record {
    /// Build a record, checking arity and that each value has its field's type.
    pub fn new(schema: Arc<Schema>, values: Vec<Value>) -> Result<Self> {
        if values.len() != schema.len() {
            return Err(Error::SchemaMismatch(format!(
                "record has {} values, schema has {} fields",
                values.len(),
                schema.len()
            )));
        }
        for (field, value) in schema.fields.iter().zip(&values) {
            if value.logical_type() != field.logical_type {
                return Err(Error::SchemaMismatch(format!(
                    "field '{}' expects {}, got {}",
                    field.name,
                    field.logical_type,
                    value.logical_type()
                )));
            }
        }
        Ok(Self { schema, values })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.schema.index_of(name).and_then(|i| self.values.get(i))
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Field-name keyed JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let obj = self
            .schema
            .names()
            .zip(&self.values)
            .map(|(name, v)| (name.to_string(), v.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(obj)
    }
}

/// Out-of-band metadata delivered alongside each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutOfBand {
    /// 0-based index of the source line that produced the paired record.
    #[serde(rename = "CURRENT_LINE")]
    pub current_line: u64,
}

impl OutOfBand {
    pub const CURRENT_LINE: &'static str = "CURRENT_LINE";

    pub fn new(current_line: u64) -> Self {
        Self { current_line }
    }
}
