//! Fixed-width line ⇄ `Record`.
//!
//! Decode: split → field-count check → per-field trim → convert.
//! Encode: schema check → convert → exact-width check → concatenate.
//!
//! Decoding tolerates a short final chunk but never pads or truncates to fix
//! the field count. Encoding never pads or truncates either: every encoded
//! field must already be exactly `length` characters wide.

use std::sync::Arc;

use crate::convert::Converter;
use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::split::{check_length, split};
use crate::trim::TrimMap;
use crate::types::{Record, Value};

/// A codec bound to one schema, field length, and trim map. Immutable; share
/// it behind an `Arc` across readers if needed.
#[derive(Debug, Clone)]
pub struct FixedWidthCodec {
    schema: Arc<Schema>,
    length: usize,
    trims: TrimMap,
    converters: Vec<Converter>,
}

impl FixedWidthCodec {
    pub fn new(schema: Arc<Schema>, length: usize, trims: TrimMap) -> Result<Self> {
        check_length(length)?;
        let converters = schema
            .fields
            .iter()
            .map(Converter::for_field)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            schema,
            length,
            trims,
            converters,
        })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn trims(&self) -> &TrimMap {
        &self.trims
    }

    pub fn decode(&self, line: &str) -> Result<Record> {
        let raw = split(line, self.length)?;
        if raw.len() != self.schema.len() {
            return Err(Error::FieldCountMismatch {
                expected: self.schema.len(),
                actual: raw.len(),
            });
        }

        let values = self
            .schema
            .fields
            .iter()
            .zip(&self.converters)
            .zip(raw)
            .map(|((field, conv), chunk)| {
                let trimmed = self.trims.apply(&field.name, chunk);
                conv.decode(&field.name, trimmed)
            })
            .collect::<Result<Vec<Value>>>()?;

        #[cfg(feature = "tracing")]
        tracing::trace!(fields = values.len(), "decoded fixed-width line");

        Record::new(Arc::clone(&self.schema), values)
    }

    pub fn encode(&self, record: &Record) -> Result<String> {
        if !Arc::ptr_eq(record.schema(), &self.schema) && **record.schema() != *self.schema {
            return Err(Error::SchemaMismatch(
                "input record has a different schema".into(),
            ));
        }
        if self.schema.is_empty() {
            return Ok(String::new());
        }

        let mut out = String::with_capacity(self.length * self.schema.len());
        for ((field, conv), value) in self
            .schema
            .fields
            .iter()
            .zip(&self.converters)
            .zip(record.values())
        {
            let text = conv.encode(&field.name, value)?;
            let width = text.chars().count();
            if width != self.length {
                return Err(Error::FieldLengthMismatch {
                    field: field.name.clone(),
                    expected: self.length,
                    actual: width,
                });
            }
            out.push_str(&text);
        }
        Ok(out)
    }
}

/// Decode one line against `schema` in a single call.
pub fn decode(line: &str, schema: &Arc<Schema>, length: usize, trims: &TrimMap) -> Result<Record> {
    FixedWidthCodec::new(Arc::clone(schema), length, trims.clone())?.decode(line)
}

/// Encode one record against `schema` in a single call.
pub fn encode(record: &Record, schema: &Arc<Schema>, length: usize) -> Result<String> {
    FixedWidthCodec::new(Arc::clone(schema), length, TrimMap::new())?.encode(record)
}
