//! Streaming NDJSON writer for decoded records.
//!
//! Each line is `{"record": {...}, "CURRENT_LINE": n}`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fixedfile_core::types::OutOfBand;

use crate::error::Result;
use crate::readers::ReadItem;

pub struct JsonlWriter<W: Write> {
    writer: BufWriter<W>,
    written: u64,
}

impl JsonlWriter<File> {
    pub fn to_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    pub fn write_item(&mut self, item: &ReadItem) -> Result<()> {
        let mut obj = serde_json::Map::new();
        obj.insert("record".into(), item.record.to_json());
        obj.insert(
            OutOfBand::CURRENT_LINE.into(),
            serde_json::Value::from(item.out_of_band.current_line),
        );
        let line = serde_json::to_string(&obj)?;
        writeln!(self.writer, "{}", line)?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::error::Error::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixedfile_core::schema::{Field, LogicalType, Schema};
    use fixedfile_core::types::{Record, Value};
    use std::sync::Arc;

    #[test]
    fn writes_one_object_per_item() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", LogicalType::Int),
            Field::timestamp("day", "yyyy-MM-dd"),
        ]));
        let record = Record::new(schema, vec![Value::Int(5), Value::Timestamp(0)]).unwrap();
        let item = ReadItem {
            record,
            out_of_band: OutOfBand::new(4),
        };

        let mut w = JsonlWriter::to_writer(Vec::new());
        w.write_item(&item).unwrap();
        w.write_item(&item).unwrap();
        assert_eq!(w.written(), 2);
        let out = String::from_utf8(w.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let v: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"record": {"id": 5, "day": 0}, "CURRENT_LINE": 4})
        );
    }
}
