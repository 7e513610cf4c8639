//! Fixed-width line writer: the encode direction of the codec as a sink.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fixedfile_core::types::Record;
use fixedfile_core::FixedWidthCodec;

use crate::error::{Error, Result};

pub struct FixedWidthWriter<W: Write> {
    writer: BufWriter<W>,
    codec: FixedWidthCodec,
    written: u64,
}

impl FixedWidthWriter<File> {
    pub fn to_path<P: AsRef<Path>>(path: P, codec: FixedWidthCodec) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f, codec))
    }
}

impl<W: Write> FixedWidthWriter<W> {
    pub fn to_writer(writer: W, codec: FixedWidthCodec) -> Self {
        Self {
            writer: BufWriter::new(writer),
            codec,
            written: 0,
        }
    }

    /// Encode `record` and write it as one `\n`-terminated line. Nothing is
    /// written when encoding fails.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        let line = self.codec.encode(record)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
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
        self.writer.into_inner().map_err(|e| Error::Io(e.into_error()))
    }
}
