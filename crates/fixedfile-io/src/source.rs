//! Configuration-facing entry points for one fixed-width file.
//!
//! Call order for tooling: `validate_configuration` (no I/O), then
//! `validate_connectivity`, then `guess_schema` or `create_reader`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use fixedfile_core::config::SourceConfig;
use fixedfile_core::infer::{infer_schema, runtime_schema};
use fixedfile_core::schema::Schema;

use crate::error::{Error, Result};
use crate::lines::LineSource;
use crate::readers::FixedFileReader;

#[derive(Debug, Clone)]
pub struct FixedFileSource {
    config: SourceConfig,
}

impl FixedFileSource {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.config.file_path)
    }

    /// Path non-empty, default length valid, trim table aligned, schema sane.
    pub fn validate_configuration(&self) -> Result<()> {
        self.config.validate()?;
        Ok(())
    }

    /// The target file exists and can be opened for reading.
    pub fn validate_connectivity(&self) -> Result<()> {
        let path = self.path();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        File::open(path)?;
        Ok(())
    }

    /// Infer a schema from the first line only. An empty file yields an
    /// empty schema.
    pub fn guess_schema(&self) -> Result<Schema> {
        let mut lines = self.open_lines()?;
        let first = lines.next_line()?.unwrap_or_default();
        let schema = infer_schema(&first, self.config.field_length())?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            path = %self.path().display(),
            fields = schema.len(),
            "guessed schema from first line"
        );
        Ok(schema)
    }

    /// Schema used to decode `line`: the design schema, or one inferred from
    /// the line when the design schema includes all fields.
    pub fn runtime_schema(&self, line: &str) -> Result<Arc<Schema>> {
        let design = Arc::new(self.config.schema.clone());
        Ok(runtime_schema(&design, line, self.config.field_length())?)
    }

    /// Validate the configuration, open the file, and wire a reader.
    pub fn create_reader(&self) -> Result<FixedFileReader<BufReader<File>>> {
        self.validate_configuration()?;
        let lines = self.open_lines()?;
        FixedFileReader::new(
            lines,
            Arc::new(self.config.schema.clone()),
            self.config.field_length(),
            self.config.trim_map()?,
            self.config.on_error,
        )
    }

    fn open_lines(&self) -> Result<LineSource<BufReader<File>>> {
        let path = self.path();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        Ok(LineSource::open(path, self.config.read_buffer_bytes.max(1))?)
    }
}
