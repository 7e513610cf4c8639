//! YAML job files.
//!
//! Every key is optional; present keys override the environment-derived
//! `SourceConfig`, and CLI flags override both.
//!
//! Example:
//! ```yaml
//! file_path: "data/customers.txt"
//! has_default_length: true
//! default_length: 10
//! trim: BOTH
//! table_trim:
//!   field: ["notes"]
//!   trim: ["NONE"]
//! on_error: skip
//! schema:
//!   fields:
//!     - { name: "id",     type: "INT" }
//!     - { name: "joined", type: "TIMESTAMP", timestamp_pattern: "yyyy-MM-dd" }
//!     - { name: "notes",  type: "STRING" }
//! output: "out/customers.jsonl"
//! ```

use serde::{Deserialize, Serialize};

use fixedfile_core::config::{OnError, SourceConfig, TrimTable};
use fixedfile_core::schema::Schema;
use fixedfile_core::trim::TrimKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub file_path: Option<String>,
    pub has_default_length: Option<bool>,
    pub default_length: Option<i64>,
    pub trim: Option<TrimKind>,
    pub table_trim: Option<TrimTable>,
    pub schema: Option<Schema>,
    pub on_error: Option<OnError>,
    pub read_buffer_bytes: Option<usize>,
    /// Where `read` writes JSONL; stdout when absent.
    pub output: Option<String>,
}

pub fn parse_job(yaml_src: &str) -> Result<JobConfig, serde_yaml::Error> {
    serde_yaml::from_str(yaml_src)
}

pub fn apply_job_config(cfg: &mut SourceConfig, job: &JobConfig) {
    if let Some(path) = &job.file_path {
        cfg.file_path = path.clone();
    }
    if let Some(has) = job.has_default_length {
        cfg.has_default_length = has;
    }
    if let Some(len) = job.default_length {
        cfg.default_length = len;
    }
    if let Some(trim) = job.trim {
        cfg.trim = trim;
    }
    if let Some(table) = &job.table_trim {
        cfg.table_trim = table.clone();
    }
    if let Some(schema) = &job.schema {
        cfg.schema = schema.clone();
    }
    if let Some(policy) = job.on_error {
        cfg.on_error = policy;
    }
    if let Some(bytes) = job.read_buffer_bytes {
        cfg.read_buffer_bytes = bytes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixedfile_core::schema::LogicalType;

    #[test]
    fn job_overrides_only_present_keys() {
        let mut cfg = SourceConfig::default();
        cfg.read_buffer_bytes = 4096;
        let job = parse_job(
            r#"
file_path: "in.txt"
default_length: 8
has_default_length: true
trim: BOTH
"#,
        )
        .unwrap();
        apply_job_config(&mut cfg, &job);
        assert_eq!(cfg.file_path, "in.txt");
        assert_eq!(cfg.field_length(), 8);
        assert_eq!(cfg.trim, TrimKind::Both);
        assert_eq!(cfg.read_buffer_bytes, 4096);
        assert!(cfg.schema.include_all_fields);
    }

    #[test]
    fn parses_schema_and_output() {
        let job = parse_job(
            r#"
schema:
  fields:
    - { name: "id", type: "INT" }
    - { name: "day", type: "TIMESTAMP", timestamp_pattern: "yyyy-MM-dd" }
output: "out.jsonl"
"#,
        )
        .unwrap();
        let schema = job.schema.unwrap();
        assert_eq!(schema.fields[1].logical_type, LogicalType::Timestamp);
        assert_eq!(job.output.as_deref(), Some("out.jsonl"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse_job("filename: \"x\"").is_err());
    }

    #[test]
    fn rejects_bad_enum_tokens() {
        assert!(parse_job("trim: SIDEWAYS").is_err());
        assert!(parse_job("on_error: retry").is_err());
    }
}
