//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use fixedfile::prelude::*;

/// Two 80-character lines of eight 10-wide fields.
pub const SAMPLE_LINES: [&str; 2] = [
    "Hello_____True      500       2017-01-2212.147       First        Last  BOTH    ",
    "H2llo_____True      200       2017-02-2212.222       F2rst        L2st  B2TH    ",
];

pub fn sample_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("text", LogicalType::String),
        Field::new("flag", LogicalType::Boolean),
        Field::new("count", LogicalType::Int),
        Field::timestamp("day", "yyyy-MM-dd"),
        Field::new("ratio", LogicalType::Double),
        Field::new("begin", LogicalType::String),
        Field::new("end", LogicalType::String),
        Field::new("both", LogicalType::String),
    ]))
}

pub fn write_lines(path: &Path, lines: &[&str]) {
    let mut file = std::fs::File::create(path).expect("Failed to create test file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write line");
    }
}

/// A config for `path` with the sample schema, width 10 and BOTH trim.
pub fn sample_config(path: &Path) -> SourceConfig {
    let mut cfg = SourceConfig::new(path.to_string_lossy());
    cfg.has_default_length = true;
    cfg.default_length = 10;
    cfg.trim = TrimKind::Both;
    cfg.schema = (*sample_schema()).clone();
    cfg
}
