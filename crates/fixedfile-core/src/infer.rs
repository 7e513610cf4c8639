//! Derive a structural schema from a sample line.

use std::sync::Arc;

use crate::error::Result;
use crate::schema::{Field, LogicalType, Schema};
use crate::split::split;

/// One `STRING` field per chunk of `sample`, named `column1`, `column2`, ...
pub fn infer_schema(sample: &str, length: usize) -> Result<Schema> {
    let fields = split(sample, length)?
        .iter()
        .enumerate()
        .map(|(i, _)| Field::new(format!("column{}", i + 1), LogicalType::String))
        .collect();
    Ok(Schema::new(fields))
}

/// Schema used to decode `line`: `design` itself, or one inferred from the
/// line when `design` includes all fields.
pub fn runtime_schema(design: &Arc<Schema>, line: &str, length: usize) -> Result<Arc<Schema>> {
    if design.include_all_fields {
        Ok(Arc::new(infer_schema(line, length)?))
    } else {
        Ok(Arc::clone(design))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn three_columns_of_eleven() {
        let sample = "a".repeat(33);
        let schema = infer_schema(&sample, 11).unwrap();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["column1", "column2", "column3"]);
        assert!(schema.fields.iter().all(|f| f.logical_type == LogicalType::String));
        assert!(!schema.include_all_fields);
    }

    #[test]
    fn short_tail_still_counts_as_a_column() {
        assert_eq!(infer_schema("1234567890123", 10).unwrap().len(), 2);
    }

    #[test]
    fn empty_sample_gives_empty_schema() {
        assert!(infer_schema("", 5).unwrap().is_empty());
    }

    #[test]
    fn runtime_schema_follows_design_marker() {
        let design = Arc::new(Schema::new(vec![Field::new("only", LogicalType::Int)]));
        let same = runtime_schema(&design, "1234567890", 5).unwrap();
        assert!(Arc::ptr_eq(&same, &design));

        let dynamic = Arc::new(Schema::dynamic());
        assert_eq!(runtime_schema(&dynamic, "1234567890", 5).unwrap().len(), 2);
    }

    #[test]
    fn zero_length_is_rejected() {
        assert!(matches!(infer_schema("abc", 0), Err(Error::InvalidConfiguration(_))));
    }
}
