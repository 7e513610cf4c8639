//! Per-field whitespace trimming applied before type conversion.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrimKind {
    #[default]
    None,
    Begin,
    End,
    Both,
}

impl TrimKind {
    /// Strip whitespace (`char::is_whitespace`) according to the kind.
    pub fn apply<'a>(&self, value: &'a str) -> &'a str {
        match self {
            TrimKind::None => value,
            TrimKind::Begin => value.trim_start(),
            TrimKind::End => value.trim_end(),
            TrimKind::Both => value.trim(),
        }
    }
}

impl fmt::Display for TrimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrimKind::None => "NONE",
            TrimKind::Begin => "BEGIN",
            TrimKind::End => "END",
            TrimKind::Both => "BOTH",
        };
        f.write_str(s)
    }
}

impl FromStr for TrimKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(TrimKind::None),
            "BEGIN" => Ok(TrimKind::Begin),
            "END" => Ok(TrimKind::End),
            "BOTH" => Ok(TrimKind::Both),
            _ => Err(Error::InvalidConfiguration(format!("unknown trim kind '{s}'"))),
        }
    }
}

/// Field name → trim kind. Fields not in the map use `fallback`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrimMap {
    by_field: HashMap<String, TrimKind>,
    fallback: TrimKind,
}

impl TrimMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the two index-aligned configuration columns.
    pub fn from_columns(fields: &[String], kinds: &[TrimKind]) -> Result<Self> {
        if fields.len() != kinds.len() {
            return Err(Error::InvalidConfiguration(format!(
                "trim table has {} field names but {} trim kinds",
                fields.len(),
                kinds.len()
            )));
        }
        let by_field = fields.iter().cloned().zip(kinds.iter().copied()).collect();
        Ok(Self {
            by_field,
            fallback: TrimKind::None,
        })
    }

    pub fn with_default(mut self, kind: TrimKind) -> Self {
        self.fallback = kind;
        self
    }

    pub fn kind_for(&self, field: &str) -> TrimKind {
        self.by_field.get(field).copied().unwrap_or(self.fallback)
    }

    pub fn apply<'a>(&self, field: &str, value: &'a str) -> &'a str {
        self.kind_for(field).apply(value)
    }
}

impl FromIterator<(String, TrimKind)> for TrimMap {
    fn from_iter<I: IntoIterator<Item = (String, TrimKind)>>(iter: I) -> Self {
        Self {
            by_field: iter.into_iter().collect(),
            fallback: TrimKind::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_strip_the_right_side() {
        let s = " \t abc \n";
        assert_eq!(TrimKind::None.apply(s), s);
        assert_eq!(TrimKind::Begin.apply(s), "abc \n");
        assert_eq!(TrimKind::End.apply(s), " \t abc");
        assert_eq!(TrimKind::Both.apply(s), "abc");
    }

    #[test]
    fn both_is_idempotent() {
        for s in ["", "   ", " a b ", "\u{a0}x\u{2003}", "\r\nline\t"] {
            let once = TrimKind::Both.apply(s);
            assert_eq!(TrimKind::Both.apply(once), once);
        }
    }

    #[test]
    fn interior_whitespace_is_kept() {
        assert_eq!(TrimKind::Both.apply("  New York  "), "New York");
    }

    #[test]
    fn map_from_columns_requires_aligned_lengths() {
        let err = TrimMap::from_columns(&["a".into(), "b".into()], &[TrimKind::Both]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn absent_fields_are_untrimmed_by_default() {
        let map = TrimMap::from_columns(&["a".into()], &[TrimKind::Both]).unwrap();
        assert_eq!(map.apply("a", " x "), "x");
        assert_eq!(map.apply("b", " x "), " x ");
        assert_eq!(map.kind_for("b"), TrimKind::None);
    }

    #[test]
    fn fallback_applies_to_unlisted_fields() {
        let map = TrimMap::from_columns(&["a".into()], &[TrimKind::None])
            .unwrap()
            .with_default(TrimKind::End);
        assert_eq!(map.apply("a", " x "), " x ");
        assert_eq!(map.apply("b", " x "), " x");
    }

    #[test]
    fn parses_config_tokens() {
        assert_eq!("both".parse::<TrimKind>().unwrap(), TrimKind::Both);
        assert_eq!("BEGIN".parse::<TrimKind>().unwrap(), TrimKind::Begin);
        assert!("left".parse::<TrimKind>().is_err());
    }
}
