//! Slice a line into uniform fixed-length chunks.
//!
//! Widths are counted in characters, not bytes, so multi-byte text keeps its
//! column alignment. The last chunk may be shorter than `length`.

use crate::error::{Error, Result};

/// Split `line` into consecutive chunks of `length` characters.
///
/// An empty line yields no chunks. No trimming or schema validation happens
/// here.
pub fn split(line: &str, length: usize) -> Result<Vec<&str>> {
    check_length(length)?;

    let mut chunks = Vec::with_capacity(chunk_count(line, length));
    let mut start = 0;
    let mut taken = 0;
    for (idx, _) in line.char_indices() {
        if taken == length {
            chunks.push(&line[start..idx]);
            start = idx;
            taken = 0;
        }
        taken += 1;
    }
    if taken > 0 {
        chunks.push(&line[start..]);
    }
    Ok(chunks)
}

/// Number of chunks `split` would produce: `ceil(chars / length)`.
pub fn chunk_count(line: &str, length: usize) -> usize {
    if length == 0 {
        return 0;
    }
    line.chars().count().div_ceil(length)
}

pub(crate) fn check_length(length: usize) -> Result<()> {
    if length < 1 {
        return Err(Error::InvalidConfiguration(format!(
            "field length must be at least 1, got {length}"
        )));
    }
    Ok(())
}
