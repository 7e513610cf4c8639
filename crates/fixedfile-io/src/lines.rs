//! Bounded, line-oriented input.
//!
//! `LineSource` wraps any `BufRead` and hands out one line at a time with the
//! terminator (`\n` or `\r\n`) removed. Files are opened with a `BufReader` of
//! explicit capacity to bound the in-flight buffer.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub struct LineSource<R: BufRead> {
    inner: R,
    buf: String,
    lines_read: u64,
}

impl LineSource<BufReader<File>> {
    /// Open `path` with a read buffer of `capacity` bytes.
    pub fn open<P: AsRef<Path>>(path: P, capacity: usize) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::with_capacity(capacity, file)))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn from_reader(inner: R) -> Self {
        Self {
            inner,
            buf: String::new(),
            lines_read: 0,
        }
    }

    /// Next line without its terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.inner.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        if self.buf.ends_with('\n') {
            self.buf.pop();
            if self.buf.ends_with('\r') {
                self.buf.pop();
            }
        }
        self.lines_read += 1;
        Ok(Some(self.buf.clone()))
    }

    /// Number of lines handed out so far.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}
