//! File-backed byte source

use super::ByteSource;
use crate::error::Result;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

/// A byte source backed by a file opened in read-only mode
///
/// The file handle is owned by the source and closed when the source is
/// dropped.
pub struct FileSource {
    file: File,
}

impl FileSource {
    /// Open the file at `path` for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(FileSource { file })
    }
}

impl ByteSource for FileSource {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        // Retry partial reads so a short return always means
        // end-of-stream or a hard I/O error.
        let mut total = 0;
        while total < buf.len() {
            match self.file.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        total
    }

    fn seek_relative(&mut self, offset: i32) -> bool {
        self.file.seek(SeekFrom::Current(offset as i64)).is_ok()
    }
}
