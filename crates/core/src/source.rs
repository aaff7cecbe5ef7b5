// Random-access byte reader used by the renderer.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::Result;

/// Lazy reader over a seekable byte stream.
///
/// Every read seeks first, so nothing depends on where the previous read
/// left the cursor.
#[derive(Debug)]
pub struct ByteSource<R> {
    inner: R,
}

impl ByteSource<File> {
    /// Open `path` read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read + Seek> ByteSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read up to `len` bytes starting at `offset`.
    ///
    /// Returns fewer bytes at end of data and nothing at all when `offset`
    /// is past the end. Only genuine I/O failures are errors.
    pub fn read(&mut self, offset: u64, len: usize) -> Result<Vec<u8>> {
        self.inner.seek(SeekFrom::Start(offset))?;
        let mut buf = Vec::with_capacity(len);
        (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Current size of the underlying data in bytes.
    pub fn len(&mut self) -> Result<u64> {
        Ok(self.inner.seek(SeekFrom::End(0))?)
    }
}
