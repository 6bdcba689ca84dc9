//! Bounds-checked sequential reader over a seekable byte source
//!
//! Every multi-byte read names its byte order at the call site because the
//! container mixes little- and big-endian fields depending on platform.
//! Reads never run past the end of the source: a short read reports
//! [`ArchiveError::UnexpectedEof`] and leaves the position untouched, which
//! is how the directory scan detects that it has run out of entries.

use crate::error::{ArchiveError, Result};
use binrw::{BinRead, Endian};
use std::io::{self, Read, Seek, SeekFrom};

/// Sequential, seekable reader with explicit endianness
#[derive(Debug)]
pub struct ByteCursor<R: Read + Seek> {
    inner: R,
    position: u64,
    len: u64,
    eof: bool,
    failed: bool,
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Wrap a reader, keeping its current position
    pub fn new(mut inner: R) -> Result<Self> {
        let position = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(position))?;

        Ok(Self {
            inner,
            position,
            len,
            eof: false,
            failed: false,
        })
    }

    /// Current absolute position
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total length of the source
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Check if the source is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes left between the position and the end
    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.position)
    }

    /// End-of-stream test: true once a read fell short or nothing is left
    pub fn is_eof(&self) -> bool {
        self.eof || self.position >= self.len
    }

    /// Error test: true once an I/O failure other than end-of-stream occurred
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Seek to an absolute position
    pub fn seek_to(&mut self, position: u64) -> Result<()> {
        let new_pos = self
            .inner
            .seek(SeekFrom::Start(position))
            .map_err(|e| self.fail(e))?;
        self.position = new_pos;
        self.eof = false;
        Ok(())
    }

    /// Seek relative to the current position
    pub fn skip(&mut self, delta: i64) -> Result<()> {
        let new_pos = self
            .inner
            .seek(SeekFrom::Current(delta))
            .map_err(|e| self.fail(e))?;
        self.position = new_pos;
        self.eof = false;
        Ok(())
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// Read a 16-bit integer
    pub fn read_u16(&mut self, endian: Endian) -> Result<u16> {
        self.read_value(endian, 2)
    }

    /// Read a 32-bit integer
    pub fn read_u32(&mut self, endian: Endian) -> Result<u32> {
        self.read_value(endian, 4)
    }

    /// Read a packed 24-bit integer
    ///
    /// Big endian assembles the first byte as the most significant one,
    /// little endian as the least significant one.
    pub fn read_u24(&mut self, endian: Endian) -> Result<u32> {
        let [a, b, c] = self.read_array::<3>()?;
        Ok(match endian {
            Endian::Big => u32::from_be_bytes([0, a, b, c]),
            Endian::Little => u32::from_le_bytes([a, b, c, 0]),
        })
    }

    /// Read a fixed number of raw bytes
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Read `length` raw bytes
    pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        self.check_available(length)?;
        let mut buf = vec![0u8; length];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Read a fixed-size binary record
    pub fn read_record<T>(&mut self, endian: Endian, size: usize) -> Result<T>
    where
        T: for<'a> BinRead<Args<'a> = ()>,
    {
        self.read_value(endian, size)
    }

    /// Give back the wrapped reader
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_value<T>(&mut self, endian: Endian, size: usize) -> Result<T>
    where
        T: for<'a> BinRead<Args<'a> = ()>,
    {
        self.check_available(size)?;
        let value = T::read_options(&mut self.inner, endian, ()).map_err(|e| match e {
            binrw::Error::Io(io_err) => self.io_error(io_err, size),
            other => ArchiveError::from(other),
        })?;
        self.position += size as u64;
        Ok(value)
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.check_available(buf.len())?;
        if let Err(e) = self.inner.read_exact(buf) {
            return Err(self.io_error(e, buf.len()));
        }
        self.position += buf.len() as u64;
        Ok(())
    }

    fn check_available(&mut self, wanted: usize) -> Result<()> {
        if self.remaining() < wanted as u64 {
            self.eof = true;
            return Err(ArchiveError::UnexpectedEof {
                position: self.position,
                wanted,
            });
        }
        Ok(())
    }

    fn io_error(&mut self, err: io::Error, wanted: usize) -> ArchiveError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            self.eof = true;
            ArchiveError::UnexpectedEof {
                position: self.position,
                wanted,
            }
        } else {
            self.fail(err)
        }
    }

    fn fail(&mut self, err: io::Error) -> ArchiveError {
        self.failed = true;
        ArchiveError::Io(err)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_mixed_endian_reads() {
        let data = [0x34, 0x12, 0x12, 0x34, 0x78, 0x56, 0x34, 0x12];
        let mut cursor = ByteCursor::new(Cursor::new(&data[..])).unwrap();

        assert_eq!(cursor.read_u16(Endian::Little).unwrap(), 0x1234);
        assert_eq!(cursor.read_u16(Endian::Big).unwrap(), 0x1234);
        assert_eq!(cursor.read_u32(Endian::Little).unwrap(), 0x1234_5678);
        assert_eq!(cursor.position(), 8);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_read_u24_byte_order() {
        let data = [0x01, 0x02, 0x03, 0x01, 0x02, 0x03];
        let mut cursor = ByteCursor::new(Cursor::new(&data[..])).unwrap();

        assert_eq!(cursor.read_u24(Endian::Little).unwrap(), 0x030201);
        assert_eq!(cursor.read_u24(Endian::Big).unwrap(), 0x010203);
    }

    #[test]
    fn test_short_read_is_eof_not_garbage() {
        let data = [0xAA];
        let mut cursor = ByteCursor::new(Cursor::new(&data[..])).unwrap();

        let err = cursor.read_u16(Endian::Little).unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::UnexpectedEof {
                position: 0,
                wanted: 2
            }
        ));
        assert!(cursor.is_eof());
        assert!(!cursor.has_failed());
        assert_eq!(cursor.position(), 0);

        // The byte that is there can still be read after rewinding
        cursor.seek_to(0).unwrap();
        assert!(!cursor.is_eof());
        assert_eq!(cursor.read_u8().unwrap(), 0xAA);
    }

    #[test]
    fn test_seek_and_skip() {
        let data: Vec<u8> = (0..16).collect();
        let mut cursor = ByteCursor::new(Cursor::new(data)).unwrap();

        cursor.seek_to(4).unwrap();
        assert_eq!(cursor.read_u8().unwrap(), 4);
        cursor.skip(3).unwrap();
        assert_eq!(cursor.read_u8().unwrap(), 8);
        cursor.skip(-2).unwrap();
        assert_eq!(cursor.read_u8().unwrap(), 7);
        assert_eq!(cursor.remaining(), 8);
        assert_eq!(cursor.read_bytes(3).unwrap(), vec![8, 9, 10]);
    }

    #[test]
    fn test_keeps_initial_position() {
        let data: Vec<u8> = (0..8).collect();
        let mut inner = Cursor::new(data);
        inner.set_position(5);

        let mut cursor = ByteCursor::new(inner).unwrap();
        assert_eq!(cursor.position(), 5);
        assert_eq!(cursor.len(), 8);
        assert_eq!(cursor.read_u8().unwrap(), 5);
    }

    #[test]
    fn test_empty_source() {
        let cursor = ByteCursor::new(Cursor::new(Vec::new())).unwrap();
        assert!(cursor.is_empty());
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_oversized_read_checks_bounds_first() {
        let data = [0u8; 4];
        let mut cursor = ByteCursor::new(Cursor::new(&data[..])).unwrap();

        let err = cursor.read_bytes(u32::MAX as usize).unwrap_err();
        assert!(matches!(err, ArchiveError::UnexpectedEof { position: 0, .. }));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_io_failure_is_not_eof() {
        let mut cursor = ByteCursor::new(FailingSource::new(64)).unwrap();

        let err = cursor.read_u16(Endian::Little).unwrap_err();
        assert!(matches!(err, ArchiveError::Io(_)));
        assert!(cursor.has_failed());
        assert!(!cursor.is_eof());

        let err = cursor.read_bytes(4).unwrap_err();
        assert!(matches!(err, ArchiveError::Io(_)));
        assert!(!cursor.is_eof());
    }

    /// Seekable source whose reads always fail with a non-EOF error
    pub(crate) struct FailingSource {
        len: u64,
        position: u64,
    }

    impl FailingSource {
        pub(crate) fn new(len: u64) -> Self {
            Self { len, position: 0 }
        }
    }

    impl Read for FailingSource {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("simulated disk failure"))
        }
    }

    impl Seek for FailingSource {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.position = match pos {
                SeekFrom::Start(offset) => offset,
                SeekFrom::End(delta) => self.len.saturating_add_signed(delta),
                SeekFrom::Current(delta) => self.position.saturating_add_signed(delta),
            };
            Ok(self.position)
        }
    }
}
