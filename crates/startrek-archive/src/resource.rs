//! In-memory byte stream handed to resource consumers

use std::io::{Cursor, Read, Seek, SeekFrom};

/// A fully decoded resource, positioned at offset 0
///
/// Consumers parse their own sub-fields from it, for example by wrapping
/// it in a [`crate::ByteCursor`] with the platform's byte order.
#[derive(Debug, Clone)]
pub struct Resource {
    name: String,
    data: Cursor<Vec<u8>>,
}

impl Resource {
    /// Wrap decoded bytes
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data: Cursor::new(data),
        }
    }

    /// Name the resource was requested under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total length in bytes
    pub fn len(&self) -> usize {
        self.data.get_ref().len()
    }

    /// Check if the resource is empty
    pub fn is_empty(&self) -> bool {
        self.data.get_ref().is_empty()
    }

    /// All bytes, independent of the read position
    pub fn as_bytes(&self) -> &[u8] {
        self.data.get_ref()
    }

    /// Take the bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.data.into_inner()
    }
}

impl Read for Resource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.data.read(buf)
    }
}

impl Seek for Resource {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.data.seek(pos)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cursor::ByteCursor;
    use binrw::Endian;

    #[test]
    fn test_stream_starts_at_zero() {
        let mut resource = Resource::new("BRIDGE.BMP", vec![1, 2, 3, 4]);
        assert_eq!(resource.name(), "BRIDGE.BMP");
        assert_eq!(resource.len(), 4);
        assert_eq!(resource.stream_position().unwrap(), 0);

        let mut buf = [0u8; 2];
        resource.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [1, 2]);
        assert_eq!(resource.as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_consumer_reads_bitmap_header() {
        // x, y, width, height as big-endian words (Amiga bitmap)
        let data = vec![0, 10, 0, 20, 0, 2, 0, 1, 0xAA, 0xBB];
        let mut cursor = ByteCursor::new(Resource::new("BRIDGE.BMP", data)).unwrap();

        let header: Vec<u16> = (0..4)
            .map(|_| cursor.read_u16(Endian::Big).unwrap())
            .collect();
        assert_eq!(header, vec![10, 20, 2, 1]);
        assert_eq!(cursor.read_bytes(2).unwrap(), vec![0xAA, 0xBB]);
    }
}
