//! Record extraction from the data container
//!
//! Full-game records start with one size header per sub-file, each
//! immediately followed by that sub-file's LZSS payload:
//!
//! ```text
//! [uncompressed_size: u16][compressed_size: u16][payload; compressed_size] ...
//! ```
//!
//! The header fields are big-endian on the Amiga and little-endian
//! elsewhere. Demo records have no header at all: the size comes from the
//! directory entry and the payload is stored uncompressed.

use crate::cursor::ByteCursor;
use crate::directory::DirectoryEntry;
use crate::error::{ArchiveError, Result};
use crate::location::Location;
use crate::lzss;
use binrw::{BinRead, Endian};
use std::io::{Read, Seek};
use tracing::{debug, trace};

const SUB_FILE_HEADER_SIZE: usize = 4;

/// Size header preceding each compressed sub-file
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead)]
pub struct SubFileHeader {
    /// Size after decompression
    pub uncompressed_size: u16,
    /// Size of the LZSS payload that follows
    pub compressed_size: u16,
}

/// Reads records out of an open data container
pub struct DataFileReader<R: Read + Seek> {
    cursor: ByteCursor<R>,
    byte_order: Endian,
}

impl<R: Read + Seek> DataFileReader<R> {
    /// Create a reader using the platform's header byte order
    pub fn new(cursor: ByteCursor<R>, byte_order: Endian) -> Self {
        Self { cursor, byte_order }
    }

    /// Read the record a directory entry points at
    ///
    /// Entries from a demo index carry their size and are stored raw;
    /// all others are decompressed.
    pub fn read_entry(&mut self, entry: &DirectoryEntry, sub_file_index: u16) -> Result<Vec<u8>> {
        match entry.uncompressed_size {
            Some(size) => {
                if entry.location.sub_file_count != 1 || sub_file_index != 0 {
                    return Err(ArchiveError::MultiPartNotSupported {
                        name: entry.name.clone(),
                        sub_file_count: entry.location.sub_file_count,
                        sub_file_index,
                    });
                }
                self.read_raw(entry.location.offset, usize::from(size))
            }
            None => self.read_compressed(&entry.name, entry.location, sub_file_index),
        }
    }

    /// Read `size` uncompressed bytes at `offset`
    pub fn read_raw(&mut self, offset: u32, size: usize) -> Result<Vec<u8>> {
        self.cursor.seek_to(u64::from(offset))?;
        self.cursor.read_bytes(size)
    }

    /// Walk the sub-file headers at `location` and decompress one sub-file
    ///
    /// Only the first sub-file of a group can be selected.
    pub fn read_compressed(
        &mut self,
        name: &str,
        location: Location,
        sub_file_index: u16,
    ) -> Result<Vec<u8>> {
        if sub_file_index != 0 || sub_file_index >= location.sub_file_count {
            return Err(ArchiveError::MultiPartNotSupported {
                name: name.to_string(),
                sub_file_count: location.sub_file_count,
                sub_file_index,
            });
        }

        self.cursor.seek_to(u64::from(location.offset))?;

        for index in 0..location.sub_file_count {
            let header: SubFileHeader = self
                .cursor
                .read_record(self.byte_order, SUB_FILE_HEADER_SIZE)?;

            if index == sub_file_index {
                debug!(
                    "Opening file '{}' ({} -> {} bytes at {:#x})",
                    name, header.compressed_size, header.uncompressed_size, location.offset
                );
                let compressed = self.cursor.read_bytes(usize::from(header.compressed_size))?;
                return lzss::decompress(&compressed, usize::from(header.uncompressed_size));
            }

            trace!("Skipping sub-file {} of '{}'", index, name);
            self.cursor.skip(i64::from(header.compressed_size))?;
        }

        Err(ArchiveError::FileNotFound(name.to_string()))
    }

    /// Give back the underlying cursor
    pub fn into_inner(self) -> ByteCursor<R> {
        self.cursor
    }
}
