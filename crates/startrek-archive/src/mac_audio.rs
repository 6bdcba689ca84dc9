//! Sound lookup in the Macintosh `Star Trek Audio` file
//!
//! The file is addressed through fixed offsets of the one known build
//! rather than by parsing its resource map:
//!
//! - A name table of length-prefixed strings (1-byte length)
//! - A blob table of `u32` big-endian size-prefixed payloads
//!
//! A name's position in the name table maps through a slot table to the
//! position of its payload in the blob table.

use crate::cursor::ByteCursor;
use crate::error::{ArchiveError, Result};
use crate::layout::MacResourceForkLayout;
use binrw::Endian;
use std::io::{Read, Seek};
use tracing::{debug, trace};

/// Reads sounds from an open `Star Trek Audio` file
pub struct MacAudioTable<R: Read + Seek> {
    cursor: ByteCursor<R>,
    layout: MacResourceForkLayout,
}

impl<R: Read + Seek> MacAudioTable<R> {
    /// Create a table reader for the given build layout
    pub fn new(cursor: ByteCursor<R>, layout: MacResourceForkLayout) -> Self {
        Self { cursor, layout }
    }

    /// Position of `name` in the name table (exact, case-insensitive)
    pub fn name_index(&mut self, name: &str) -> Result<usize> {
        self.cursor.seek_to(self.layout.audio_name_table_offset)?;

        for index in 0..self.layout.audio_file_count {
            let length = self.cursor.read_u8()?;
            let raw = self.cursor.read_bytes(usize::from(length))?;
            let candidate: String = raw.iter().map(|&b| char::from(b)).collect();
            trace!("Audio name {}: {}", index, candidate);

            if candidate.eq_ignore_ascii_case(name) {
                return Ok(index);
            }
        }

        Err(ArchiveError::SoundNotFound(name.to_string()))
    }

    /// Read the payload of a sound
    pub fn read_sound(&mut self, name: &str) -> Result<Vec<u8>> {
        let index = self.name_index(name)?;
        let slot = self
            .layout
            .audio_slots
            .get(index)
            .copied()
            .and_then(|slot| u16::try_from(slot).ok())
            .ok_or_else(|| ArchiveError::UnmappedSound(name.to_string()))?;

        debug!("Sound '{}' is name {} and blob slot {}", name, index, slot);

        self.cursor.seek_to(self.layout.audio_blob_table_offset)?;
        for current in 0..=slot {
            let size = self.cursor.read_u32(Endian::Big)?;
            if current == slot {
                return self.cursor.read_bytes(size as usize);
            }
            self.cursor.skip(i64::from(size))?;
        }

        Err(ArchiveError::UnmappedSound(name.to_string()))
    }
}
