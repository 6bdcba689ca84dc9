//! Sequential reader for the directory index
//!
//! The index is a flat run of fixed-size records with no header and no
//! count; it ends where the file ends. Every record starts with an 8-byte
//! base name and a 3-byte extension, both zero padded. What follows depends
//! on the release:
//!
//! ```text
//! full game:  name[8] ext[3] location[3]                        (14 bytes)
//! demo:       name[8] ext[3] reserved[1] count[2] offset[4] size[2]  (20 bytes)
//! ```
//!
//! Demo fields are always little-endian. The full-game location is a packed
//! 24-bit descriptor (see [`crate::location`]) stored most significant byte
//! first on the Amiga and least significant byte first elsewhere.

use crate::cursor::ByteCursor;
use crate::error::{ArchiveError, Result};
use crate::location::Location;
use binrw::{BinRead, Endian};
use std::io::{Read, Seek};
use tracing::trace;

/// Length of the base name field
pub const BASE_NAME_LEN: usize = 8;
/// Length of the extension field
pub const EXTENSION_LEN: usize = 3;
/// Size of a full-game directory record
pub const FULL_ENTRY_SIZE: usize = BASE_NAME_LEN + EXTENSION_LEN + 3;
/// Size of a demo directory record
pub const DEMO_ENTRY_SIZE: usize = BASE_NAME_LEN + EXTENSION_LEN + DEMO_FIELDS_SIZE;

const DEMO_FIELDS_SIZE: usize = 9;

/// Fields following the name in a demo record
#[derive(Debug, Clone, Copy, BinRead)]
#[br(little)]
struct DemoEntryFields {
    _reserved: u8,
    file_count: u16,
    offset: u32,
    uncompressed_size: u16,
}

/// One record of the directory index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Reconstructed 8.3 name
    pub name: String,
    /// Where the record lives in the data file
    pub location: Location,
    /// Payload size carried by demo records; the full game keeps sizes in the data file
    pub uncompressed_size: Option<u16>,
}

impl DirectoryEntry {
    /// Whether this entry matches a requested name or wildcard pattern
    pub fn matches(&self, pattern: &str) -> bool {
        name_matches(pattern, &self.name)
    }
}

/// Build the display name from the raw name fields
///
/// Zero padding and other control bytes are dropped from both parts; the
/// separating dot is always present.
pub fn assemble_name(base: &[u8; BASE_NAME_LEN], extension: &[u8; EXTENSION_LEN]) -> String {
    let keep = |b: &&u8| !b.is_ascii_control();
    let mut name = String::with_capacity(BASE_NAME_LEN + 1 + EXTENSION_LEN);
    name.extend(base.iter().filter(keep).map(|&b| char::from(b)));
    name.push('.');
    name.extend(extension.iter().filter(keep).map(|&b| char::from(b)));
    name
}

/// Case-insensitive wildcard match of `name` against `pattern`
///
/// `*` matches any run of characters, `?` any single character and `#`
/// any single digit. Everything else compares literally.
pub fn name_matches(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0usize, 0usize);
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some('?') => {
                p += 1;
                n += 1;
            }
            Some('#') if name[n].is_ascii_digit() => {
                p += 1;
                n += 1;
            }
            Some(c) if c.eq_ignore_ascii_case(&name[n]) => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    n = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Lazy sequence of directory entries read from the current position
pub struct DirectoryReader<R: Read + Seek> {
    cursor: ByteCursor<R>,
    is_demo: bool,
    byte_order: Endian,
    done: bool,
}

impl<R: Read + Seek> DirectoryReader<R> {
    /// Create a reader that starts at the cursor's current position
    pub fn new(cursor: ByteCursor<R>, is_demo: bool, byte_order: Endian) -> Self {
        Self {
            cursor,
            is_demo,
            byte_order,
            done: false,
        }
    }

    /// Scan forward until the first entry matching `pattern`
    ///
    /// Duplicate names are never disambiguated; the earliest entry wins.
    pub fn find_entry(&mut self, pattern: &str) -> Result<DirectoryEntry> {
        for entry in self.by_ref() {
            let entry = entry?;
            if entry.matches(pattern) {
                return Ok(entry);
            }
        }
        Err(ArchiveError::FileNotFound(pattern.to_string()))
    }

    /// Give back the underlying cursor
    pub fn into_inner(self) -> ByteCursor<R> {
        self.cursor
    }

    fn read_entry(&mut self) -> Result<DirectoryEntry> {
        let base = self.cursor.read_array::<BASE_NAME_LEN>()?;
        let extension = self.cursor.read_array::<EXTENSION_LEN>()?;
        let name = assemble_name(&base, &extension);

        if self.is_demo {
            let fields: DemoEntryFields = self
                .cursor
                .read_record(Endian::Little, DEMO_FIELDS_SIZE)?;
            Ok(DirectoryEntry {
                name,
                location: Location {
                    offset: fields.offset,
                    sub_file_count: fields.file_count,
                },
                uncompressed_size: Some(fields.uncompressed_size),
            })
        } else {
            let packed = self.cursor.read_u24(self.byte_order)?;
            Ok(DirectoryEntry {
                name,
                location: Location::resolve(packed),
                uncompressed_size: None,
            })
        }
    }
}

impl<R: Read + Seek> Iterator for DirectoryReader<R> {
    type Item = Result<DirectoryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor.is_eof() || self.cursor.has_failed() {
            return None;
        }

        let position = self.cursor.position();
        match self.read_entry() {
            Ok(entry) => {
                trace!(
                    "Directory entry at {:#x}: {} -> offset {:#x}, {} sub-file(s)",
                    position, entry.name, entry.location.offset, entry.location.sub_file_count
                );
                Some(Ok(entry))
            }
            // A short trailing record means the directory is exhausted
            Err(ArchiveError::UnexpectedEof { .. }) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
