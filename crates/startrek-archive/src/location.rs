//! Packed location descriptors from the full-game directory index
//!
//! Each full-game directory entry ends in a 24-bit descriptor. Bit 23 marks
//! a sub-file group: bits 16-22 then carry the number of sub-files and bits
//! 0-15 the offset. Without the flag the whole value is the offset.
//! Byte order only matters while assembling the three raw bytes; the bit
//! layout is the same on every platform.

/// Flag marking a grouped descriptor
pub const GROUP_FLAG: u32 = 1 << 23;

const COUNT_SHIFT: u32 = 16;
const COUNT_MASK: u32 = 0x7F;
const GROUP_OFFSET_MASK: u32 = 0xFFFF;
const DESCRIPTOR_MASK: u32 = 0x00FF_FFFF;

/// Decoded location of a data record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Byte offset of the record inside the data file
    pub offset: u32,
    /// Number of sub-files stored at the offset
    pub sub_file_count: u16,
}

impl Location {
    /// A single-record location
    pub const fn single(offset: u32) -> Self {
        Self {
            offset,
            sub_file_count: 1,
        }
    }

    /// Decode a packed 24-bit descriptor
    ///
    /// A grouped descriptor with a zero count is treated as a single record.
    pub const fn resolve(packed: u32) -> Self {
        let packed = packed & DESCRIPTOR_MASK;
        if packed & GROUP_FLAG != 0 {
            let count = ((packed >> COUNT_SHIFT) & COUNT_MASK) as u16;
            Self {
                offset: packed & GROUP_OFFSET_MASK,
                sub_file_count: if count == 0 { 1 } else { count },
            }
        } else {
            Self::single(packed)
        }
    }

    /// Whether more than one sub-file lives at this location
    pub const fn is_group(&self) -> bool {
        self.sub_file_count > 1
    }
}
