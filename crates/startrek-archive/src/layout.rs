//! Physical layout of a release's resource container
//!
//! The [`ArchiveHandle`] is derived once from the configuration and tells
//! every other component which files to open, where the directory starts
//! and which byte order multi-byte container fields use.

use crate::config::{ArchiveConfig, GameType, Platform};
use crate::error::{ArchiveError, Result};
use binrw::Endian;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Directory index of the PC releases
pub const PC_INDEX_FILE: &str = "data.dir";
/// Data container of the PC releases
pub const PC_DATA_FILE: &str = "data.001";
/// Directory index of the Amiga release
pub const AMIGA_INDEX_FILE: &str = "data000.dir";
/// Data container of the Amiga release
pub const AMIGA_DATA_FILE: &str = "data.000";

/// Fixed offsets inside the Macintosh resource-fork files
///
/// These describe the single known Macintosh build. They are seek targets,
/// not the result of parsing the resource map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacResourceForkLayout {
    /// Resource fork holding the directory index
    pub index_file_name: &'static str,
    /// Data fork holding the compressed records
    pub data_file_name: &'static str,
    /// Start of the directory inside the resource fork
    pub directory_offset: u64,
    /// File holding the sound resources
    pub audio_file_name: &'static str,
    /// Start of the length-prefixed sound name table
    pub audio_name_table_offset: u64,
    /// Start of the size-prefixed sound blob table
    pub audio_blob_table_offset: u64,
    /// Number of names in the sound name table
    pub audio_file_count: usize,
    /// Blob slot for each name index, -1 where the slot is unknown
    pub audio_slots: &'static [i16],
}

/// Blob slot of each entry in the Macintosh sound name table
const MAC_AUDIO_SLOTS: [i16; 139] = [
    -1, -1, -1, -1, -1, -1, -1, 1, -1, 2, 3, 4, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, 3, 4, -1, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, 0, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
];

/// Layout of the English 25th Anniversary Macintosh release
pub const MAC_ST25_LAYOUT: MacResourceForkLayout = MacResourceForkLayout {
    index_file_name: "._Star Trek Data",
    data_file_name: "Star Trek Data",
    directory_offset: 0x3AD7,
    audio_file_name: "Star Trek Audio",
    audio_name_table_offset: 0x179AD4,
    audio_blob_table_offset: 0xD74C,
    audio_file_count: MAC_AUDIO_SLOTS.len(),
    audio_slots: &MAC_AUDIO_SLOTS,
};

/// Locate `name` inside `dir`, ignoring ASCII case
///
/// DOS installs ship upper-case names (`DATA.DIR`). An exact match wins;
/// when nothing matches, the exact path is returned so that opening it
/// reports the expected name.
pub fn find_file(dir: &Path, name: &str) -> PathBuf {
    let exact = dir.join(name);
    if exact.exists() {
        return exact;
    }

    fs::read_dir(dir)
        .ok()
        .and_then(|entries| {
            entries.flatten().find(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
            })
        })
        .map_or(exact, |entry| entry.path())
}

/// How resources are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Loose files in the data directory, no container
    FlatFiles,
    /// Directory index plus data container
    Container,
}

/// Resolved container layout for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveHandle {
    /// Release platform
    pub platform: Platform,
    /// Demo index layout with uncompressed payloads
    pub is_demo: bool,
    /// Container or loose files
    pub kind: LayoutKind,
    /// Directory holding the game files
    pub root: PathBuf,
    /// Directory index file name
    pub index_file_name: &'static str,
    /// Data container file name
    pub data_file_name: &'static str,
    /// Where the directory starts inside the index file
    pub directory_offset: u64,
}

impl ArchiveHandle {
    /// Derive the layout from a configuration
    pub fn resolve(config: &ArchiveConfig) -> Self {
        let is_demo = config.is_demo();

        // The Judgment Rites demo ships its files outside any container
        let kind = if config.game_type == GameType::JudgmentRites && is_demo {
            LayoutKind::FlatFiles
        } else {
            LayoutKind::Container
        };

        let (index_file_name, data_file_name, directory_offset) = match config.platform {
            Platform::Amiga => (AMIGA_INDEX_FILE, AMIGA_DATA_FILE, 0),
            Platform::Macintosh => (
                MAC_ST25_LAYOUT.index_file_name,
                MAC_ST25_LAYOUT.data_file_name,
                MAC_ST25_LAYOUT.directory_offset,
            ),
            Platform::Pc => (PC_INDEX_FILE, PC_DATA_FILE, 0),
        };

        Self {
            platform: config.platform,
            is_demo,
            kind,
            root: config.data_path.clone(),
            index_file_name,
            data_file_name,
            directory_offset,
        }
    }

    /// Byte order of multi-byte container fields
    pub fn byte_order(&self) -> Endian {
        match self.platform {
            Platform::Amiga => Endian::Big,
            Platform::Pc | Platform::Macintosh => Endian::Little,
        }
    }

    /// Full path of the directory index
    pub fn index_path(&self) -> PathBuf {
        find_file(&self.root, self.index_file_name)
    }

    /// Full path of the data container
    pub fn data_path(&self) -> PathBuf {
        find_file(&self.root, self.data_file_name)
    }

    /// Full path of the Macintosh sound file
    pub fn audio_path(&self) -> PathBuf {
        find_file(&self.root, MAC_ST25_LAYOUT.audio_file_name)
    }

    /// Full path of a loose file
    ///
    /// Only plain file names directly inside the data directory are
    /// accepted.
    pub fn flat_path(&self, name: &str) -> Result<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => {
                Ok(find_file(&self.root, name))
            }
            _ => Err(ArchiveError::InvalidResourceName(name.to_string())),
        }
    }

    /// Directory holding the game files
    pub fn root(&self) -> &Path {
        &self.root
    }
}
