//! Resource archive reader for Star Trek: 25th Anniversary and Judgment Rites
//!
//! The games keep nearly all of their assets in a pair of files: a
//! directory index of 8.3 names with packed locations, and a data container
//! of LZSS-compressed records. This crate resolves a logical resource name
//! to its fully decoded bytes for the PC, Amiga and Macintosh releases and
//! for the demos.
//!
//! ```no_run
//! use startrek_archive::{ArchiveConfig, ResourceArchive};
//!
//! let archive = ResourceArchive::new(ArchiveConfig::new("/games/st25"));
//! let palette = archive.open_file("BRIDGE.PAL")?;
//! println!("{} is {} bytes", palette.name(), palette.len());
//! # Ok::<(), startrek_archive::ArchiveError>(())
//! ```

#![warn(missing_docs)]

pub mod archive;
pub mod cache;
pub mod config;
pub mod cursor;
pub mod data_file;
pub mod detection;
pub mod directory;
pub mod error;
pub mod layout;
pub mod location;
pub mod lzss;
pub mod mac_audio;
pub mod resource;

pub use archive::ResourceArchive;
pub use config::{ArchiveConfig, GameFeatures, GameType, Language, Platform};
pub use error::{ArchiveError, Result};
pub use resource::Resource;

// Re-export commonly used types
pub use cache::CacheStats;
pub use cursor::ByteCursor;
pub use detection::{GameDescription, KNOWN_GAMES, detect_game};
pub use directory::{DirectoryEntry, DirectoryReader};
pub use layout::{ArchiveHandle, LayoutKind};
pub use location::Location;
