//! Error types for archive operations

use crate::config::Platform;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Archive operation result type
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors raised while locating or decoding a resource.
///
/// None of these are retried by the archive itself: the container is a
/// static asset shipped with the game, so any failure means either a wrong
/// installation or a decoder defect. A resource is returned complete or
/// not at all.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// I/O error while reading or seeking an open file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A read ran past the end of the stream
    #[error("Unexpected end of stream at offset {position:#x} (wanted {wanted} bytes)")]
    UnexpectedEof {
        /// Stream position where the read started
        position: u64,
        /// Number of bytes requested
        wanted: usize,
    },

    /// The directory index was scanned to the end without a match
    #[error("Could not find file '{0}'")]
    FileNotFound(String),

    /// A container file could not be opened
    #[error("Could not open {}: {source}", path.display())]
    ResourceNotFound {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying open error
        #[source]
        source: io::Error,
    },

    /// The matched entry addresses a sub-file group
    #[error(
        "Multi-part files not yet handled: '{name}' has {sub_file_count} sub-files \
         (requested index {sub_file_index})"
    )]
    MultiPartNotSupported {
        /// Name of the matched entry
        name: String,
        /// Number of sub-files in the group
        sub_file_count: u16,
        /// Requested sub-file index
        sub_file_index: u16,
    },

    /// Compressed input ended before the expected output was produced
    #[error("Truncated LZSS input: expected {expected} bytes, produced {produced}")]
    TruncatedInput {
        /// Requested output length
        expected: usize,
        /// Bytes produced before input ran out
        produced: usize,
    },

    /// Compressed input is malformed
    #[error("Corrupt LZSS stream: {0}")]
    CorruptStream(String),

    /// Sound name not present in the Macintosh audio name table
    #[error("Could not find '{0}' in 'Star Trek Audio'")]
    SoundNotFound(String),

    /// Sound name is known but its blob slot has not been mapped
    #[error("File mapping for '{0}' has not yet been found")]
    UnmappedSound(String),

    /// Operation only exists on another platform
    #[error("{operation} is not available on {platform}")]
    UnsupportedPlatform {
        /// Operation that was requested
        operation: &'static str,
        /// Platform of the open archive
        platform: Platform,
    },

    /// A loose-file name that would leave the data directory
    #[error("Invalid resource name '{0}'")]
    InvalidResourceName(String),

    /// The flat-file layout has no directory to enumerate
    #[error("Archive layout has no directory index")]
    NoDirectory,

    /// Structured record decoding failed
    #[error("Binary format error: {0}")]
    BinRead(binrw::Error),
}

impl From<binrw::Error> for ArchiveError {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Io(e) => Self::Io(e),
            other => Self::BinRead(other),
        }
    }
}

impl ArchiveError {
    /// Check if the error means the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::ResourceNotFound { .. } | Self::SoundNotFound(_)
        )
    }

    /// Check if the error indicates damaged container data
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedEof { .. }
                | Self::TruncatedInput { .. }
                | Self::CorruptStream(_)
                | Self::BinRead(_)
        )
    }
}
