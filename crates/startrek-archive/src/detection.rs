//! Identification of known releases
//!
//! Each release is recognised by the MD5 of the first 5000 bytes of one
//! of its files.

use crate::config::{GameFeatures, GameType, Language, Platform};
use crate::error::{ArchiveError, Result};
use crate::layout::find_file;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace};

/// Number of leading bytes hashed for detection
pub const DETECTION_BYTES: u64 = 5000;

/// A known release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameDescription {
    /// Short game id, `st25` or `stjr`
    pub game_id: &'static str,
    /// Release qualifier such as `Demo`, empty for full releases
    pub extra: &'static str,
    /// File hashed for detection
    pub detection_file: &'static str,
    /// Lower-case hex MD5 of the first [`DETECTION_BYTES`] bytes
    pub md5: &'static str,
    /// Release language
    pub language: Language,
    /// Release platform
    pub platform: Platform,
    /// Which game
    pub game_type: GameType,
    /// Release feature flags
    pub features: GameFeatures,
}

/// Every release the archive knows how to open
pub const KNOWN_GAMES: &[GameDescription] = &[
    GameDescription {
        game_id: "st25",
        extra: "",
        detection_file: "data.001",
        md5: "57040928a0f374281aa86ba4e7db8444",
        language: Language::English,
        platform: Platform::Pc,
        game_type: GameType::TwentyFifthAnniversary,
        features: GameFeatures::NONE,
    },
    GameDescription {
        game_id: "st25",
        extra: "",
        detection_file: "data.000",
        md5: "f0918b6d096455ce2ae6dd5ef973292e",
        language: Language::English,
        platform: Platform::Amiga,
        game_type: GameType::TwentyFifthAnniversary,
        features: GameFeatures::NONE,
    },
    GameDescription {
        game_id: "st25",
        extra: "",
        detection_file: "data.000",
        md5: "70d0e374d5fa973e536dba0f42310672",
        language: Language::German,
        platform: Platform::Amiga,
        game_type: GameType::TwentyFifthAnniversary,
        features: GameFeatures::NONE,
    },
    GameDescription {
        game_id: "st25",
        extra: "",
        detection_file: "data.000",
        md5: "d0299af1385edd7c7612ed453e417dd8",
        language: Language::French,
        platform: Platform::Amiga,
        game_type: GameType::TwentyFifthAnniversary,
        features: GameFeatures::NONE,
    },
    GameDescription {
        game_id: "st25",
        extra: "",
        detection_file: "Star Trek Data",
        md5: "9b078190a09db7417c60e9d6b7233236",
        language: Language::English,
        platform: Platform::Macintosh,
        game_type: GameType::TwentyFifthAnniversary,
        features: GameFeatures::NONE,
    },
    GameDescription {
        game_id: "st25",
        extra: "Demo",
        detection_file: "data.001",
        md5: "f68126e7e36ce6286c4c8575f8b594f5",
        language: Language::English,
        platform: Platform::Pc,
        game_type: GameType::TwentyFifthAnniversary,
        features: GameFeatures::DEMO,
    },
    GameDescription {
        game_id: "stjr",
        extra: "",
        detection_file: "data.001",
        md5: "1c8de3c02f69c07c582d59d3c29e4dd9",
        language: Language::English,
        platform: Platform::Pc,
        game_type: GameType::JudgmentRites,
        features: GameFeatures::NONE,
    },
];

/// Hash the leading bytes of a file the way detection does
pub fn detection_md5(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|source| ArchiveError::ResourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let mut head = Vec::with_capacity(DETECTION_BYTES as usize);
    file.take(DETECTION_BYTES).read_to_end(&mut head)?;

    Ok(hex::encode(md5::compute(&head).0))
}

/// Identify the release installed in `dir`
///
/// Returns the first known release whose detection file exists and hashes
/// to the recorded value, or `None` if nothing matches.
pub fn detect_game<P: AsRef<Path>>(dir: P) -> Result<Option<&'static GameDescription>> {
    let dir = dir.as_ref();

    for description in KNOWN_GAMES {
        let path = find_file(dir, description.detection_file);
        if !path.is_file() {
            continue;
        }

        let digest = detection_md5(&path)?;
        trace!(
            "{} hashes to {} (want {})",
            path.display(),
            digest,
            description.md5
        );

        if digest == description.md5 {
            debug!(
                "Detected {} {} ({}, {:?})",
                description.game_id, description.extra, description.platform, description.language
            );
            return Ok(Some(description));
        }
    }

    Ok(None)
}
