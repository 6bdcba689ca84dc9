//! Configuration for opening a game's resource archive

use crate::detection::GameDescription;
use std::fmt;
use std::path::{Path, PathBuf};

/// Platform a release was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// DOS PC release
    Pc,
    /// Commodore Amiga release (big-endian container fields)
    Amiga,
    /// Macintosh release (directory lives in a resource fork)
    Macintosh,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pc => "PC",
            Self::Amiga => "Amiga",
            Self::Macintosh => "Macintosh",
        };
        f.write_str(name)
    }
}

/// Which game the data belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    /// Star Trek: 25th Anniversary
    TwentyFifthAnniversary,
    /// Star Trek: Judgment Rites
    JudgmentRites,
}

/// Release language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// English
    English,
    /// German
    German,
    /// French
    French,
}

/// Feature flags of a release
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GameFeatures(u32);

impl GameFeatures {
    /// No flags set
    pub const NONE: Self = Self(0);
    /// Demo release (different index layout, uncompressed payloads)
    pub const DEMO: Self = Self(1 << 0);

    /// Create from raw bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check whether every flag in `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Shorthand for `contains(GameFeatures::DEMO)`
    pub const fn is_demo(self) -> bool {
        self.contains(Self::DEMO)
    }
}

impl std::ops::BitOr for GameFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Configuration for a resource archive
///
/// Supplied once by the host engine and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Directory holding the game's data files
    pub data_path: PathBuf,
    /// Release platform
    pub platform: Platform,
    /// Which game
    pub game_type: GameType,
    /// Release feature flags
    pub features: GameFeatures,
    /// Number of decoded resources kept in memory, 0 disables caching
    pub cache_capacity: usize,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("."),
            platform: Platform::Pc,
            game_type: GameType::TwentyFifthAnniversary,
            features: GameFeatures::NONE,
            cache_capacity: 0,
        }
    }
}

impl ArchiveConfig {
    /// Create a configuration for a PC 25th Anniversary install at `data_path`
    pub fn new<P: AsRef<Path>>(data_path: P) -> Self {
        Self {
            data_path: data_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Create a configuration from a detected release
    pub fn from_description<P: AsRef<Path>>(data_path: P, description: &GameDescription) -> Self {
        Self::new(data_path)
            .with_platform(description.platform)
            .with_game_type(description.game_type)
            .with_features(description.features)
    }

    /// Set the release platform
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the game type
    #[must_use]
    pub const fn with_game_type(mut self, game_type: GameType) -> Self {
        self.game_type = game_type;
        self
    }

    /// Set the feature flags
    #[must_use]
    pub const fn with_features(mut self, features: GameFeatures) -> Self {
        self.features = features;
        self
    }

    /// Set how many decoded resources the read-through cache keeps
    #[must_use]
    pub const fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Whether this is a demo release
    pub const fn is_demo(&self) -> bool {
        self.features.is_demo()
    }
}
