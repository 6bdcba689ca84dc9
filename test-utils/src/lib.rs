//! Test utilities for startrek-archive
//!
//! Locates real game installations for tests that need original data.
//! Nothing here is shipped; the game files themselves are never committed.

use std::path::{Path, PathBuf};

/// Releases that real-data tests can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameVariant {
    /// Star Trek: 25th Anniversary, DOS CD release
    St25Pc,
    /// Star Trek: 25th Anniversary, Amiga release
    St25Amiga,
    /// Star Trek: 25th Anniversary, Macintosh release
    St25Macintosh,
    /// Star Trek: 25th Anniversary, DOS demo
    St25Demo,
    /// Star Trek: Judgment Rites, DOS release
    JudgmentRites,
}

impl GameVariant {
    /// All variants in discovery order
    pub const ALL: [Self; 5] = [
        Self::St25Pc,
        Self::St25Amiga,
        Self::St25Macintosh,
        Self::St25Demo,
        Self::JudgmentRites,
    ];

    /// Get the environment variable name for this variant
    pub fn env_var(&self) -> &'static str {
        match self {
            GameVariant::St25Pc => "STARTREK_ST25_DATA",
            GameVariant::St25Amiga => "STARTREK_ST25_AMIGA_DATA",
            GameVariant::St25Macintosh => "STARTREK_ST25_MAC_DATA",
            GameVariant::St25Demo => "STARTREK_ST25_DEMO_DATA",
            GameVariant::JudgmentRites => "STARTREK_STJR_DATA",
        }
    }

    /// Get a human-readable name for this variant
    pub fn display_name(&self) -> &'static str {
        match self {
            GameVariant::St25Pc => "Star Trek: 25th Anniversary (PC)",
            GameVariant::St25Amiga => "Star Trek: 25th Anniversary (Amiga)",
            GameVariant::St25Macintosh => "Star Trek: 25th Anniversary (Macintosh)",
            GameVariant::St25Demo => "Star Trek: 25th Anniversary (PC demo)",
            GameVariant::JudgmentRites => "Star Trek: Judgment Rites (PC)",
        }
    }

    /// Files that must be present in the data directory
    pub fn required_files(&self) -> &'static [&'static str] {
        match self {
            GameVariant::St25Pc | GameVariant::St25Demo | GameVariant::JudgmentRites => {
                &["data.dir", "data.001"]
            }
            GameVariant::St25Amiga => &["data000.dir", "data.000"],
            GameVariant::St25Macintosh => &["._Star Trek Data", "Star Trek Data"],
        }
    }

    /// Directory names an installation is commonly unpacked under
    fn directory_names(&self) -> &'static [&'static str] {
        match self {
            GameVariant::St25Pc => &["st25", "startrek", "STARTREK"],
            GameVariant::St25Amiga => &["st25-amiga", "startrek-amiga"],
            GameVariant::St25Macintosh => &["st25-mac", "Star Trek"],
            GameVariant::St25Demo => &["st25-demo", "stdemo"],
            GameVariant::JudgmentRites => &["stjr", "judgment-rites", "JUDGMENT"],
        }
    }
}

/// Attempts to locate game data for a specific variant
pub fn find_game_data(variant: GameVariant) -> Option<PathBuf> {
    // Strategy 1: Check environment variable
    if let Ok(path) = std::env::var(variant.env_var()) {
        let path = PathBuf::from(shellexpand::tilde(&path).to_string());
        if is_valid_game_data(&path, variant) {
            return Some(path);
        }
    }

    // Strategy 2: Check common installation paths
    get_common_game_paths(variant)
        .into_iter()
        .find(|path| is_valid_game_data(path, variant))
}

/// Get common installation paths for a variant
fn get_common_game_paths(variant: GameVariant) -> Vec<PathBuf> {
    let base_dirs = if cfg!(windows) {
        vec!["C:\\GAMES", "C:\\Games", "C:\\dosbox"]
    } else {
        vec!["~/games", "~/Games", "~/dosbox", "~/.local/share/scummvm"]
    };

    let mut paths = Vec::new();
    for base in base_dirs {
        let base = PathBuf::from(shellexpand::tilde(base).to_string());
        for name in variant.directory_names() {
            paths.push(base.join(name));
        }
    }
    paths
}

/// Check if a path holds the container files of a variant
pub fn is_valid_game_data(path: &Path, variant: GameVariant) -> bool {
    if !path.is_dir() {
        return false;
    }

    variant
        .required_files()
        .iter()
        .all(|file| has_file(path, file))
}

/// Check for a file in `dir`, ignoring ASCII case as the game does
fn has_file(dir: &Path, name: &str) -> bool {
    if dir.join(name).is_file() {
        return true;
    }

    std::fs::read_dir(dir).is_ok_and(|entries| {
        entries.flatten().any(|entry| {
            entry.file_name().to_str().is_some_and(|found| found.eq_ignore_ascii_case(name))
                && entry.path().is_file()
        })
    })
}

/// Find any available installation
pub fn find_any_game_data() -> Option<(GameVariant, PathBuf)> {
    GameVariant::ALL
        .into_iter()
        .find_map(|variant| find_game_data(variant).map(|path| (variant, path)))
}

/// Print instructions for setting up game data paths
pub fn print_setup_instructions() {
    println!("Star Trek Data Setup Instructions:");
    println!("==================================");
    println!();
    println!("To run tests that require original game files, set environment variables:");
    println!();

    for variant in GameVariant::ALL {
        println!("  {} = /path/to/game", variant.env_var());
        println!("    For: {}", variant.display_name());
        println!("    Needs: {}", variant.required_files().join(", "));
        println!();
    }

    println!("Example:");
    println!("  export STARTREK_ST25_DATA=\"$HOME/games/st25\"");
}

/// Get a game data path or skip test with helpful message
#[macro_export]
macro_rules! require_game_data {
    () => {
        match $crate::find_any_game_data() {
            Some((_, path)) => path,
            None => {
                println!("Skipping test - no Star Trek data found");
                $crate::print_setup_instructions();
                return;
            }
        }
    };
    ($variant:expr) => {
        match $crate::find_game_data($variant) {
            Some(path) => path,
            None => {
                println!("Skipping test - no {} data found", $variant.display_name());
                $crate::print_setup_instructions();
                return;
            }
        }
    };
}
