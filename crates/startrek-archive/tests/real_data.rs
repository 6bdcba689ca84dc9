//! Tests with real game installations
//!
//! Point the `STARTREK_*` environment variables at unpacked installs to run
//! these, e.g. `STARTREK_ST25_DATA=~/games/st25 cargo test -- --ignored`.

use startrek_archive::{ArchiveConfig, Platform, ResourceArchive, detect_game};
use test_utils::{GameVariant, require_game_data};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Open every single-part entry and check that it decodes
fn decode_all(archive: &ResourceArchive) -> (usize, usize) {
    let entries = archive.entries().unwrap();
    assert!(!entries.is_empty(), "directory is empty");

    let mut decoded = 0;
    let mut multi_part = 0;
    for entry in &entries {
        if entry.location.sub_file_count > 1 {
            multi_part += 1;
            continue;
        }
        let resource = archive
            .open_file(&entry.name)
            .unwrap_or_else(|e| panic!("failed to open {}: {e}", entry.name));
        assert_eq!(resource.name(), entry.name);
        decoded += 1;
    }

    println!(
        "{} entries: {decoded} decoded, {multi_part} multi-part",
        entries.len()
    );
    (decoded, multi_part)
}

#[test]
#[ignore = "requires real Star Trek installation"]
fn test_st25_pc_detect_and_decode() {
    init_tracing();
    let path = require_game_data!(GameVariant::St25Pc);

    let description = detect_game(&path).unwrap().expect("release not recognised");
    assert_eq!(description.game_id, "st25");
    assert_eq!(description.platform, Platform::Pc);

    let archive = ResourceArchive::new(ArchiveConfig::from_description(&path, description));
    let (decoded, _) = decode_all(&archive);
    assert!(decoded > 0);
}

#[test]
#[ignore = "requires real Star Trek installation"]
fn test_st25_amiga_decode() {
    init_tracing();
    let path = require_game_data!(GameVariant::St25Amiga);

    let archive = ResourceArchive::new(ArchiveConfig::new(&path).with_platform(Platform::Amiga));
    decode_all(&archive);
}

#[test]
#[ignore = "requires real Star Trek installation"]
fn test_st25_macintosh_decode() {
    init_tracing();
    let path = require_game_data!(GameVariant::St25Macintosh);

    let archive =
        ResourceArchive::new(ArchiveConfig::new(&path).with_platform(Platform::Macintosh));
    decode_all(&archive);
}

#[test]
#[ignore = "requires real Star Trek installation"]
fn test_st25_demo_decode() {
    init_tracing();
    let path = require_game_data!(GameVariant::St25Demo);

    let description = detect_game(&path).unwrap().expect("release not recognised");
    assert!(description.features.is_demo());

    let archive = ResourceArchive::new(ArchiveConfig::from_description(&path, description));
    decode_all(&archive);
}

#[test]
#[ignore = "requires real Star Trek installation"]
fn test_judgment_rites_decode() {
    init_tracing();
    let path = require_game_data!(GameVariant::JudgmentRites);

    let description = detect_game(&path).unwrap().expect("release not recognised");
    assert_eq!(description.game_id, "stjr");

    let archive = ResourceArchive::new(ArchiveConfig::from_description(&path, description));
    decode_all(&archive);
}

#[test]
#[ignore = "requires real Star Trek installation"]
fn test_repeated_open_is_stable() {
    init_tracing();
    let (_, path) = match test_utils::find_any_game_data() {
        Some(found) => found,
        None => {
            test_utils::print_setup_instructions();
            return;
        }
    };

    let Some(description) = detect_game(&path).unwrap() else {
        return;
    };
    let archive = ResourceArchive::new(ArchiveConfig::from_description(&path, description));
    let Some(entry) = archive
        .entries()
        .unwrap()
        .into_iter()
        .find(|e| e.location.sub_file_count == 1)
    else {
        return;
    };

    let first = archive.open_file(&entry.name).unwrap().into_inner();
    let second = archive.open_file(&entry.name).unwrap().into_inner();
    assert_eq!(first, second);
}
