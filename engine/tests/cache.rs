use std::fs;

use dragonbot::cache::{normalize_key, ReferenceCache};
use dragonbot::{chunk, ChunkOptions, ContentKind, TextBlock};

#[test]
fn keys_are_normalized() {
    assert_eq!(normalize_key("Tasha's Hideous Laughter"), "tashas-hideous-laughter");
    assert_eq!(normalize_key("  Fireball "), "fireball");
    assert_eq!(normalize_key("Melf's  Acid Arrow!"), "melfs-acid-arrow");
    assert_eq!(normalize_key("../.."), "-");
}

#[test]
fn keys_cannot_leave_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ReferenceCache::open(dir.path().join("cache")).unwrap();
    for name in ["../../escaped", "/etc/passwd", "..\\..\\win", "a/../../b", ".."] {
        let path = cache.path_for(ContentKind::Spell, name);
        assert_eq!(path.parent(), Some(cache.root().join("spells").as_path()), "{:?}", name);
        let stem = path.file_stem().unwrap().to_str().unwrap();
        assert!(!stem.contains('.') && !stem.contains('/') && !stem.contains('\\'), "{:?}", stem);
    }

    cache.store(ContentKind::Monster, "../../escaped", &"x").unwrap();
    assert!(!dir.path().join("escaped.json").exists());
    assert!(cache.root().join("monsters/escaped.json").is_file());
}

#[test]
fn open_creates_category_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ReferenceCache::open(dir.path().join("cache")).unwrap();
    for sub in ["spells", "monsters"] {
        assert!(cache.root().join(sub).is_dir(), "{} missing", sub);
    }
}

#[test]
fn blocks_round_trip_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ReferenceCache::open(dir.path()).unwrap();
    let blocks = chunk(
        ["Words.", "More", "A paragraph long enough to stand on its own line."],
        &ChunkOptions::default(),
    );

    cache
        .store(ContentKind::Spell, "Tasha's Hideous Laughter", &blocks)
        .unwrap();
    assert!(dir.path().join("spells/tashas-hideous-laughter.json").is_file());

    let loaded: Vec<TextBlock> = cache
        .load(ContentKind::Spell, "tashas hideous laughter")
        .unwrap()
        .unwrap();
    assert_eq!(loaded, blocks);
}

#[test]
fn miss_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ReferenceCache::open(dir.path()).unwrap();
    let loaded: Option<Vec<TextBlock>> = cache.load(ContentKind::Monster, "goblin").unwrap();
    assert!(loaded.is_none());
}

#[test]
fn corrupt_entry_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ReferenceCache::open(dir.path()).unwrap();
    fs::write(cache.path_for(ContentKind::Monster, "owlbear"), "{ nope").unwrap();
    let loaded = cache.load::<Vec<TextBlock>>(ContentKind::Monster, "owlbear");
    assert!(loaded.is_err());
}
