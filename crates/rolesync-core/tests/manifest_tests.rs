//! Test suite for manifest entry derivation
//!
//! Filesystem walking is covered in rolesync-store; these tests feed parsed
//! documents and locations directly.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use rolesync_core::manifest::slug::{slugify, stable_id, FALLBACK_ID_LEN};
use rolesync_core::manifest::{
    entry_from_document, Category, DocumentLocation, Manifest, OFFICIAL_AUTHOR,
};
use serde_json::{json, Value};

fn location(dir: &str, file: &str) -> DocumentLocation {
    DocumentLocation {
        category: Category::from_dir_name(dir),
        file: file.to_string(),
        stem: file.rsplit_once('.').map(|(s, _)| s).unwrap_or(file).to_string(),
        public_segments: ["scripts", "json", dir, file].iter().map(|s| s.to_string()).collect(),
        dir_segments: vec![dir.to_string()],
    }
}

#[test]
fn test_missing_meta_uses_defaults() {
    // Given a document without any descriptor
    let doc = json!([{"id": "imp"}, {"id": "baron"}]);

    // When deriving its entry in an official directory
    let entry = entry_from_document(&doc, &location("official", "Trouble Brewing.json"), "未知");

    // Then name, author and description fall back
    assert_eq!(entry.name, "Trouble Brewing");
    assert_eq!(entry.author, OFFICIAL_AUTHOR);
    assert_eq!(entry.description, "");
    assert_eq!(entry.name_en, "");
    assert_eq!(entry.logo, "");
    assert_eq!(entry.id, "official-trouble-brewing-trouble-brewing-json");
}

#[test]
fn test_custom_category_uses_unknown_author() {
    let entry = entry_from_document(&json!({}), &location("homebrew", "x.json"), "未知");
    assert_eq!(entry.category, Category::Custom);
    assert_eq!(entry.author, "未知");
}

#[test]
fn test_fallback_chains_pick_first_present() {
    let doc = json!({
        "_meta": {
            "name": "夜半狂欢",
            "title_en": "Night Revelry",
            "nameEn": "ignored",
            "authors": "someone",
            "description": "A custom script",
            "icon": "https://example.com/icon.png"
        }
    });
    let entry = entry_from_document(&doc, &location("custom", "revelry.json"), "未知");

    assert_eq!(entry.name, "夜半狂欢");
    assert_eq!(entry.name_en, "Night Revelry");
    assert_eq!(entry.author, "someone");
    assert_eq!(entry.description, "A custom script");
    assert_eq!(entry.logo, "https://example.com/icon.png");
    assert_eq!(entry.json_url, "/scripts/json/custom/revelry.json");
    assert_eq!(entry.file, "revelry.json");
}

#[test]
fn test_all_punctuation_key_gets_hex_id() {
    let id = stable_id("::.");
    assert_eq!(id.len(), FALLBACK_ID_LEN);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_entries_are_deterministic() {
    let doc = json!({"_meta": {"name": "Sects & Violets"}});
    let loc = location("official", "sv.json");
    let first = entry_from_document(&doc, &loc, "未知");
    let second = entry_from_document(&doc, &loc, "未知");
    assert_eq!(first, second);

    let a = Manifest::new(vec![first]);
    let b = Manifest::new(vec![second]);
    assert_eq!(a.scripts, b.scripts);
    assert_eq!(a.version, b.version);
}

#[test]
fn test_manifest_serialized_field_names() {
    let entry = entry_from_document(&Value::Null, &location("official_mix", "m.json"), "未知");
    let value = serde_json::to_value(Manifest::new(vec![entry])).unwrap();

    let script = &value["scripts"][0];
    for key in [
        "id", "name", "nameEn", "author", "description", "category", "logo", "jsonUrl", "file",
        "dir",
    ] {
        assert!(script.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(script["category"], json!("official_mix"));
    assert!(value.get("generatedAt").is_some());
}

proptest! {
    #[test]
    fn stable_id_is_never_empty(key in ".{0,30}") {
        prop_assert!(!stable_id(&key).is_empty());
    }

    #[test]
    fn slug_has_no_edge_or_double_hyphens(key in "[a-zA-Z0-9 :._!-]{0,30}") {
        let slug = slugify(&key);
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
        prop_assert!(!slug.chars().any(|c| c.is_ascii_uppercase()));
    }
}
