//! CLI integration tests
//!
//! These tests run the `rolesync` binary against temporary fixtures and
//! check both its output and the files it writes.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const CHARACTERS: &str = r#"export const CHARACTERS = {
  // 官方角色
  "imp": { "name": "小恶魔", "team": "demon", "ability": "每个夜晚*，你要选择一名玩家：他死亡。" },
  "pit_hag": { "name": "麻脸巫婆", "team": "minion", "otherNight": 28 },
  "washer_woman": { "name": "洗衣妇", "team": "townsfolk", "firstNight": 32 },
};
"#;

const MAPPING: &str = r#"export const CN_TO_EN_ID_MAP: Record<string, string> = {
  'pit_hag': 'pithag',
  'washer_woman': 'washerwoman',
};
"#;

const CATALOG: &str = r#"[
  {"id": "imp", "name": "Imp", "team": "demon"},
  {"id": "washerwoman", "name": "Washerwoman", "team": "townsfolk"}
]"#;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup_catalog(temp_dir: &TempDir) {
    let data = temp_dir.path().join("src").join("data");
    write(&data.join("characters.ts"), CHARACTERS);
    write(&data.join("characterIdMapping.ts"), MAPPING);
    write(&data.join("roles.json"), CATALOG);
}

fn run(temp_dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rolesync"))
        .current_dir(temp_dir.path())
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_cli_compare_reports_missing_role() {
    // Given: Default layout where pit_hag has no catalog entry
    let temp_dir = TempDir::new().unwrap();
    setup_catalog(&temp_dir);

    // When: `rolesync compare --out report.json`
    let output = run(&temp_dir, &["compare", "--out", "report.json"]);

    // Then: The summary and the JSON report both name the missing role
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pit_hag -> pithag"), "stdout: {}", stdout);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("report.json")).unwrap())
            .unwrap();
    let missing = report["discrepancies"]["missing"].as_array().unwrap();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0]["sourceId"], "pit_hag");
    assert_eq!(missing[0]["mappedTargetId"], "pithag");
    assert!(report.get("comparison").is_none());
}

#[test]
fn test_cli_extract_merge_appends_to_catalog() {
    // Given: The same fixture
    let temp_dir = TempDir::new().unwrap();
    setup_catalog(&temp_dir);

    // When: `rolesync extract --merge`
    let output = run(&temp_dir, &["extract", "--merge"]);

    // Then: The catalog gains the missing role with defaults filled in
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let catalog: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(temp_dir.path().join("src/data/roles.json")).unwrap(),
    )
    .unwrap();
    let roles = catalog.as_array().unwrap();
    assert_eq!(roles.len(), 3);
    assert_eq!(roles[2]["id"], "pit_hag");
    assert_eq!(roles[2]["otherNight"], 28);
    assert_eq!(roles[2]["edition"], "custom");
}

#[test]
fn test_cli_duplicates_strict_fails_on_collision() {
    // Given: A catalog where two ids share a canonical form
    let temp_dir = TempDir::new().unwrap();
    write(
        &temp_dir.path().join("roles.json"),
        r#"[{"id": "pit_hag", "name": "A"}, {"id": "PitHag", "name": "B"}]"#,
    );

    // When: `rolesync duplicates --strict`
    let output = run(&temp_dir, &["duplicates", "--catalog", "roles.json", "--strict"]);

    // Then: It lists the group and exits non-zero
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pithag"), "stdout: {}", stdout);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_cli_manifest_writes_file() {
    // Given: A small document tree in the default location
    let temp_dir = TempDir::new().unwrap();
    let json_root = temp_dir.path().join("public/scripts/json");
    write(
        &json_root.join("official/tb.json"),
        r#"[{"id": "_meta", "name": "暗流涌动"}]"#,
    );
    write(&json_root.join("custom/fan.json"), r#"{"_meta": {"name": "Fan Script"}}"#);

    // When: `rolesync manifest`
    let output = run(&temp_dir, &["manifest"]);

    // Then: manifest.json lists both documents, custom first
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(json_root.join("manifest.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["version"], 1);
    let scripts = manifest["scripts"].as_array().unwrap();
    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0]["jsonUrl"], "/scripts/json/custom/fan.json");
    assert_eq!(scripts[1]["name"], "暗流涌动");
    assert_eq!(scripts[1]["author"], "Official");
}

#[test]
fn test_cli_missing_config_is_error() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(&temp_dir, &["stats", "--config", "absent.toml"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_FATAL_INPUT"));
}

#[test]
fn test_cli_stats_json() {
    let temp_dir = TempDir::new().unwrap();
    setup_catalog(&temp_dir);

    let output = run(&temp_dir, &["stats", "--json"]);

    assert!(output.status.success());
    let counts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(counts["demon"], 1);
    assert_eq!(counts["townsfolk"], 1);
}

#[test]
fn test_cli_compare_records_unbalanced_block() {
    // Given: A source whose last block never closes
    let temp_dir = TempDir::new().unwrap();
    setup_catalog(&temp_dir);
    write(
        &temp_dir.path().join("src/data/characters.ts"),
        r#"export const CHARACTERS = {
  "imp": { "name": "小恶魔", "team": "demon" },
  "pit_hag": { "name": "麻脸巫婆", "team": "minion",
"#,
    );

    // When: `rolesync compare --out report.json`
    let output = run(&temp_dir, &["compare", "--out", "report.json"]);

    // Then: The run succeeds and the skipped block is in both outputs
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Skipped 1 block(s)"), "stdout: {}", stdout);
    assert!(stdout.contains("pit_hag: never closes"), "stdout: {}", stdout);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("report.json")).unwrap())
            .unwrap();
    let failures = report["extractionFailures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["identifier"], "pit_hag");
    assert_eq!(failures[0]["kind"]["type"], "unbalanced");
    assert_eq!(report["discrepancies"]["missing"].as_array().unwrap().len(), 0);
}

#[test]
fn test_cli_extract_report_lists_roles_and_failures() {
    let temp_dir = TempDir::new().unwrap();
    setup_catalog(&temp_dir);

    let output = run(&temp_dir, &["extract", "--out", "roles_to_add.json"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(temp_dir.path().join("roles_to_add.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(report["extracted"][0]["id"], "pit_hag");
    assert!(report["extractionFailures"].as_array().unwrap().is_empty());
}
