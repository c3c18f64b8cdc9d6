//! Integration tests for the sdraft CLI.
//!
//! These tests run the built binary against JSON documents and branch
//! stores in temporary directories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use schemadraft::core::edit::Schema;
use schemadraft::core::metadata::{parse_metadata, DatabaseMetadata};
use schemadraft::core::types::EntityStatus;

/// Get a command for running sdraft, isolated from the user's config.
fn sdraft(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sdraft").unwrap();
    cmd.env_remove("SDRAFT_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home);
    cmd
}

const HEAD: &str = r#"{
  "name": "shop",
  "schemas": [{
    "name": "public",
    "tables": [{
      "name": "users",
      "columns": [
        {"name": "id", "type": "bigint"},
        {"name": "email", "type": "text", "nullable": true}
      ],
      "indexes": [{"name": "users_pkey", "primary": true, "unique": true, "expressions": ["id"]}]
    }]
  }]
}"#;

const HEAD_WITH_ORDERS: &str = r#"{
  "name": "shop",
  "schemas": [{
    "name": "public",
    "tables": [
      {"name": "users", "columns": [{"name": "id", "type": "bigint"}, {"name": "email", "type": "text", "nullable": true}],
       "indexes": [{"name": "users_pkey", "primary": true, "unique": true, "expressions": ["id"]}]},
      {"name": "orders", "columns": [{"name": "id", "type": "bigint"}]}
    ]
  }]
}"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

// =============================================================================
// Basic
// =============================================================================

#[test]
fn help_flag_works() {
    let temp = TempDir::new().unwrap();
    sdraft(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rebuild"))
        .stdout(predicate::str::contains("flatten"));
}

#[test]
fn version_flag_works() {
    let temp = TempDir::new().unwrap();
    sdraft(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sdraft"));
}

// =============================================================================
// validate
// =============================================================================

#[test]
fn validate_clean_metadata() {
    let temp = TempDir::new().unwrap();
    let head = write(temp.path(), "head.json", HEAD);
    sdraft(temp.path())
        .args(["validate"])
        .arg(&head)
        .assert()
        .success()
        .stdout(predicate::str::contains("No structural problems found."));
}

#[test]
fn validate_reports_problems_and_fails() {
    let temp = TempDir::new().unwrap();
    let bad = write(
        temp.path(),
        "bad.json",
        r#"{"schemas":[{"name":"s","tables":[
            {"name":"","columns":[]},
            {"name":"","columns":[]},
            {"name":"t","columns":[{"name":"c"}]}
        ]}]}"#,
    );
    sdraft(temp.path())
        .arg("validate")
        .arg(&bad)
        .assert()
        .failure()
        .stdout(predicate::eq("Table name is required.\nColumn c type is required.\n"))
        .stderr(predicate::str::contains("2 structural problem(s) found"));
}

#[test]
fn validate_rejects_unknown_fields() {
    let temp = TempDir::new().unwrap();
    let bad = write(temp.path(), "bad.json", r#"{"schemas":[],"owner":"x"}"#);
    sdraft(temp.path())
        .arg("validate")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid metadata"));
}

#[test]
fn missing_input_file_fails() {
    let temp = TempDir::new().unwrap();
    sdraft(temp.path())
        .args(["validate", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// =============================================================================
// rebuild / flatten / status
// =============================================================================

#[test]
fn rebuild_then_flatten_round_trips() {
    let temp = TempDir::new().unwrap();
    let head = write(temp.path(), "head.json", HEAD);

    let tree_json = stdout_of(sdraft(temp.path()).args(["rebuild", "--target"]).arg(&head));
    let tree: Vec<Schema> = serde_json::from_str(&tree_json).unwrap();
    assert_eq!(tree[0].tables[0].status, EntityStatus::Normal);
    let tree_path = write(temp.path(), "tree.json", &tree_json);

    let merged = stdout_of(
        sdraft(temp.path())
            .args(["flatten", "--tree"])
            .arg(&tree_path)
            .arg("--metadata")
            .arg(&head),
    );
    let merged = parse_metadata(&merged).unwrap();
    assert_eq!(merged, parse_metadata(HEAD).unwrap());
}

#[test]
fn rebuild_existing_tree_marks_new_table() {
    let temp = TempDir::new().unwrap();
    let head = write(temp.path(), "head.json", HEAD);
    let next = write(temp.path(), "next.json", HEAD_WITH_ORDERS);

    let tree_json = stdout_of(sdraft(temp.path()).args(["rebuild", "--target"]).arg(&head));
    let tree_path = write(temp.path(), "tree.json", &tree_json);

    let rebuilt = stdout_of(
        sdraft(temp.path())
            .args(["rebuild", "--target"])
            .arg(&next)
            .arg("--tree")
            .arg(&tree_path),
    );
    let rebuilt_path = write(temp.path(), "rebuilt.json", &rebuilt);

    sdraft(temp.path())
        .args(["status", "--tree"])
        .arg(&rebuilt_path)
        .assert()
        .success()
        .stdout(predicate::eq("+ public.orders\n"));
}

#[test]
fn status_of_clean_tree() {
    let temp = TempDir::new().unwrap();
    let head = write(temp.path(), "head.json", HEAD);
    let tree_json = stdout_of(sdraft(temp.path()).args(["rebuild", "--target"]).arg(&head));
    let tree_path = write(temp.path(), "tree.json", &tree_json);

    sdraft(temp.path())
        .args(["status", "--tree"])
        .arg(&tree_path)
        .arg("--target")
        .arg(&head)
        .assert()
        .success()
        .stdout(predicate::eq("No pending changes.\n"));

    sdraft(temp.path())
        .args(["-q", "status", "--tree"])
        .arg(&tree_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn flatten_warns_about_violations() {
    let temp = TempDir::new().unwrap();
    let head = write(temp.path(), "head.json", HEAD);
    let tree_json = stdout_of(sdraft(temp.path()).args(["rebuild", "--target"]).arg(&head));
    let mut tree: Vec<Schema> = serde_json::from_str(&tree_json).unwrap();
    tree[0].tables[0].columns[1].column_type = String::new();
    let tree_path = write(temp.path(), "tree.json", &serde_json::to_string(&tree).unwrap());

    sdraft(temp.path())
        .args(["flatten", "--tree"])
        .arg(&tree_path)
        .arg("--metadata")
        .arg(&head)
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: Column email type is required."));
}

// =============================================================================
// Branch store commands
// =============================================================================

fn seed_store(dir: &Path) -> PathBuf {
    let store = dir.join("branches");
    fs::create_dir_all(&store).unwrap();
    let head: DatabaseMetadata = parse_metadata(HEAD).unwrap();
    let next: DatabaseMetadata = parse_metadata(HEAD_WITH_ORDERS).unwrap();
    let main = serde_json::json!({
        "name": "main",
        "type": "MAIN_BRANCH",
        "schemaMetadata": next,
        "baselineSchemaMetadata": head,
    });
    let draft = serde_json::json!({
        "name": "alice",
        "type": "PERSONAL_DRAFT",
        "parent": "main",
        "schemaMetadata": next,
    });
    fs::write(store.join("main.json"), main.to_string()).unwrap();
    fs::write(store.join("alice.json"), draft.to_string()).unwrap();
    store
}

#[test]
fn baseline_of_draft_comes_from_parent() {
    let temp = TempDir::new().unwrap();
    let store = seed_store(temp.path());

    let out = stdout_of(sdraft(temp.path()).arg("--store").arg(&store).args(["baseline", "alice"]));
    assert_eq!(parse_metadata(&out).unwrap(), parse_metadata(HEAD).unwrap());
}

#[test]
fn open_marks_changes_against_baseline() {
    let temp = TempDir::new().unwrap();
    let store = seed_store(temp.path());

    let out = stdout_of(sdraft(temp.path()).arg("--store").arg(&store).args(["open", "main"]));
    let tree: Vec<Schema> = serde_json::from_str(&out).unwrap();
    let orders = tree[0].table_by_name("orders").unwrap();
    assert_eq!(orders.status, EntityStatus::Created);
}

#[test]
fn commit_writes_new_head() {
    let temp = TempDir::new().unwrap();
    let store = seed_store(temp.path());

    let out = stdout_of(sdraft(temp.path()).arg("--store").arg(&store).args(["open", "main"]));
    let mut tree: Vec<Schema> = serde_json::from_str(&out).unwrap();
    tree[0].tables.retain(|t| t.name == "users");
    let tree_path = write(temp.path(), "tree.json", &serde_json::to_string(&tree).unwrap());

    sdraft(temp.path())
        .arg("--store")
        .arg(&store)
        .args(["commit", "main", "--tree"])
        .arg(&tree_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Committed 'main'."));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.join("main.json")).unwrap()).unwrap();
    let tables = saved["schemaMetadata"]["schemas"][0]["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0]["name"], "users");
}

#[test]
fn unknown_branch_fails() {
    let temp = TempDir::new().unwrap();
    let store = seed_store(temp.path());
    sdraft(temp.path())
        .arg("--store")
        .arg(&store)
        .args(["open", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch not found: ghost"));
}

#[test]
fn store_dir_from_config_file() {
    let temp = TempDir::new().unwrap();
    let store = seed_store(temp.path());
    let config = write(
        temp.path(),
        "config.toml",
        &format!("store_dir = {:?}\npretty = false\n", store.display().to_string()),
    );

    let out = stdout_of(
        sdraft(temp.path())
            .env("SDRAFT_CONFIG", &config)
            .args(["baseline", "main"]),
    );
    assert_eq!(out.lines().count(), 1);
    assert_eq!(parse_metadata(&out).unwrap(), parse_metadata(HEAD).unwrap());
}
