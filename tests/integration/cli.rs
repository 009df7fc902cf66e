use assetrev::manifest::Manifest;
use assetrev::test_utils::AssetTree;
use predicates::prelude::*;
use std::fs;

use super::assetrev;

fn sample_tree() -> AssetTree {
    AssetTree::with_files(&[
        ("a.js", "no refs"),
        ("b.js", "loads a.js"),
        ("index.html", "loads b.js"),
    ])
    .unwrap()
}

#[test]
fn test_run_prints_summary() {
    let tree = sample_tree();

    assetrev()
        .current_dir(tree.root())
        .args(["run", "site", "dist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Revisioned 3 files (2 renamed)"))
        .stdout(predicate::str::contains("manifest.json"));

    let manifest = Manifest::load(&tree.output().join("manifest.json")).unwrap();
    assert_eq!(manifest.len(), 3);
    assert_eq!(manifest.get("index.html"), Some("index.html"));
}

#[test]
fn test_quiet_run_prints_nothing() {
    let tree = sample_tree();

    assetrev()
        .current_dir(tree.root())
        .args(["--quiet", "run", "site", "dist"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(tree.output().join("manifest.json").is_file());
}

#[test]
fn test_run_flags_override_defaults() {
    let tree = sample_tree();

    assetrev()
        .current_dir(tree.root())
        .args([
            "run",
            "site",
            "dist",
            "--skip-rename",
            "index.html",
            "--skip-rename",
            "a.js",
            "--manifest",
            "rev.json",
            "--max-parallel",
            "1",
        ])
        .assert()
        .success();

    let manifest = Manifest::load(&tree.output().join("rev.json")).unwrap();
    assert_eq!(manifest.get("a.js"), Some("a.js"));
    assert_eq!(manifest.renamed_count(), 1);
    assert!(!tree.output().join("manifest.json").exists());
}

#[test]
fn test_config_file_in_working_directory() {
    let tree = sample_tree();
    fs::write(tree.root().join("assetrev.toml"), "manifest = \"assets.json\"\n").unwrap();

    assetrev().current_dir(tree.root()).args(["run", "site", "dist"]).assert().success();

    assert!(tree.output().join("assets.json").is_file());
}

#[test]
fn test_explicit_config_file() {
    let tree = sample_tree();
    let config = tree.root().join("custom.toml");
    fs::write(&config, "skip_rename = [\"*.js\", \"index.html\"]\n").unwrap();

    assetrev()
        .current_dir(tree.root())
        .arg("--config")
        .arg(&config)
        .args(["run", "site", "dist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 renamed)"));
}

#[test]
fn test_invalid_config_file() {
    let tree = sample_tree();
    fs::write(tree.root().join("assetrev.toml"), "skip_renames = []\n").unwrap();

    assetrev()
        .current_dir(tree.root())
        .args(["run", "site", "dist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));

    assert!(!tree.output().exists());
}

#[test]
fn test_invalid_pattern_flag() {
    let tree = sample_tree();

    assetrev()
        .current_dir(tree.root())
        .args(["plan", "site", "--skip-find-deps", "[oops"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid glob pattern '[oops'"));
}

#[test]
fn test_missing_input_directory() {
    let tree = AssetTree::new().unwrap();

    assetrev()
        .current_dir(tree.root())
        .args(["run", "nope", "dist"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Input directory not found"));
}

#[test]
fn test_output_inside_input_is_rejected() {
    let tree = sample_tree();

    assetrev()
        .current_dir(tree.root())
        .args(["run", "site", "site/dist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be inside input directory"));

    assert!(!tree.input().join("dist").exists());
}

#[test]
fn test_plan_text_output() {
    let tree = sample_tree();

    assetrev()
        .current_dir(tree.root())
        .args(["plan", "site"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::eq("a.js\nb.js\n  -> a.js\nindex.html\n  -> b.js\n"));

    assert!(!tree.output().exists());
}

#[test]
fn test_plan_json_output() {
    let tree = sample_tree();

    let output = assetrev()
        .current_dir(tree.root())
        .args(["plan", "site", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        entries,
        serde_json::json!([
            { "file": "a.js", "dependencies": [] },
            { "file": "b.js", "dependencies": ["a.js"] },
            { "file": "index.html", "dependencies": ["b.js"] }
        ])
    );
}
