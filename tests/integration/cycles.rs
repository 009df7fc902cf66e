use assetrev::config::RevConfig;
use assetrev::core::RevError;
use assetrev::revision::{plan, revise};
use assetrev::test_utils::AssetTree;
use assetrev::utils::ProgressBar;
use predicates::prelude::*;

use super::assetrev;

#[tokio::test]
async fn test_mutual_reference_fails_without_output() {
    let tree = AssetTree::with_files(&[("x.js", "import y.js"), ("y.js", "import x.js")]).unwrap();

    let err = revise(tree.input(), tree.output(), &RevConfig::default(), &ProgressBar::hidden())
        .await
        .unwrap_err();

    match err {
        RevError::CyclicDependency {
            chain,
        } => {
            assert!(chain.contains("x.js"), "{chain}");
            assert!(chain.contains("y.js"), "{chain}");
        }
        other => panic!("Expected CyclicDependency, got {other:?}"),
    }
    assert!(!tree.output().join("manifest.json").exists());
}

#[tokio::test]
async fn test_long_cycle_is_named_in_full() {
    let tree = AssetTree::with_files(&[
        ("index.html", "main.js"),
        ("main.js", "one.js"),
        ("one.js", "two.js"),
        ("two.js", "three.js"),
        ("three.js", "one.js"),
    ])
    .unwrap();

    let err = plan(tree.input(), &RevConfig::default()).await.unwrap_err();
    let message = err.to_string();
    for name in ["one.js", "two.js", "three.js"] {
        assert!(message.contains(name), "{message}");
    }
    assert!(!message.contains("main.js"), "{message}");
}

#[tokio::test]
async fn test_rename_skip_breaks_a_cycle() {
    let tree = AssetTree::with_files(&[
        ("index.html", "<script src=\"app.js\"></script>"),
        ("app.js", "location = 'index.html'"),
    ])
    .unwrap();

    let manifest = revise(tree.input(), tree.output(), &RevConfig::default(), &ProgressBar::hidden())
        .await
        .unwrap();
    assert_eq!(manifest.get("index.html"), Some("index.html"));
    assert_eq!(manifest.len(), 2);
}

#[test]
fn test_cli_reports_cycle() {
    let tree = AssetTree::with_files(&[("x.js", "import y.js"), ("y.js", "import x.js")]).unwrap();

    assetrev()
        .current_dir(tree.root())
        .arg("run")
        .arg(tree.input())
        .arg(tree.output())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cyclic dependency detected"))
        .stderr(predicate::str::contains("x.js"));

    assert!(!tree.output().join("manifest.json").exists());
}

#[tokio::test]
async fn test_cycle_on_rerun_removes_previous_manifest() {
    let tree = AssetTree::with_files(&[("a.js", "no refs"), ("b.js", "loads a.js")]).unwrap();
    revise(tree.input(), tree.output(), &RevConfig::default(), &ProgressBar::hidden())
        .await
        .unwrap();
    assert!(tree.output().join("manifest.json").is_file());

    tree.add("a.js", "loads b.js").unwrap();
    let err = revise(tree.input(), tree.output(), &RevConfig::default(), &ProgressBar::hidden())
        .await
        .unwrap_err();

    assert!(matches!(err, RevError::CyclicDependency { .. }));
    assert!(!tree.output().join("manifest.json").exists());
}
