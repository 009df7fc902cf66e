use assetrev::config::RevConfig;
use assetrev::manifest::Manifest;
use assetrev::revision::{content_digest, plan, revise, revisioned_name};
use assetrev::test_utils::{AssetTree, init_test_logging};
use assetrev::utils::ProgressBar;

async fn run(tree: &AssetTree, config: &RevConfig) -> Manifest {
    init_test_logging(None);
    revise(tree.input(), tree.output(), config, &ProgressBar::hidden()).await.unwrap()
}

#[tokio::test]
async fn test_script_chain_is_revisioned_in_order() {
    let tree = AssetTree::with_files(&[
        ("a.js", "no refs"),
        ("b.js", "loads a.js"),
        ("index.html", "loads b.js"),
    ])
    .unwrap();

    let plan = plan(tree.input(), &RevConfig::default()).await.unwrap();
    assert_eq!(plan.order, vec!["a.js", "b.js", "index.html"]);

    let manifest = run(&tree, &RevConfig::default()).await;
    assert_eq!(manifest.len(), 3);

    let a = revisioned_name("a.js", &content_digest(b"no refs"));
    assert_eq!(manifest.get("a.js"), Some(a.as_str()));

    let b_content = format!("loads {a}");
    let b = revisioned_name("b.js", &content_digest(b_content.as_bytes()));
    assert_eq!(manifest.get("b.js"), Some(b.as_str()));
    assert_eq!(tree.read_output(&b).unwrap(), b_content);

    assert_eq!(manifest.get("index.html"), Some("index.html"));
    assert_eq!(tree.read_output("index.html").unwrap(), format!("loads {b}"));

    let keys: Vec<_> = manifest.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a.js", "b.js", "index.html"]);
}

#[tokio::test]
async fn test_nested_site() {
    let tree = AssetTree::with_files(&[
        ("index.html", "<link href=\"css/site.css\"><script src=\"js/app.js\"></script>"),
        ("css/site.css", "body { background: url(../img/bg.gif) } /* img/bg.gif */"),
        ("js/app.js", "fetch('data/items.json')"),
        ("data/items.json", "[]"),
    ])
    .unwrap();
    tree.add("img/bg.gif", b"GIF89a css/site.css \x00\x01").unwrap();

    let manifest = run(&tree, &RevConfig::default()).await;

    let gif = manifest.get("img/bg.gif").unwrap();
    assert!(gif.starts_with("img/bg.") && gif.ends_with(".gif"), "{gif}");
    assert_eq!(tree.read_output_bytes(gif).unwrap(), b"GIF89a css/site.css \x00\x01");

    let css = manifest.get("css/site.css").unwrap();
    let css_text = tree.read_output(css).unwrap();
    assert!(css_text.contains(gif));
    assert!(!css_text.contains("img/bg.gif"));

    let json = manifest.get("data/items.json").unwrap();
    let app = manifest.get("js/app.js").unwrap();
    assert_eq!(tree.read_output(app).unwrap(), format!("fetch('{json}')"));

    let index = tree.read_output("index.html").unwrap();
    assert_eq!(index, format!("<link href=\"{css}\"><script src=\"{app}\"></script>"));
}

#[tokio::test]
async fn test_manifest_names_every_output_file() {
    let tree = AssetTree::with_files(&[
        ("index.html", "<img src=\"logo.png\">"),
        ("about/index.html", "<a href=\"index.html\">"),
        ("robots.txt", "Disallow:"),
        (".htaccess", "Options -Indexes"),
    ])
    .unwrap();
    tree.add("logo.png", [0x89u8, b'P', b'N', b'G']).unwrap();

    let manifest = run(&tree, &RevConfig::default()).await;
    assert_eq!(manifest.len(), 5);

    let mut expected: Vec<String> = manifest.values().map(ToString::to_string).collect();
    expected.push("manifest.json".to_string());
    expected.sort();
    let mut written = tree.output_files().unwrap();
    written.sort();
    assert_eq!(written, expected);

    assert_eq!(manifest.get("about/index.html"), Some("about/index.html"));
    let htaccess = manifest.get(".htaccess").unwrap();
    assert!(htaccess.starts_with(".htaccess."), "{htaccess}");

    let stored = Manifest::load(&tree.output().join("manifest.json")).unwrap();
    assert_eq!(stored, manifest);
}

#[tokio::test]
async fn test_scan_skipped_file_mentioning_its_dependent() {
    // Scanning logo.png would see "app.css" and form a cycle with app.css.
    let tree = AssetTree::with_files(&[("app.css", ".logo { background: url(logo.png) }")]).unwrap();
    tree.add("logo.png", b"\x89PNG app.css").unwrap();

    let plan = plan(tree.input(), &RevConfig::default()).await.unwrap();
    assert!(plan.dependencies.dependencies("logo.png").is_empty());
    assert_eq!(plan.order, vec!["logo.png", "app.css"]);

    let manifest = run(&tree, &RevConfig::default()).await;
    let png = manifest.get("logo.png").unwrap();
    let css = manifest.get("app.css").unwrap();
    assert_eq!(tree.read_output(css).unwrap(), format!(".logo {{ background: url({png}) }}"));
}

#[tokio::test]
async fn test_custom_skip_lists() {
    let tree = AssetTree::with_files(&[
        ("index.html", "<script src=\"app.js\"></script>"),
        ("app.js", "// sw.js registers itself"),
        ("sw.js", "self.addEventListener('fetch', () => {})"),
    ])
    .unwrap();

    let config = RevConfig {
        skip_rename: vec!["*.html".to_string(), "sw.js".to_string()],
        manifest: "rev-manifest.json".to_string(),
        ..RevConfig::default()
    };
    let manifest = run(&tree, &config).await;

    assert_eq!(manifest.get("sw.js"), Some("sw.js"));
    assert_eq!(manifest.get("index.html"), Some("index.html"));
    let app = manifest.get("app.js").unwrap();
    assert_ne!(app, "app.js");
    // Rename-skipped files are not rewritten into their referrers.
    assert_eq!(tree.read_output(app).unwrap(), "// sw.js registers itself");
    assert!(tree.output().join("rev-manifest.json").is_file());
    assert!(!tree.output().join("manifest.json").exists());
}

#[tokio::test]
async fn test_identical_input_gives_identical_output() {
    let files = [("a.css", "a"), ("b.css", "@import 'a.css';"), ("index.html", "b.css")];
    let first = AssetTree::with_files(&files).unwrap();
    let second = AssetTree::with_files(&files).unwrap();

    let one = run(&first, &RevConfig::default()).await;
    let two = run(&second, &RevConfig::default()).await;
    assert_eq!(one, two);
}

#[tokio::test]
async fn test_rerun_overwrites_previous_output() {
    let tree = AssetTree::with_files(&[("a.js", "v1"), ("index.html", "a.js")]).unwrap();
    let first = run(&tree, &RevConfig::default()).await;

    tree.add("a.js", "v2").unwrap();
    let second = run(&tree, &RevConfig::default()).await;

    assert_ne!(first.get("a.js"), second.get("a.js"));
    let a = second.get("a.js").unwrap();
    assert_eq!(tree.read_output("index.html").unwrap(), a);
    assert_eq!(Manifest::load(&tree.output().join("manifest.json")).unwrap(), second);
}

#[tokio::test]
async fn test_empty_input_writes_empty_manifest() {
    let tree = AssetTree::new().unwrap();
    let manifest = run(&tree, &RevConfig::default()).await;

    assert!(manifest.is_empty());
    assert_eq!(tree.read_output("manifest.json").unwrap(), "{}\n");
}

#[tokio::test]
async fn test_unwritable_output_aborts_without_manifest() {
    let tree = AssetTree::with_files(&[("a.js", "no refs"), ("sub/b.js", "loads a.js")]).unwrap();
    std::fs::create_dir_all(tree.output()).unwrap();
    std::fs::write(tree.output().join("sub"), "not a directory").unwrap();

    let err = revise(tree.input(), tree.output(), &RevConfig::default(), &ProgressBar::hidden())
        .await
        .unwrap_err();

    match err {
        assetrev::core::RevError::IoWriteFailure {
            path,
            ..
        } => assert!(path.starts_with("sub/b."), "{path}"),
        other => panic!("Expected IoWriteFailure, got {other:?}"),
    }
    assert!(!tree.output().join("manifest.json").exists());
}
