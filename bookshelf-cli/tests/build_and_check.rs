use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn shipped_templates() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("tmpl")
}

fn bookshelf(cwd: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").expect("bookshelf binary");
    cmd.current_dir(cwd.path()).env_remove("RUST_LOG");
    cmd
}

fn write_library(root: &TempDir) -> PathBuf {
    let content = root.path().join("books");
    fs::create_dir_all(&content).unwrap();
    fs::write(
        content.join("go.yaml"),
        "slug: go\ntitle: Essential Go\nchapters:\n  - slug: maps\n    title: Maps\n    articles:\n      - slug: create\n        title: Create\n        body: \"<p>m</p>\"\n",
    )
    .unwrap();
    content
}

#[test]
fn build_writes_site_and_prints_summary() {
    let root = TempDir::new().unwrap();
    let content = write_library(&root);
    let out = root.path().join("www");

    bookshelf(&root)
        .arg("build")
        .arg("--content")
        .arg(&content)
        .arg("--templates")
        .arg(shipped_templates())
        .arg("--output")
        .arg(&out)
        .args(["--minify", "--concurrency", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Essential Go (1 chapters, 1 articles)"))
        .stdout(predicate::str::contains("% saved"));

    assert!(out.join("index.html").is_file());
    assert!(out.join("essential/go/maps/create.html").is_file());
    assert!(out.join("sitemap.xml").is_file());
}

#[test]
fn build_fails_on_missing_content_dir() {
    let root = TempDir::new().unwrap();
    bookshelf(&root)
        .arg("build")
        .arg("--content")
        .arg(root.path().join("nope"))
        .arg("--templates")
        .arg(shipped_templates())
        .assert()
        .failure()
        .stderr(predicate::str::contains("site generation failed"));
    assert!(!root.path().join("www").join("essential").exists());
}

#[test]
fn zero_concurrency_is_rejected() {
    let root = TempDir::new().unwrap();
    bookshelf(&root)
        .args(["build", "--concurrency", "0"])
        .assert()
        .failure();
}

#[test]
fn config_file_is_picked_up_from_working_directory() {
    let root = TempDir::new().unwrap();
    write_library(&root);
    fs::write(
        root.path().join("bookshelf.yaml"),
        format!(
            "templates_dir: {}\noutput_dir: site\ndisabled_templates: [about.tmpl.html]\n",
            shipped_templates().display()
        ),
    )
    .unwrap();

    bookshelf(&root).arg("build").assert().success();
    assert!(root.path().join("site/index.html").is_file());
    assert!(!root.path().join("site/about.html").exists());
}

#[test]
fn unknown_config_key_is_an_error() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("bookshelf.yaml"), "minfy: true\n").unwrap();
    bookshelf(&root)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn check_reports_counts_without_writing() {
    let root = TempDir::new().unwrap();
    let content = write_library(&root);

    bookshelf(&root)
        .arg("check")
        .arg("--content")
        .arg(&content)
        .arg("--templates")
        .arg(shipped_templates())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 books, 1 chapters, 1 articles; 7 templates parsed"));
    assert!(!root.path().join("www").exists());
}
