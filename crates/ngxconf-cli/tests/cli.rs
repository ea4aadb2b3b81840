//! End-to-end tests for the ngxconf binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

const SERVER: &str = "server {\n    listen 80;\n    listen 443;\n    root /srv;\n}\n";

fn write_conf(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("nginx.conf");
    fs::write(&path, contents).unwrap();
    path
}

fn ngxconf() -> Command {
    Command::cargo_bin("ngxconf").unwrap()
}

#[test]
fn check_accepts_a_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_conf(&dir, SERVER);
    ngxconf().arg("check").arg(&path).assert().success();
}

#[test]
fn check_reports_syntax_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_conf(&dir, "worker_processes 4");
    ngxconf()
        .arg("check")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(contains("unterminated directive"));
}

#[test]
fn check_reports_missing_files() {
    ngxconf()
        .arg("check")
        .arg("this_file_does_not_exist.conf")
        .assert()
        .code(3);
}

#[test]
fn get_prints_the_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_conf(&dir, SERVER);
    ngxconf()
        .arg("get")
        .arg(&path)
        .arg("server\\root")
        .assert()
        .success()
        .stdout("/srv\n");
}

#[test]
fn get_fails_on_unresolved_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_conf(&dir, SERVER);
    ngxconf()
        .arg("get")
        .arg(&path)
        .arg("server\\missing")
        .assert()
        .code(2);
}

#[test]
fn values_prints_every_sibling() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_conf(&dir, SERVER);
    ngxconf()
        .arg("values")
        .arg(&path)
        .arg("server\\listen")
        .assert()
        .success()
        .stdout("80\n443\n");
}

#[test]
fn set_in_place_rewrites_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_conf(&dir, SERVER);
    ngxconf()
        .arg("set")
        .arg(&path)
        .arg("server\\root")
        .arg("/var/www")
        .arg("--in-place")
        .assert()
        .success();
    let rewritten = fs::read_to_string(&path).unwrap();
    assert!(rewritten.contains("root /var/www;"));
    assert!(rewritten.contains("listen 80;"));
}

#[test]
fn add_appends_a_directive() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_conf(&dir, SERVER);
    ngxconf()
        .arg("add")
        .arg(&path)
        .arg("server")
        .arg("index")
        .arg("index.html")
        .assert()
        .success()
        .stdout(contains("index index.html;"));
}

#[test]
fn del_all_removes_every_sibling() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_conf(&dir, SERVER);
    ngxconf()
        .arg("del")
        .arg(&path)
        .arg("server\\listen")
        .arg("--all")
        .arg("--in-place")
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "server {\n    root /srv;\n}\n"
    );
}

#[test]
fn del_requires_a_selector() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_conf(&dir, SERVER);
    ngxconf()
        .arg("del")
        .arg(&path)
        .arg("server\\listen")
        .assert()
        .failure();
}

#[test]
fn fmt_normalizes_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_conf(&dir, "server {  listen 80; }\n");
    ngxconf()
        .arg("fmt")
        .arg(&path)
        .assert()
        .success()
        .stdout("server {\n    listen 80;\n}\n");
}

#[test]
fn fmt_honors_the_indent_width() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_conf(&dir, SERVER);
    ngxconf()
        .arg("fmt")
        .arg(&path)
        .arg("--indent")
        .arg("2")
        .assert()
        .success()
        .stdout(contains("\n  listen 80;\n"));
}

#[test]
fn json_dumps_the_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_conf(&dir, SERVER);
    ngxconf()
        .arg("json")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("\"name\": \"server\"").and(contains("\"block\"")));
}
