//! Integration tests for the `cortex-edit` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cortex_edit() -> Command {
    let mut cmd = Command::cargo_bin("cortex-edit").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("CORTEX_EDIT_CONTEXT_LINES")
        .env_remove("CORTEX_EDIT_MAX_FILE_SIZE");
    cmd
}

#[test]
fn test_apply_prints_unified_diff() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("greeting.txt"), "Hello World\nHello Universe\n").unwrap();

    cortex_edit()
        .args(["apply", "greeting.txt", "--cwd"])
        .arg(temp.path())
        .args(["--edits", r#"[{"old_string": "Hello", "new_string": "Hi"}]"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("-Hello World"))
        .stdout(predicate::str::contains("+Hi World"))
        .stdout(predicate::str::contains("@@ -1,2 +1,2 @@"));

    let untouched = fs::read_to_string(temp.path().join("greeting.txt")).unwrap();
    assert_eq!(untouched, "Hello World\nHello Universe\n");
}

#[test]
fn test_apply_json_from_stdin_and_write() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("abc.txt"), "A\nB\nC").unwrap();

    cortex_edit()
        .args(["apply", "abc.txt", "--edits", "-", "--format", "json", "--write", "--cwd"])
        .arg(temp.path())
        .write_stdin(
            r#"{"edits": [
                {"old_string": "A", "new_string": "Alpha"},
                {"old_string": "C", "new_string": "Charlie"}
            ]}"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""updatedContent": "Alpha\nB\nCharlie""#));

    let written = fs::read_to_string(temp.path().join("abc.txt")).unwrap();
    assert_eq!(written, "Alpha\nB\nCharlie");
}

#[test]
fn test_dependent_batch_is_rejected() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("abc.txt"), "A\nB\nC").unwrap();

    cortex_edit()
        .args(["apply", "abc.txt", "--write", "--cwd"])
        .arg(temp.path())
        .args([
            "--edits",
            r#"[{"old_string": "A", "new_string": "X"}, {"old_string": "X", "new_string": "Y"}]"#,
        ])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "old_string is a substring of a new_string",
        ));

    let untouched = fs::read_to_string(temp.path().join("abc.txt")).unwrap();
    assert_eq!(untouched, "A\nB\nC");
}

#[test]
fn test_missing_file_fails() {
    let temp = TempDir::new().unwrap();

    cortex_edit()
        .args(["apply", "missing.txt", "--cwd"])
        .arg(temp.path())
        .args(["--edits", r#"[{"old_string": "Old", "new_string": "New"}]"#])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_config_file_context_lines() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("n.txt"), "1\n2\n3\n4\n5\n").unwrap();
    let config = temp.path().join("edit.toml");
    fs::write(&config, "context_lines = 0\n").unwrap();

    cortex_edit()
        .args(["apply", "n.txt", "--cwd"])
        .arg(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["--edits", r#"[{"old_string": "3", "new_string": "three"}]"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("@@ -3,1 +3,1 @@"))
        .stdout(predicate::str::contains(" 2").not());
}

#[test]
fn test_preview_write_tool() {
    let temp = TempDir::new().unwrap();

    cortex_edit()
        .args(["preview", "--cwd"])
        .arg(temp.path())
        .args([
            "--tool-use",
            r##"{"name": "write", "params": {"file_path": "notes/new.md", "content": "# Notes\n"}}"##,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""fileName": "notes/new.md""#))
        .stdout(predicate::str::contains(r##""newContent": "# Notes\n""##));

    assert!(!temp.path().join("notes/new.md").exists());
}

#[test]
fn test_edits_file_with_bracketed_name() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "one\ntwo\n").unwrap();
    fs::write(
        temp.path().join("[batch].json"),
        r#"[{"old_string": "two", "new_string": "2"}]"#,
    )
    .unwrap();

    cortex_edit()
        .current_dir(temp.path())
        .args(["apply", "a.txt", "--edits", "[batch].json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+2"));
}

#[test]
fn test_preview_unchanged_write() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("same.txt"), "keep\n").unwrap();

    cortex_edit()
        .args(["preview", "--cwd"])
        .arg(temp.path())
        .args([
            "--tool-use",
            r#"{"name": "write", "params": {"file_path": "same.txt", "content": "keep\n"}}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""hunks": []"#));
}
