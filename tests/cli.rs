use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn workspace(reference: &str, hypothesis: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ref.txt"), reference).unwrap();
    fs::write(dir.path().join("hyp.txt"), hypothesis).unwrap();
    dir
}

fn werdiff(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("werdiff").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .arg("--no-color");
    cmd
}

#[test]
fn test_identical_transcripts() {
    let dir = workspace("the cat sat\n", "the cat sat\n");
    werdiff(dir.path())
        .args(["ref.txt", "hyp.txt", "--tag", "same"])
        .assert()
        .success()
        .stdout(predicate::str::contains("same wer: 0"))
        .stdout(predicate::str::contains("Printed comparison to:"));

    let html = fs::read_to_string(dir.path().join("comparison_same.html")).unwrap();
    assert!(html.contains("<p>the cat sat</p>"));
}

#[test]
fn test_substitution_report() {
    let dir = workspace("the cat sat\n", "the dog sat\n");
    werdiff(dir.path())
        .args(["ref.txt", "hyp.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hyp wer: 33.33"));

    let html = fs::read_to_string(dir.path().join("comparison_hyp.html")).unwrap();
    assert!(html.contains("<span class=\"y\">dog(cat)</span>"));
}

#[test]
fn test_normalization_flags() {
    let dir = workspace("Um, the cat sat.\n", "the cat, uh, sat\n");
    werdiff(dir.path())
        .args(["ref.txt", "hyp.txt", "-p", "-d", "-t", "norm", "--no-html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("norm wer: 0"));
    assert!(!dir.path().join("comparison_norm.html").exists());
}

#[test]
fn test_json_output() {
    let dir = workspace("a b\n", "a\n");
    let output = werdiff(dir.path())
        .args(["ref.txt", "hyp.txt", "-o", "json", "--no-html"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["wer"], 50.0);
    assert_eq!(json["complete"], true);
    assert_eq!(json["tokens"][1]["op"], "deletion");
    assert_eq!(json["tokens"][1]["reference"], "b");
}

#[test]
fn test_show_alignment() {
    let dir = workspace("a b c\n", "a x c d\n");
    werdiff(dir.path())
        .args(["ref.txt", "hyp.txt", "--show", "--no-html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a ~x(b) c +d"));
}

#[test]
fn test_empty_reference_fails() {
    let dir = workspace("\n", "something here\n");
    werdiff(dir.path())
        .args(["ref.txt", "hyp.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reference word sequence is empty"));
}

#[test]
fn test_missing_input_fails() {
    let dir = workspace("a\n", "a\n");
    werdiff(dir.path())
        .args(["nope.txt", "hyp.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.txt"));
}

#[test]
fn test_unwritable_output_dir_fails() {
    let dir = workspace("a\n", "a\n");
    werdiff(dir.path())
        .args(["ref.txt", "hyp.txt", "--output-dir", "missing/sub/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write report"));
}

#[test]
fn test_max_wer_threshold() {
    let dir = workspace("a b\n", "a c\n");
    werdiff(dir.path())
        .args(["ref.txt", "hyp.txt", "--no-html", "--max-wer", "10"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exceeds maximum"));

    werdiff(dir.path())
        .args(["ref.txt", "hyp.txt", "--no-html", "--max-wer", "50"])
        .assert()
        .success();
}

#[test]
fn test_local_config_file() {
    let dir = workspace("uh hello world\n", "hello world\n");
    fs::write(dir.path().join(".werdiff.toml"), "drop_fillers = true\n").unwrap();
    werdiff(dir.path())
        .args(["ref.txt", "hyp.txt", "--no-html", "-t", "cfg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cfg wer: 0"));
}

#[test]
fn test_cli_flag_turns_off_config_setting() {
    let dir = workspace("uh hello world\n", "hello world\n");
    fs::write(dir.path().join(".werdiff.toml"), "drop_fillers = true\n").unwrap();
    werdiff(dir.path())
        .args(["ref.txt", "hyp.txt", "--no-html", "-t", "keep", "--no-drop-fillers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keep wer: 33.33"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_global_config_is_isolated() {
    let dir = workspace("Hello.\n", "hello\n");
    let global = dir.path().join(".config").join("werdiff");
    fs::create_dir_all(&global).unwrap();
    fs::write(global.join("config.toml"), "strip_punctuation = true\n").unwrap();
    werdiff(dir.path())
        .args(["ref.txt", "hyp.txt", "--no-html", "-t", "g"])
        .assert()
        .success()
        .stdout(predicate::str::contains("g wer: 0"));
}

#[test]
fn test_tag_with_path_separator_fails() {
    let dir = workspace("a\n", "a\n");
    fs::create_dir(dir.path().join("out")).unwrap();
    werdiff(dir.path())
        .args(["ref.txt", "hyp.txt", "--output-dir", "out", "-t", "../x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tag"));
    assert!(!dir.path().join("comparison_x.html").exists());
}
