use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const LIST: &str = r#"<ol start="2"><li>a</li><li>b</li></ol>"#;

#[test]
fn default_numbering_is_literal() {
    let mut cmd = cargo_bin_cmd!("memo-clip");
    cmd.arg("convert").arg("-").write_stdin(LIST);

    cmd.assert().success().stdout("1. a\n1. b\n");
}

#[test]
fn convert_respects_numbering_from_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("memo-clip.toml");
    fs::write(
        &config_path,
        r#"[convert]
list_numbering = "sequential"
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("memo-clip");
    cmd.arg("convert")
        .arg("-")
        .arg("--config")
        .arg(config_path.as_os_str())
        .write_stdin(LIST);

    cmd.assert().success().stdout("2. a\n3. b\n");
}

#[test]
fn extra_args_override_config() {
    let mut cmd = cargo_bin_cmd!("memo-clip");
    cmd.arg("convert")
        .arg("-")
        .arg("--extra-list-numbering")
        .arg("sequential")
        .arg("--extra-escape-text")
        .write_stdin("<ol><li>a_b</li></ol>");

    cmd.assert().success().stdout("1. a\\_b\n");
}

#[test]
fn invalid_boolean_override_fails() {
    let mut cmd = cargo_bin_cmd!("memo-clip");
    cmd.arg("convert")
        .arg("-")
        .arg("--extra-escape-text")
        .arg("maybe")
        .write_stdin("<p>x</p>");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid boolean value 'maybe'"));
}

#[test]
fn unknown_extra_is_reported() {
    let mut cmd = cargo_bin_cmd!("memo-clip");
    cmd.arg("convert")
        .arg("-")
        .arg("--extra-bogus")
        .arg("1")
        .write_stdin("<p>x</p>");

    cmd.assert()
        .success()
        .stdout("x\n")
        .stderr(predicate::str::contains("ignoring unknown option --extra-bogus"));
}

#[test]
fn missing_config_file_fails() {
    let mut cmd = cargo_bin_cmd!("memo-clip");
    cmd.arg("convert")
        .arg("-")
        .arg("--config")
        .arg("/definitely/not/here/memo-clip.toml")
        .write_stdin("<p>x</p>");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
