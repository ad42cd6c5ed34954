//! Binary behavior when stdin is not a terminal

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rawkey(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rawkey").unwrap();
    // keep the user's real config out of the way
    cmd.env("RAWKEY_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("RAWKEY_LOG_FILE")
        .env_remove("RAWKEY_LOG");
    cmd
}

#[test]
fn piped_stdin_fails_on_capture() {
    let dir = TempDir::new().unwrap();
    rawkey(&dir)
        .write_stdin("abqc")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("error: tcgetattr: "));
}

#[test]
fn capture_failure_does_not_attempt_restore() {
    let dir = TempDir::new().unwrap();
    rawkey(&dir)
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("tcsetattr").not());
}

#[test]
fn quit_key_and_timeout_are_not_options() {
    let dir = TempDir::new().unwrap();
    for args in [["--quit", "x"], ["--timeout", "0"]] {
        rawkey(&dir)
            .args(args)
            .write_stdin("")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unexpected argument"));
    }
}

#[test]
fn timeout_env_is_ignored() {
    let dir = TempDir::new().unwrap();
    // still fails on the pipe, not on anything timeout-related
    rawkey(&dir)
        .env("RAWKEY_TIMEOUT", "0")
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: tcgetattr: "));
}

#[test]
fn log_file_records_the_failure_path() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("rawkey.log");
    rawkey(&dir)
        .arg("--log-file")
        .arg(&log)
        .write_stdin("q")
        .assert()
        .code(1);
    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("starting"), "log was: {contents}");
}

#[test]
fn config_subcommand_shows_effective_values() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "log_file = \"/tmp/rawkey-test.log\"\nquit_key = \"x\"\n",
    )
    .unwrap();

    rawkey(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("log_file: /tmp/rawkey-test.log"))
        .stdout(predicate::str::contains("quit_key").not());
}
