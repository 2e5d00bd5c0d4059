//! End-to-end runs of the `lrush` binary

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn lrush() -> Command {
    let mut cmd = Command::cargo_bin("lrush").expect("lrush binary should be built");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cli_zero_capacity_exits_nonzero() {
    lrush()
        .args(["--capacity", "0"])
        .write_stdin("PUT a 1\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid capacity: 0"));
}

#[test]
fn test_cli_negative_capacity_exits_nonzero() {
    lrush()
        .args(["-c", "-3"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid capacity: -3"));
}

#[test]
fn test_cli_missing_script_exits_nonzero() {
    lrush()
        .args(["--script", "/nonexistent/lrush/script.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open script"));
}

#[test]
fn test_cli_stdin_session() {
    lrush()
        .args(["--capacity", "2"])
        .write_stdin("PUT a 1\nPUT b 2\nGET a\nPUT c 3\nKEYS\nBOGUS\n")
        .assert()
        .success()
        .stdout(
            "OK\nOK\n\"1\"\nOK\n1) \"c\"\n2) \"a\"\n(error) ERR unknown command 'BOGUS'\n",
        );
}

#[test]
fn test_cli_script_with_json_stats() {
    let mut script = NamedTempFile::new().unwrap();
    writeln!(script, "PUT a 1").unwrap();
    writeln!(script, "PUT b 2").unwrap();
    writeln!(script, "GET a").unwrap();
    script.flush().unwrap();

    lrush()
        .args(["-c", "1", "--json", "--script"])
        .arg(script.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"evictions\":1"))
        .stdout(predicate::str::contains("\"misses\":1"));
}

#[test]
fn test_cli_default_log_level_is_info() {
    lrush()
        .write_stdin("PUT a 1\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Starting lrush"))
        .stderr(predicate::str::contains("created LRU cache").not());
}

#[test]
fn test_cli_rust_log_raises_verbosity() {
    lrush()
        .env("RUST_LOG", "debug")
        .write_stdin("PUT a 1\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("created LRU cache"))
        .stderr(predicate::str::contains("executing"));

    lrush()
        .env("RUST_LOG", "trace")
        .args(["-c", "1"])
        .write_stdin("PUT a 1\nPUT b 2\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("evicted least recently used entry"));
}
