// tests/cli_tests.rs
// CLI behaviour that does not need a real zsh

use assert_cmd::Command;
use std::path::PathBuf;

fn shipped_cache() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join("zsh_builtins_cache.json")
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("shell_globals").expect("shell_globals binary must be built");
    cmd.env_remove("SHELL_GLOBALS_SHELL").env_remove("SHELL_GLOBALS_CACHE");
    cmd
}

#[test]
fn test_aliases_from_stdin() {
    let output = cli()
        .args(["aliases", "--input", "-"])
        .write_stdin("ll='ls -l'\nnot an alias\ngs=\"git status\"\n")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "ll\tls -l\ngs\tgit status\n");
}

#[test]
fn test_builtins_from_stdin_with_exclude() {
    let output = cli()
        .args(["builtins", "--input", "-", "--exclude", "echo"])
        .write_stdin(".\ncd\necho\n\n")
        .assert()
        .success()
        .get_output()
        .clone();

    assert_eq!(String::from_utf8_lossy(&output.stdout), ".\ncd\n");
}

#[test]
fn test_describe_from_shipped_cache() {
    let output = cli()
        .args(["describe", "cd", "--cache"])
        .arg(shipped_cache())
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Change the current directory\n"));
    assert!(stdout.contains("usage: cd [ -qsLP ] [ arg ]"));
}

#[test]
fn test_describe_unknown_name_fails() {
    cli()
        .args(["describe", "definitely-not-a-builtin", "--cache"])
        .arg(shipped_cache())
        .assert()
        .failure();
}

#[test]
fn test_describe_missing_cache_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli()
        .args(["describe", "cd", "--cache"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .get_output()
        .clone();

    assert!(String::from_utf8_lossy(&output.stderr).contains("description cache unavailable"));
}

#[test]
fn test_list_with_missing_shell_fails() {
    let output = cli()
        .args(["list", "--shell", "/nonexistent/zsh"])
        .assert()
        .failure()
        .get_output()
        .clone();

    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to collect shell globals"));
}

#[test]
fn test_config_file_excludes() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("globals.json");
    std::fs::write(&config, r#"{ "exclude": ["cd"] }"#).unwrap();

    let output = cli()
        .args(["builtins", "--input", "-", "--config"])
        .arg(&config)
        .write_stdin("cd\npwd\n")
        .assert()
        .success()
        .get_output()
        .clone();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "pwd\n");
}
