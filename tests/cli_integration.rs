//! Integration tests for the PwVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.  The
//! master secret is always passed with `--master` so nothing prompts, and
//! each test runs in its own temp dir with cheap Argon2 settings.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const FAST_CONFIG: &str = "argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n";

/// Helper: get a Command pointing at the pwvault binary.
fn pwvault() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("pwvault").expect("binary should exist");
    cmd.env_remove("PWVAULT_MASTER");
    cmd
}

/// Helper: a temp project dir with a vault that has the clipboard turned off.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child(".pwvault.toml").write_str(FAST_CONFIG).unwrap();

    pwvault()
        .args(["--master", "hunter2", "config", "copyToClipboard", "false"])
        .current_dir(tmp.path())
        .assert()
        .success();

    tmp
}

fn add(tmp: &TempDir, alias: &str, secret: &str) {
    pwvault()
        .args(["--master", "hunter2", "add", alias])
        .current_dir(tmp.path())
        .write_stdin(format!("{secret}\n"))
        .assert()
        .success();
}

#[test]
fn help_flag_shows_usage() {
    pwvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted local password store"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list-all"))
        .stdout(predicate::str::contains("find"))
        .stdout(predicate::str::contains("reset"));
}

#[test]
fn version_flag_shows_version() {
    pwvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pwvault"));
}

#[test]
fn no_args_shows_help() {
    pwvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn first_command_creates_vault_file() {
    let tmp = project();
    tmp.child("pwvault.json").assert(predicate::path::exists());
}

#[test]
fn add_then_get_reveals_secret() {
    let tmp = project();
    add(&tmp, "email", "p@ss!23");

    pwvault()
        .args(["--master", "hunter2", "get", "email"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("p@ss!23"));
}

#[test]
fn wrong_master_fails() {
    let tmp = project();
    add(&tmp, "email", "p@ss!23");

    pwvault()
        .args(["--master", "hunter3", "get", "email"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong master secret"))
        .stdout(predicate::str::contains("p@ss!23").not());
}

#[test]
fn master_can_come_from_env() {
    let tmp = project();
    add(&tmp, "email", "p@ss!23");

    pwvault()
        .args(["get", "email"])
        .env("PWVAULT_MASTER", "hunter2")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("p@ss!23"));
}

#[test]
fn add_duplicate_alias_fails() {
    let tmp = project();
    add(&tmp, "email", "one");

    pwvault()
        .args(["--master", "hunter2", "add", "email"])
        .current_dir(tmp.path())
        .write_stdin("two\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn get_unknown_alias_fails() {
    let tmp = project();

    pwvault()
        .args(["--master", "hunter2", "get", "nothing"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn find_lists_matches_shortest_first() {
    let tmp = project();
    add(&tmp, "ccc", "3");
    add(&tmp, "a", "1");
    add(&tmp, "bb", "2");

    pwvault()
        .args(["--master", "hunter2", "find"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)a\n.*bb\n.*ccc\n").unwrap());
}

#[test]
fn find_exact_alias_reveals_it() {
    let tmp = project();
    add(&tmp, "bank", "moneymoney");
    add(&tmp, "bank-old", "old");

    pwvault()
        .args(["--master", "hunter2", "find", "bank"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("moneymoney"));
}

#[test]
fn list_all_reveals_everything() {
    let tmp = project();
    add(&tmp, "email", "one");
    add(&tmp, "bank", "two");

    pwvault()
        .args(["--master", "hunter2", "list-all"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("one"))
        .stdout(predicate::str::contains("two"));
}

#[test]
fn hide_in_console_suppresses_secret() {
    let tmp = project();
    add(&tmp, "email", "do-not-print");

    pwvault()
        .args(["--master", "hunter2", "config", "hideInConsole", "true"])
        .current_dir(tmp.path())
        .assert()
        .success();

    pwvault()
        .args(["--master", "hunter2", "get", "email"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("email"))
        .stdout(predicate::str::contains("do-not-print").not());
}

#[test]
fn edit_with_rename_moves_entry() {
    let tmp = project();
    add(&tmp, "email", "old");

    pwvault()
        .args(["--master", "hunter2", "edit", "email", "--rename", "mail"])
        .current_dir(tmp.path())
        .write_stdin("new\n")
        .assert()
        .success();

    pwvault()
        .args(["--master", "hunter2", "get", "mail"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("new"));

    pwvault()
        .args(["--master", "hunter2", "get", "email"])
        .current_dir(tmp.path())
        .assert()
        .failure();
}

#[test]
fn delete_with_force_removes_entry() {
    let tmp = project();
    add(&tmp, "email", "x");

    pwvault()
        .args(["--master", "hunter2", "delete", "email", "--force"])
        .current_dir(tmp.path())
        .assert()
        .success();

    pwvault()
        .args(["--master", "hunter2", "get", "email"])
        .current_dir(tmp.path())
        .assert()
        .failure();
}

#[test]
fn add_generated_secret_has_requested_length() {
    let tmp = project();

    pwvault()
        .args(["--master", "hunter2", "add", "wifi", "--generate", "--length", "24"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^[A-Za-z0-9]{24}$").unwrap());
}

#[test]
fn generate_prints_alphanumeric_secret() {
    pwvault()
        .args(["generate", "16"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[A-Za-z0-9]{16}\n$").unwrap());
}

#[test]
fn generate_rejects_zero_length() {
    pwvault().args(["generate", "0"]).assert().failure();
}

#[test]
fn config_reads_without_master() {
    let tmp = project();

    pwvault()
        .args(["config", "copyToClipboard"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("false"));
}

#[test]
fn reset_with_backup_keeps_copy() {
    let tmp = project();
    add(&tmp, "email", "x");

    pwvault()
        .args(["--master", "hunter2", "reset", "--backup", "--force"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created"));

    tmp.child("pwvault.json").assert(predicate::path::missing());

    let backups: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with("-pwvault.json"))
        .collect();
    assert_eq!(backups.len(), 1);
}

#[test]
fn reset_of_malformed_vault_needs_no_master() {
    let tmp = TempDir::new().unwrap();
    tmp.child("pwvault.json").write_str("{ broken").unwrap();

    pwvault()
        .args(["reset", "--no-backup", "--force"])
        .current_dir(tmp.path())
        .assert()
        .success();

    tmp.child("pwvault.json").assert(predicate::path::missing());
}

#[test]
fn malformed_vault_is_reported() {
    let tmp = TempDir::new().unwrap();
    tmp.child("pwvault.json").write_str("not json").unwrap();

    pwvault()
        .args(["--master", "hunter2", "list"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed vault file"));
}

#[test]
fn keyfile_generate_then_unlock_with_path() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".pwvault.toml").write_str(FAST_CONFIG).unwrap();

    pwvault()
        .args(["keyfile-generate", "master.key"])
        .current_dir(tmp.path())
        .assert()
        .success();
    tmp.child("master.key").assert(predicate::path::is_file());

    pwvault()
        .args(["--master", "master.key", "config", "copyToClipboard", "false"])
        .current_dir(tmp.path())
        .assert()
        .success();

    pwvault()
        .args(["--master", "master.key", "add", "email"])
        .current_dir(tmp.path())
        .write_stdin("x\n")
        .assert()
        .success();

    let key = std::fs::read_to_string(tmp.path().join("master.key")).unwrap();
    pwvault()
        .args(["--master", key.trim_end(), "get", "email"])
        .current_dir(tmp.path())
        .assert()
        .success();
}

#[test]
fn vault_flag_overrides_config() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".pwvault.toml").write_str(FAST_CONFIG).unwrap();

    pwvault()
        .args([
            "--master", "hunter2", "--vault", "nested/other.json", "config", "hideMaster", "false",
        ])
        .current_dir(tmp.path())
        .assert()
        .success();

    tmp.child("nested/other.json").assert(predicate::path::exists());
    tmp.child("pwvault.json").assert(predicate::path::missing());
}

#[test]
fn completions_bash_generates_script() {
    pwvault()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pwvault"));
}

#[test]
fn completions_unknown_shell_fails() {
    pwvault().args(["completions", "tcsh"]).assert().failure();
}
