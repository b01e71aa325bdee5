//! Smoke tests for the cmdkit binary.

use std::process::Command;

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;

fn cmdkit() -> Command {
    let mut command = Command::new(assert_cmd::cargo::cargo_bin!("cmdkit"));
    command.arg("--no-config");
    command
}

#[test]
fn test_help_lists_subcommands() {
    cmdkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("sh"))
        .stdout(predicate::str::contains("shell-info"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    cmdkit().arg("frobnicate").assert().code(2);
}

#[test]
fn test_shell_info_prints_flag() {
    let expected = if cfg!(windows) { "-Command" } else { "-c" };
    cmdkit()
        .arg("shell-info")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_missing_program_exits_127() {
    cmdkit()
        .args(["run", "cmdkit-no-such-program-smoke"])
        .assert()
        .code(127)
        .stderr(predicate::str::contains("cmdkit-no-such-program-smoke"));
}

#[cfg(unix)]
#[test]
fn test_run_streams_child_stdout() {
    cmdkit()
        .args(["run", "--", "sh", "-c", "echo streamed"])
        .assert()
        .success()
        .stdout("streamed\n");
}

#[cfg(unix)]
#[test]
fn test_run_passes_exit_code_through() {
    cmdkit()
        .args(["run", "--", "sh", "-c", "exit 7"])
        .assert()
        .code(7);
}

#[cfg(unix)]
#[test]
fn test_capture_prints_trimmed_output_once() {
    cmdkit()
        .args(["run", "--capture", "--", "sh", "-c", "printf '  spaced  \\n\\n'"])
        .assert()
        .success()
        .stdout("spaced\n");
}

#[cfg(unix)]
#[test]
fn test_lines_prints_json_array() {
    cmdkit()
        .args(["run", "--lines", "--", "sh", "-c", "printf 'a\\r\\nb\\n'"])
        .assert()
        .success()
        .stdout("[\"a\",\"b\"]\n");
}

#[cfg(unix)]
#[test]
fn test_env_flag_reaches_child() {
    cmdkit()
        .args([
            "run",
            "--env",
            "CMDKIT_SMOKE=hello",
            "--capture",
            "--",
            "sh",
            "-c",
            "printf %s \"$CMDKIT_SMOKE\"",
        ])
        .assert()
        .success()
        .stdout("hello\n");
}

#[cfg(unix)]
#[test]
fn test_config_file_sets_factory_env() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = temp.path().join("cmdkit.toml");
    std::fs::write(&config, "env = [\"CMDKIT_FROM_CONFIG=yes\"]\n").unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("cmdkit"))
        .arg("--config")
        .arg(&config)
        .args(["run", "--capture", "--", "sh", "-c", "printf %s \"$CMDKIT_FROM_CONFIG\""])
        .assert()
        .success()
        .stdout("yes\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_sh_runs_script_through_host_shell() {
    if !std::path::Path::new("/bin/bash").exists() {
        return;
    }
    cmdkit()
        .args(["sh", "--capture", "echo from-shell | tr a-z A-Z"])
        .assert()
        .success()
        .stdout("FROM-SHELL\n");
}
