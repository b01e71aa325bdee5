//! End-to-end tests for `Cmd` terminal actions against real processes.
//!
//! These use `sh`, `cat`, `pwd` and `sleep`, so they only run on Unix.
#![cfg(unix)]

use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use cmdkit::{CaptureBuffer, Cmd, OutputSink, SharedReader, cmd};
use tempfile::TempDir;

fn sh(script: &str) -> Cmd {
    cmd("sh", ["-c", script])
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap()
}

// ============================================================================
// output / lines
// ============================================================================

#[test]
fn output_trims_trailing_newline() {
    assert_eq!(sh("echo hello").output().unwrap(), "hello");
}

#[test]
fn output_trims_surrounding_whitespace() {
    let out = sh("printf '\\n  padded value \\t\\n\\n'").output().unwrap();
    assert_eq!(out, "padded value");
}

#[test]
fn output_with_preassigned_sink_writes_both() {
    let sink = CaptureBuffer::new();
    let captured = sh("echo hello").stdout(sink.clone()).output().unwrap();

    assert_eq!(captured, "hello");
    assert_eq!(sink.to_string(), "hello\n");
}

#[test]
fn output_with_preassigned_file_writes_both() {
    let mut file = tempfile::tempfile().unwrap();
    let captured = sh("echo to-file")
        .stdout(file.try_clone().unwrap())
        .output()
        .unwrap();

    assert_eq!(captured, "to-file");
    file.rewind().unwrap();
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap();
    assert_eq!(contents, "to-file\n");
}

#[test]
fn output_failure_is_an_error() {
    let err = sh("echo partial; exit 3").output().unwrap_err();
    assert_eq!(err.exit_code(), Some(3));
}

#[test]
fn lines_normalises_crlf_after_trimming() {
    let lines = sh("printf 'a\\r\\nb\\n'").lines().unwrap();
    assert_eq!(lines, vec!["a", "b"]);
}

#[test]
fn lines_keeps_interior_empty_lines() {
    let lines = sh("printf 'one\\n\\nthree\\n'").lines().unwrap();
    assert_eq!(lines, vec!["one", "", "three"]);
}

#[test]
fn lines_of_empty_output_is_single_empty_line() {
    assert_eq!(sh("true").lines().unwrap(), vec![""]);
}

#[test]
fn lines_propagates_errors() {
    let err = sh("exit 4").lines().unwrap_err();
    assert_eq!(err.exit_code(), Some(4));
}

// ============================================================================
// run / start
// ============================================================================

#[test]
fn run_reports_exit_status() {
    assert!(sh("exit 0").run().is_ok());

    let err = sh("exit 1").run().unwrap_err();
    assert!(!err.is_spawn());
    assert_eq!(err.exit_code(), Some(1));
}

#[test]
fn missing_program_is_a_spawn_error() {
    let err = Cmd::new("cmdkit-no-such-program-xyz").run().unwrap_err();
    assert!(err.is_spawn());
    assert_eq!(
        err.io_error().map(std::io::Error::kind),
        Some(std::io::ErrorKind::NotFound)
    );

    let err = Cmd::new("cmdkit-no-such-program-xyz").start().unwrap_err();
    assert!(err.is_spawn());
}

#[test]
fn start_returns_before_exit_and_wait_collects_status() {
    let buffer = CaptureBuffer::new();
    let process = sh("sleep 0.2; echo done").stdout(buffer.clone()).start().unwrap();

    assert!(process.id() > 0);
    assert_eq!(process.program(), "sh");
    process.wait().unwrap();
    assert_eq!(buffer.to_string(), "done\n");
}

#[test]
fn started_process_can_be_killed() {
    let mut process = Cmd::new("sleep").arg("30").start().unwrap();
    process.kill().unwrap();

    let err = process.wait().unwrap_err();
    assert!(err.exit_status().is_some());
    assert_eq!(err.exit_code(), None);
}

#[test]
fn start_does_not_report_exit_failure() {
    let process = sh("exit 9").start().unwrap();
    assert_eq!(process.wait().unwrap_err().exit_code(), Some(9));
}

// ============================================================================
// dir
// ============================================================================

#[test]
fn dir_sets_working_directory() {
    let temp = TempDir::new().unwrap();
    let pwd = sh("pwd -P").dir(temp.path()).output().unwrap();
    assert_eq!(PathBuf::from(pwd), canonical(temp.path()));
}

#[test]
fn empty_dir_inherits_callers_directory() {
    let temp = TempDir::new().unwrap();
    let pwd = sh("pwd -P").dir(temp.path()).dir("").output().unwrap();
    assert_eq!(
        PathBuf::from(pwd),
        canonical(&std::env::current_dir().unwrap())
    );
}

#[test]
fn missing_dir_is_a_spawn_error() {
    let temp = TempDir::new().unwrap();
    let err = sh("true").dir(temp.path().join("absent")).run().unwrap_err();
    assert!(err.is_spawn());
}

// ============================================================================
// env
// ============================================================================

#[test]
fn env_later_entry_shadows_earlier() {
    let value = sh("printf %s \"$CMDKIT_SHADOW\"")
        .env("CMDKIT_SHADOW=first")
        .env("CMDKIT_SHADOW=second")
        .output()
        .unwrap();
    assert_eq!(value, "second");
}

#[test]
fn env_inherits_callers_environment() {
    let Some(path) = std::env::var_os("PATH") else {
        return;
    };
    let child_path = sh("printf %s \"$PATH\"").output().unwrap();
    assert_eq!(child_path, path.to_string_lossy());
}

#[test]
fn var_sets_split_pair() {
    let value = sh("printf %s \"$CMDKIT_PAIR\"")
        .var("CMDKIT_PAIR", "a=b")
        .output()
        .unwrap();
    assert_eq!(value, "a=b");
}

// ============================================================================
// streams
// ============================================================================

#[test]
fn default_stdin_is_null_device() {
    assert_eq!(Cmd::new("cat").output().unwrap(), "");
}

#[test]
fn stdin_bytes_are_fed_to_child() {
    let echoed = Cmd::new("cat").stdin("piped input\n").output().unwrap();
    assert_eq!(echoed, "piped input");
}

#[test]
fn stdin_reader_is_drained_into_child() {
    let reader = SharedReader::new(Cursor::new(b"from reader".to_vec()));
    let echoed = Cmd::new("cat").stdin(reader).output().unwrap();
    assert_eq!(echoed, "from reader");
}

#[test]
fn stdin_ignores_child_that_stops_reading() {
    let input = "x".repeat(1 << 20);
    assert!(sh("exit 0").stdin(input).run().is_ok());
}

#[test]
fn stdin_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("input.txt");
    fs::write(&path, "file input").unwrap();

    let echoed = Cmd::new("cat")
        .stdin(fs::File::open(&path).unwrap())
        .output()
        .unwrap();
    assert_eq!(echoed, "file input");
}

#[test]
fn stderr_can_be_captured() {
    let errors = CaptureBuffer::new();
    sh("echo oops >&2").stderr(errors.clone()).run().unwrap();
    assert_eq!(errors.to_string(), "oops\n");
}

#[test]
fn null_stderr_discards() {
    let out = sh("echo visible; echo hidden >&2")
        .stderr(OutputSink::Null)
        .output()
        .unwrap();
    assert_eq!(out, "visible");
}

#[test]
fn stdout_to_file_on_run() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out.txt");
    let file = fs::File::create(&path).unwrap();

    sh("echo written").stdout(file).run().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "written\n");
}

#[test]
fn stdout_to_shared_writer_on_run() {
    let buffer = CaptureBuffer::new();
    sh("echo one; echo two").stdout(buffer.clone()).run().unwrap();
    assert_eq!(buffer.to_string(), "one\ntwo\n");
}

// ============================================================================
// shell
// ============================================================================

#[cfg(target_os = "linux")]
#[test]
fn shell_runs_through_bash() {
    if !Path::new("/bin/bash").exists() && !Path::new("/usr/bin/bash").exists() {
        return;
    }
    assert_eq!(cmdkit::shell("echo hi").output().unwrap(), "hi");
    assert_eq!(
        cmdkit::shell("printf '%s' \"$BASH_VERSION\" | cut -c1")
            .output()
            .unwrap()
            .len(),
        1
    );
}
