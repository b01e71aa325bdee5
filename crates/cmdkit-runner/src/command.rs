use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::env::{self, EnvVar};
use crate::error::CommandError;
use crate::process::{Launch, Process};
use crate::shell::ShellInvocation;
use crate::stdio::{InputSource, OutputSink, OutputStream};
use crate::tee::{CaptureBuffer, TeeWriter};

// ============================================================================
// Cmd - fluent process builder
// ============================================================================

/// Builder for a single process launch.
///
/// Configuration methods consume and return the builder so calls chain;
/// terminal actions ([`build`](Self::build), [`start`](Self::start),
/// [`run`](Self::run), [`output`](Self::output), [`lines`](Self::lines))
/// consume it, so a builder launches at most one process.
///
/// Defaults:
/// - stdin and stdout are the null device
/// - stderr is the calling process's stderr
/// - the environment is a snapshot of the calling process's environment
/// - the working directory is inherited
///
/// # Example
///
/// ```rust,no_run
/// use cmdkit_runner::cmd;
///
/// let branch = cmd("git", ["rev-parse", "--abbrev-ref", "HEAD"])
///     .dir("/path/to/repo")
///     .env("GIT_PAGER=cat")
///     .output()?;
/// # Ok::<(), cmdkit_runner::CommandError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    dir: PathBuf,
    stdin: InputSource,
    stdout: OutputSink,
    stderr: OutputSink,
    env: Vec<EnvVar>,
}

/// Create a [`Cmd`] for `program` with `args`.
pub fn cmd<I, S>(program: impl Into<OsString>, args: I) -> Cmd
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    Cmd::new(program).args(args)
}

/// Create a [`Cmd`] that runs `script` through the host shell.
///
/// Linux: `bash -c`, macOS: `zsh -c`, Windows: `powershell -Command`,
/// anything else: `$SHELL -c`.
pub fn shell(script: impl Into<OsString>) -> Cmd {
    Cmd::shell(script)
}

impl Cmd {
    /// Create a builder for `program` with no arguments.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            dir: PathBuf::new(),
            stdin: InputSource::Null,
            stdout: OutputSink::Null,
            stderr: OutputSink::Inherit,
            env: env::inherited(),
        }
    }

    /// Create a builder that runs `script` through the host shell.
    pub fn shell(script: impl Into<OsString>) -> Self {
        let (program, args) = ShellInvocation::current().argv(script);
        Self::new(program).args(args)
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory. An empty path runs the process in the
    /// caller's current directory.
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Set stdin. [`InputSource::Null`] reads from the null device.
    pub fn stdin(mut self, stdin: impl Into<InputSource>) -> Self {
        self.stdin = stdin.into();
        self
    }

    /// Set stdout. [`OutputSink::Null`] discards it.
    pub fn stdout(mut self, stdout: impl Into<OutputSink>) -> Self {
        self.stdout = stdout.into();
        self
    }

    /// Set stderr. [`OutputSink::Null`] discards it.
    pub fn stderr(mut self, stderr: impl Into<OutputSink>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// Connect stdin, stdout and stderr to the caller's own streams.
    pub fn interactive(mut self) -> Self {
        self.stdin = InputSource::Inherit;
        self.stdout = OutputSink::Inherit;
        self.stderr = OutputSink::Inherit;
        self
    }

    /// Append a `KEY=VALUE` entry to the environment.
    ///
    /// Entries accumulate; a later entry for the same key shadows an earlier
    /// one when the process starts. Entries without `=` are ignored.
    pub fn env(self, entry: impl AsRef<str>) -> Self {
        self.envs([entry])
    }

    /// Append several `KEY=VALUE` entries to the environment.
    pub fn envs<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.env.extend(env::parse_entries(entries));
        self
    }

    /// Append an already-split environment entry.
    pub fn var(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push(EnvVar::new(key, value));
        self
    }

    pub(crate) fn push_env(&mut self, vars: &[EnvVar]) {
        self.env.extend_from_slice(vars);
    }

    pub(crate) fn set_dir(&mut self, dir: &Path) {
        self.dir = dir.to_path_buf();
    }

    pub(crate) fn set_streams(
        &mut self,
        stdin: Option<&InputSource>,
        stdout: Option<&OutputSink>,
        stderr: Option<&OutputSink>,
    ) {
        if let Some(stdin) = stdin {
            self.stdin = stdin.clone();
        }
        if let Some(stdout) = stdout {
            self.stdout = stdout.clone();
        }
        if let Some(stderr) = stderr {
            self.stderr = stderr.clone();
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    #[must_use]
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Working directory, or `None` when the caller's is inherited.
    #[must_use]
    pub fn get_dir(&self) -> Option<&Path> {
        (!self.dir.as_os_str().is_empty()).then_some(self.dir.as_path())
    }

    /// Environment entries in the order they were added.
    #[must_use]
    pub fn environ(&self) -> &[EnvVar] {
        &self.env
    }

    #[must_use]
    pub fn stdin_source(&self) -> &InputSource {
        &self.stdin
    }

    #[must_use]
    pub fn stdout_sink(&self) -> &OutputSink {
        &self.stdout
    }

    #[must_use]
    pub fn stderr_sink(&self) -> &OutputSink {
        &self.stderr
    }

    // ------------------------------------------------------------------------
    // Terminal actions
    // ------------------------------------------------------------------------

    /// Return the configured, unstarted platform command.
    ///
    /// This is a low-level escape hatch. Streams backed by bytes, readers or
    /// writers are configured as pipes and nothing services them: the caller
    /// owns the pipes of whatever it spawns. Prefer [`start`](Self::start),
    /// [`run`](Self::run) or [`output`](Self::output).
    pub fn build(self) -> Result<Command, CommandError> {
        self.into_launch().map(|launch| launch.command)
    }

    /// Like [`build`](Self::build), for callers driving an async runtime.
    pub fn build_async(self) -> Result<tokio::process::Command, CommandError> {
        self.build().map(tokio::process::Command::from)
    }

    /// Start the process without waiting for it.
    ///
    /// Fails only if the process could not be created.
    pub fn start(self) -> Result<Process, CommandError> {
        self.into_launch()?.spawn()
    }

    /// Start the process and wait for it to exit successfully.
    pub fn run(self) -> Result<(), CommandError> {
        self.start()?.wait()
    }

    /// Run the process and return its stdout with surrounding whitespace
    /// trimmed.
    ///
    /// If stdout was already pointed somewhere other than the null device,
    /// output goes to that sink as well as being captured.
    pub fn output(mut self) -> Result<String, CommandError> {
        let capture = CaptureBuffer::new();
        let assigned = std::mem::take(&mut self.stdout)
            .into_writer(OutputStream::Stdout)
            .map_err(|source| CommandError::Spawn {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })?;

        self.stdout = match assigned {
            Some(existing) => OutputSink::writer(TeeWriter::new(vec![existing]).with(capture.clone())),
            None => OutputSink::from(capture.clone()),
        };

        self.run()?;
        Ok(capture.to_string().trim().to_string())
    }

    /// Like [`output`](Self::output), split into lines.
    ///
    /// `\r\n` is normalised to `\n` before splitting. Trimming happens first,
    /// so a trailing line terminator does not produce a trailing empty line;
    /// empty output yields a single empty line.
    pub fn lines(self) -> Result<Vec<String>, CommandError> {
        self.output().map(|output| split_lines(&output))
    }

    fn into_launch(self) -> Result<Launch, CommandError> {
        let program = self.program.to_string_lossy().into_owned();
        let spawn_error = |source| CommandError::Spawn {
            program: program.clone(),
            source,
        };

        let (stdin, stdin_feed) = self.stdin.into_stdio().map_err(spawn_error)?;
        let (stdout, stdout_pump) = self.stdout.into_stdio().map_err(spawn_error)?;
        let (stderr, stderr_pump) = self.stderr.into_stdio().map_err(spawn_error)?;

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if !self.dir.as_os_str().is_empty() {
            command.current_dir(&self.dir);
        }
        command.env_clear();
        for var in &self.env {
            command.env(&var.key, &var.value);
        }
        command.stdin(stdin).stdout(stdout).stderr(stderr);

        tracing::trace!(
            program = %program,
            args = self.args.len(),
            dir = %self.dir.display(),
            env = self.env.len(),
            "prepared command"
        );

        Ok(Launch {
            program,
            command,
            stdin: stdin_feed,
            stdout: stdout_pump,
            stderr: stderr_pump,
        })
    }
}

pub(crate) fn split_lines(output: &str) -> Vec<String> {
    output
        .replace("\r\n", "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}
