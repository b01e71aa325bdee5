//! Factory that stamps shared defaults onto every command it creates

use std::ffi::OsString;
use std::path::PathBuf;

use crate::command::Cmd;
use crate::env::{self, EnvVar};
use crate::shell::ShellInvocation;
use crate::stdio::{InputSource, OutputSink};

/// Defaults applied by a [`CmdFactory`].
///
/// Every field is optional: `None` streams, an empty `dir` and an empty `env`
/// leave the builder's own defaults in place. Set a stream to
/// [`OutputSink::Null`] to force discarding it.
#[derive(Debug, Clone, Default)]
pub struct FactoryOptions {
    pub stdin: Option<InputSource>,
    pub stdout: Option<OutputSink>,
    pub stderr: Option<OutputSink>,
    pub dir: PathBuf,
    pub env: Vec<EnvVar>,
}

impl FactoryOptions {
    #[must_use]
    pub fn stdin(mut self, stdin: impl Into<InputSource>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }

    #[must_use]
    pub fn stdout(mut self, stdout: impl Into<OutputSink>) -> Self {
        self.stdout = Some(stdout.into());
        self
    }

    #[must_use]
    pub fn stderr(mut self, stderr: impl Into<OutputSink>) -> Self {
        self.stderr = Some(stderr.into());
        self
    }

    #[must_use]
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Append a `KEY=VALUE` entry. Entries without `=` are ignored.
    #[must_use]
    pub fn env(mut self, entry: impl AsRef<str>) -> Self {
        self.env.extend(env::parse_entries([entry]));
        self
    }

    #[must_use]
    pub fn var(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push(EnvVar::new(key, value));
        self
    }
}

/// Creates [`Cmd`] builders that share the same defaults.
///
/// # Example
///
/// ```rust,no_run
/// use cmdkit_runner::{CmdFactory, FactoryOptions, OutputSink};
///
/// let git = CmdFactory::new(
///     FactoryOptions::default()
///         .dir("/path/to/repo")
///         .stdout(OutputSink::Inherit)
///         .env("GIT_PAGER=cat"),
/// );
///
/// git.cmd("git", ["fetch"]).run()?;
/// let head = git.cmd("git", ["rev-parse", "HEAD"]).output()?;
/// # Ok::<(), cmdkit_runner::CommandError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CmdFactory {
    options: FactoryOptions,
}

impl CmdFactory {
    #[must_use]
    pub const fn new(options: FactoryOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &FactoryOptions {
        &self.options
    }

    /// Create a builder for `program` with the factory's defaults applied.
    pub fn cmd<I, S>(&self, program: impl Into<OsString>, args: I) -> Cmd
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut cmd = Cmd::new(program).args(args);
        let options = &self.options;

        cmd.set_streams(
            options.stdin.as_ref(),
            options.stdout.as_ref(),
            options.stderr.as_ref(),
        );
        if !options.dir.as_os_str().is_empty() {
            cmd.set_dir(&options.dir);
        }
        if !options.env.is_empty() {
            cmd.push_env(&options.env);
        }

        cmd
    }

    /// Create a builder that runs `script` through the host shell, with the
    /// factory's defaults applied.
    pub fn shell(&self, script: impl Into<OsString>) -> Cmd {
        let (program, args) = ShellInvocation::current().argv(script);
        self.cmd(program, args)
    }
}
