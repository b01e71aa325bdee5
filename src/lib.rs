//! cmdkit - fluent construction and execution of external processes
//!
//! cmdkit can be used in two ways:
//! - **Library**: build and run commands with [`Cmd`] and [`CmdFactory`]
//! - **CLI**: `cmdkit run -- <program> [args...]` and `cmdkit sh <script>`
//!
//! # Quick Start (Library)
//!
//! ```rust,no_run
//! use cmdkit::{CmdFactory, FactoryOptions, OutputSink, cmd, shell};
//!
//! // One-off commands
//! cmd("cargo", ["fmt", "--check"]).stdout(OutputSink::Inherit).run()?;
//! let kernel = cmd("uname", ["-r"]).output()?;
//! let files = shell("ls *.toml").lines()?;
//!
//! // Commands sharing a directory, environment and output
//! let repo = CmdFactory::new(
//!     FactoryOptions::default()
//!         .dir("/path/to/repo")
//!         .stdout(OutputSink::Inherit)
//!         .env("GIT_TERMINAL_PROMPT=0"),
//! );
//! repo.cmd("git", ["pull", "--ff-only"]).run()?;
//! # Ok::<(), cmdkit::CommandError>(())
//! ```
//!
//! # Configuration
//!
//! Factory defaults can be kept in `.cmdkit/config.toml`; see
//! [`config::FactoryConfig`].

pub mod cli;
pub mod exit_codes;
pub mod logging;

pub use cmdkit_runner::{
    CaptureBuffer, Cmd, CmdFactory, CommandError, EnvVar, FactoryOptions, HostOs, InputSource,
    OutputSink, OutputStream, Process, SharedReader, SharedWriter, ShellInvocation, ShellProgram,
    TeeWriter, cmd, shell,
};

/// Configuration loading for factory defaults.
pub mod config {
    pub use cmdkit_config::*;
}

/// Lower-level runner modules.
pub mod runner {
    pub use cmdkit_runner::{command, env, error, factory, shell, stdio, tee};
}
