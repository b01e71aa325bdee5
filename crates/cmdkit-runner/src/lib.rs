//! Fluent construction and execution of external processes
//!
//! [`Cmd`] accumulates the configuration for one process launch (working
//! directory, standard streams, environment, shell wrapping) and then runs it
//! through one of its terminal actions:
//!
//! | Action | Waits | Returns |
//! |--------|-------|---------|
//! | [`Cmd::start`] | no | a [`Process`] handle |
//! | [`Cmd::run`] | yes | `()` on a successful exit |
//! | [`Cmd::output`] | yes | trimmed stdout |
//! | [`Cmd::lines`] | yes | stdout split into lines |
//! | [`Cmd::build`] | n/a | the unstarted `std::process::Command` |
//!
//! [`CmdFactory`] stamps a shared set of [`FactoryOptions`] onto every builder
//! it creates.
//!
//! Arguments are always passed argv-style. Only [`shell`] hands a string to a
//! shell, and it does so explicitly.

pub mod command;
pub mod env;
pub mod error;
pub mod factory;
mod process;
pub mod shell;
pub mod stdio;
pub mod tee;

pub use command::{Cmd, cmd, shell};
pub use env::EnvVar;
pub use error::CommandError;
pub use factory::{CmdFactory, FactoryOptions};
pub use process::Process;
pub use shell::{HostOs, ShellInvocation, ShellProgram};
pub use stdio::{InputSource, OutputSink, OutputStream, SharedReader, SharedWriter};
pub use tee::{CaptureBuffer, TeeWriter};
