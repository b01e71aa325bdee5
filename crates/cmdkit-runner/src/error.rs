//! Error types for process construction and execution

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Failure of a terminal action on a [`Cmd`](crate::Cmd).
///
/// The underlying [`io::Error`] or [`ExitStatus`] is carried unmodified so
/// callers can inspect the platform's own failure kind.
///
/// | Variant | Raised by | Meaning |
/// |---------|-----------|---------|
/// | `Spawn` | `start`, `run`, `output`, `lines`, `build` | The OS refused to create the process |
/// | `Exit` | `run`, `output`, `lines`, `Process::wait` | The process ran and reported failure |
/// | `Io` | `output`, `Process::wait` | Waiting on the process or copying a stream failed |
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited unsuccessfully ({status})")]
    Exit { program: String, status: ExitStatus },

    #[error("I/O error while running `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl CommandError {
    /// Program name the failing command was created with.
    #[must_use]
    pub fn program(&self) -> &str {
        match self {
            Self::Spawn { program, .. } | Self::Exit { program, .. } | Self::Io { program, .. } => {
                program
            }
        }
    }

    /// True when the process could not be created at all.
    #[must_use]
    pub const fn is_spawn(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }

    /// Exit status of a process that ran and failed.
    #[must_use]
    pub const fn exit_status(&self) -> Option<ExitStatus> {
        match self {
            Self::Exit { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Exit code of a process that ran and failed.
    ///
    /// `None` for spawn and I/O failures, and for processes terminated by a
    /// signal.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_status().and_then(|status| status.code())
    }

    /// Underlying I/O error for spawn and I/O failures.
    #[must_use]
    pub const fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Spawn { source, .. } | Self::Io { source, .. } => Some(source),
            Self::Exit { .. } => None,
        }
    }
}
