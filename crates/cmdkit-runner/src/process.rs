use std::io::{self, Write};
use std::process::{Child, ChildStderr, ChildStdout, Command};
use std::thread::{self, JoinHandle};

use crate::error::CommandError;
use crate::stdio::{SharedWriter, StdinFeed};

// ============================================================================
// Launch - a platform command plus the pipes it still needs serviced
// ============================================================================

/// A configured platform command together with the in-process streams that
/// must be copied through pipes once the child is running.
pub(crate) struct Launch {
    pub(crate) program: String,
    pub(crate) command: Command,
    pub(crate) stdin: Option<StdinFeed>,
    pub(crate) stdout: Option<SharedWriter>,
    pub(crate) stderr: Option<SharedWriter>,
}

impl Launch {
    /// Spawn the child and start a copy thread for every pipe-backed stream.
    pub(crate) fn spawn(mut self) -> Result<Process, CommandError> {
        let mut child = self.command.spawn().map_err(|source| CommandError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        tracing::debug!(program = %self.program, pid = child.id(), "spawned process");

        let mut pumps = Vec::new();

        if let (Some(feed), Some(mut pipe)) = (self.stdin, child.stdin.take()) {
            pumps.push(thread::spawn(move || {
                match feed.feed(&mut pipe) {
                    // The child may exit without reading all of its input.
                    Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                    other => other,
                }
                // Dropping the pipe here delivers EOF to the child.
            }));
        }

        if let (Some(writer), Some(pipe)) = (self.stdout, child.stdout.take()) {
            pumps.push(spawn_output_pump(OutputPipe::Stdout(pipe), writer));
        }

        if let (Some(writer), Some(pipe)) = (self.stderr, child.stderr.take()) {
            pumps.push(spawn_output_pump(OutputPipe::Stderr(pipe), writer));
        }

        Ok(Process {
            program: self.program,
            child,
            pumps,
        })
    }
}

enum OutputPipe {
    Stdout(ChildStdout),
    Stderr(ChildStderr),
}

fn spawn_output_pump(pipe: OutputPipe, mut writer: SharedWriter) -> JoinHandle<io::Result<()>> {
    thread::spawn(move || {
        match pipe {
            OutputPipe::Stdout(mut pipe) => io::copy(&mut pipe, &mut writer)?,
            OutputPipe::Stderr(mut pipe) => io::copy(&mut pipe, &mut writer)?,
        };
        writer.flush()
    })
}

// ============================================================================
// Process - a started child
// ============================================================================

/// A started process.
///
/// Returned by [`Cmd::start`](crate::Cmd::start). Dropping it without calling
/// [`wait`](Self::wait) leaves the child running.
#[derive(Debug)]
pub struct Process {
    program: String,
    child: Child,
    pumps: Vec<JoinHandle<io::Result<()>>>,
}

impl Process {
    /// OS process identifier.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Program name the process was started with.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Ask the OS to terminate the process.
    pub fn kill(&mut self) -> Result<(), CommandError> {
        self.child.kill().map_err(|source| CommandError::Io {
            program: self.program.clone(),
            source,
        })
    }

    /// Direct access to the platform child handle.
    ///
    /// Pipes that back in-memory streams have already been taken.
    pub fn child_mut(&mut self) -> &mut Child {
        &mut self.child
    }

    /// Wait for the process to exit and for its streams to be fully copied.
    ///
    /// An unsuccessful exit status is reported in preference to a stream copy
    /// error.
    pub fn wait(mut self) -> Result<(), CommandError> {
        let status = self.child.wait().map_err(|source| CommandError::Io {
            program: self.program.clone(),
            source,
        })?;

        let mut copy_error = None;
        for pump in self.pumps.drain(..) {
            let result = pump
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stream copy thread panicked")));
            if let Err(err) = result {
                copy_error.get_or_insert(err);
            }
        }

        tracing::debug!(program = %self.program, %status, "process exited");

        if !status.success() {
            return Err(CommandError::Exit {
                program: self.program,
                status,
            });
        }

        match copy_error {
            Some(source) => Err(CommandError::Io {
                program: self.program,
                source,
            }),
            None => Ok(()),
        }
    }
}
