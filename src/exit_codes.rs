//! Exit codes for the cmdkit binary

use cmdkit_runner::CommandError;

/// Exit code constants for cmdkit
pub mod codes {
    /// Success - the command ran and exited successfully
    pub const SUCCESS: i32 = 0;

    /// Generic failure - the child was killed by a signal, or output could not be written
    pub const FAILURE: i32 = 1;

    /// Usage error - invalid arguments or configuration
    pub const USAGE: i32 = 2;

    /// Spawn failure - the program could not be started
    pub const SPAWN_FAILED: i32 = 127;
}

/// Exit code the CLI reports for a failed command.
///
/// A child that exited with a code passes that code through.
#[must_use]
pub fn for_command_error(error: &CommandError) -> i32 {
    match error {
        CommandError::Spawn { .. } => codes::SPAWN_FAILED,
        CommandError::Exit { .. } => error
            .exit_code()
            .filter(|code| *code != codes::SUCCESS)
            .unwrap_or(codes::FAILURE),
        CommandError::Io { .. } => codes::FAILURE,
    }
}
