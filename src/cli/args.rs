//! CLI argument definitions
//!
//! This module defines the command-line interface structure using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// cmdkit - run external commands with shared defaults
#[derive(Parser, Debug)]
#[command(name = "cmdkit")]
#[command(about = "Run external commands with shared stream, directory and environment defaults")]
#[command(long_about = r#"
cmdkit runs a program (or a shell script) with defaults taken from a
.cmdkit/config.toml file, found by searching upward from the current
directory, and from command-line flags.

EXAMPLES:
  # Run a program, passing its output through
  cmdkit run -- ls -la

  # Capture trimmed output
  cmdkit run --capture -- git rev-parse HEAD

  # Print output lines as a JSON array
  cmdkit run --lines -- ls

  # Run a script through the host shell (bash, zsh, powershell or $SHELL)
  cmdkit sh 'echo "$HOME" | tr a-z A-Z'

  # Show which shell `sh` would use
  cmdkit shell-info

CONFIGURATION:
  Flags override the config file. Use --config to point at a file explicitly
  or --no-config to ignore discovery.
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true, conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore any discovered configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a program with arguments
    Run {
        #[command(flatten)]
        exec: ExecArgs,

        /// Program to run
        #[arg(required = true)]
        program: String,

        /// Arguments passed to the program verbatim
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run a script through the host shell
    Sh {
        #[command(flatten)]
        exec: ExecArgs,

        /// Script passed to the shell as a single argument
        script: String,
    },

    /// Print the shell invocation `sh` uses on this host
    ShellInfo,
}

/// Options shared by `run` and `sh`.
#[derive(Args, Debug, Clone, Default)]
pub struct ExecArgs {
    /// Working directory for the command
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Extra environment entry, KEY=VALUE (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_entry)]
    pub env: Vec<String>,

    /// Connect the command to this terminal's stdin, stdout and stderr
    #[arg(long, short = 'i', conflicts_with_all = ["capture", "lines"])]
    pub interactive: bool,

    /// Capture output and print it trimmed
    #[arg(long, conflicts_with = "lines")]
    pub capture: bool,

    /// Capture output and print its lines as a JSON array
    #[arg(long)]
    pub lines: bool,
}

fn parse_env_entry(entry: &str) -> Result<String, String> {
    match entry.split_once('=') {
        Some((key, _)) if !key.is_empty() => Ok(entry.to_string()),
        _ => Err(format!("expected KEY=VALUE, got '{entry}'")),
    }
}

/// Build the clap command, for callers that need the raw definition.
#[must_use]
pub fn build_cli() -> clap::Command {
    use clap::CommandFactory;
    Cli::command()
}
