//! Command-line interface for cmdkit
//!
//! ## Module Structure
//!
//! - `args`: CLI argument definitions (clap)
//! - `run`: entry point and command dispatch

pub mod args;
mod run;

pub use args::{Cli, Commands, ExecArgs, build_cli};
pub use run::{execute, run};
