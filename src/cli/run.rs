//! CLI entry point and command dispatch

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::Path;

use cmdkit_runner::{Cmd, CmdFactory, FactoryOptions, OutputSink, ShellInvocation};

use super::args::{Cli, Commands, ExecArgs};
use crate::exit_codes::{self, codes};
use crate::logging;

/// Parse arguments from the process and run. Returns the process exit code.
pub fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap renders help and version output as "errors" too
            let _ = err.print();
            return if err.use_stderr() {
                codes::USAGE
            } else {
                codes::SUCCESS
            };
        }
    };

    if let Err(err) = logging::init_tracing(cli.verbose) {
        eprintln!("warning: failed to initialise logging: {err}");
    }

    match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            codes::USAGE
        }
    }
}

/// Run a parsed command line.
///
/// Configuration problems are returned as errors; a failing child is reported
/// on stderr and turned into an exit code.
pub fn execute(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::ShellInfo => {
            let shell = ShellInvocation::current();
            println!(
                "{} {}",
                shell.resolve_program().to_string_lossy(),
                shell.flag
            );
            Ok(codes::SUCCESS)
        }
        Commands::Run {
            exec,
            program,
            args,
        } => {
            let factory = load_factory(cli.config.as_deref(), cli.no_config)?;
            let cmd = factory.cmd(program, args);
            finish(cmd, &exec)
        }
        Commands::Sh { exec, script } => {
            let factory = load_factory(cli.config.as_deref(), cli.no_config)?;
            let cmd = factory.shell(script);
            finish(cmd, &exec)
        }
    }
}

fn load_factory(explicit: Option<&Path>, no_config: bool) -> Result<CmdFactory> {
    let loaded = match (explicit, no_config) {
        (_, true) => None,
        (Some(path), false) => Some(cmdkit_config::load(path)?),
        (None, false) => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            cmdkit_config::discover_from(&cwd)?
        }
    };

    let options = match loaded {
        Some(loaded) => {
            tracing::debug!(path = %loaded.path.display(), "using config file");
            loaded.into_options()?
        }
        None => FactoryOptions::default(),
    };

    // The CLI shows output by default; the library default discards it.
    let options = match options.stdout {
        Some(_) => options,
        None => options.stdout(OutputSink::Inherit),
    };

    Ok(CmdFactory::new(options))
}

fn apply_exec_args(mut cmd: Cmd, exec: &ExecArgs) -> Cmd {
    if let Some(dir) = &exec.dir {
        cmd = cmd.dir(dir);
    }
    cmd = cmd.envs(&exec.env);
    if exec.interactive {
        cmd = cmd.interactive();
    }
    cmd
}

fn finish(cmd: Cmd, exec: &ExecArgs) -> Result<i32> {
    let mut cmd = apply_exec_args(cmd, exec);
    let capturing = exec.capture || exec.lines;
    if capturing && matches!(cmd.stdout_sink(), OutputSink::Inherit) {
        // Captured output is printed once, not passed through as well.
        cmd = cmd.stdout(OutputSink::Null);
    }

    let result = if exec.lines {
        cmd.lines().map(|lines| Some(render_lines(&lines)))
    } else if exec.capture {
        cmd.output().map(Some)
    } else {
        cmd.run().map(|()| None)
    };

    match result {
        Ok(Some(text)) => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}").context("Failed to write output")?;
            Ok(codes::SUCCESS)
        }
        Ok(None) => Ok(codes::SUCCESS),
        Err(err) => {
            eprintln!("error: {err}");
            Ok(exit_codes::for_command_error(&err))
        }
    }
}

fn render_lines(lines: &[String]) -> String {
    serde_json::to_string(lines).unwrap_or_else(|_| "[]".to_string())
}
