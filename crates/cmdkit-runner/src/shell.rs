//! Host shell selection
//!
//! Maps the host operating system to the shell that runs script strings:
//!
//! | Host OS | Program | Flag |
//! |---------|---------|------|
//! | Linux | `bash` | `-c` |
//! | macOS | `zsh` | `-c` |
//! | Windows | `powershell` | `-Command` |
//! | other | `$SHELL` | `-c` |

use std::ffi::OsString;

/// Operating system identity used for shell selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl HostOs {
    /// The OS this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Other => "other",
        }
    }
}

/// How the shell program is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellProgram {
    /// A fixed program name looked up on `PATH`.
    Named(&'static str),
    /// The program named by an environment variable.
    FromEnv(&'static str),
}

/// Shell program and the flag that introduces a script string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellInvocation {
    pub program: ShellProgram,
    pub flag: &'static str,
}

const SHELL_TABLE: [(HostOs, ShellInvocation); 4] = [
    (
        HostOs::Linux,
        ShellInvocation {
            program: ShellProgram::Named("bash"),
            flag: "-c",
        },
    ),
    (
        HostOs::MacOs,
        ShellInvocation {
            program: ShellProgram::Named("zsh"),
            flag: "-c",
        },
    ),
    (
        HostOs::Windows,
        ShellInvocation {
            program: ShellProgram::Named("powershell"),
            flag: "-Command",
        },
    ),
    (
        HostOs::Other,
        ShellInvocation {
            program: ShellProgram::FromEnv("SHELL"),
            flag: "-c",
        },
    ),
];

impl ShellInvocation {
    /// Invocation for the given host.
    #[must_use]
    pub fn for_host(os: HostOs) -> Self {
        SHELL_TABLE
            .iter()
            .find(|(host, _)| *host == os)
            .map(|(_, invocation)| *invocation)
            .unwrap_or(SHELL_TABLE[SHELL_TABLE.len() - 1].1)
    }

    /// Invocation for the running host.
    #[must_use]
    pub fn current() -> Self {
        Self::for_host(HostOs::current())
    }

    /// Resolve the program name, reading environment variables through `lookup`.
    ///
    /// An unset variable resolves to an empty program, which fails when the
    /// command is started.
    pub fn resolve_program_with<F>(&self, lookup: F) -> OsString
    where
        F: FnOnce(&str) -> Option<OsString>,
    {
        match self.program {
            ShellProgram::Named(name) => OsString::from(name),
            ShellProgram::FromEnv(var) => lookup(var).unwrap_or_default(),
        }
    }

    /// Resolve the program name against the process environment.
    #[must_use]
    pub fn resolve_program(&self) -> OsString {
        self.resolve_program_with(|var| std::env::var_os(var))
    }

    /// Full argv for running `script`: program, flag, script.
    #[must_use]
    pub fn argv(&self, script: impl Into<OsString>) -> (OsString, [OsString; 2]) {
        (
            self.resolve_program(),
            [OsString::from(self.flag), script.into()],
        )
    }
}
