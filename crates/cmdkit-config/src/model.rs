use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use cmdkit_runner::{EnvVar, FactoryOptions, InputSource, OutputSink};

/// How a stream is bound when given by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamMode {
    /// The null device
    Null,
    /// The calling process's stream
    Inherit,
}

/// A stream bound to a file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileStream {
    /// Path, relative to the config file's directory unless absolute
    pub file: PathBuf,
    /// Append instead of truncating. Output streams only; rejected on stdin.
    #[serde(default)]
    pub append: bool,
}

/// A stream entry: `"null"`, `"inherit"` or `{ file = "...", append = true }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StreamConfig {
    Mode(StreamMode),
    File(FileStream),
}

/// Factory defaults as written in `config.toml`.
///
/// Every key is optional; an absent key leaves the builder default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FactoryConfig {
    pub stdin: Option<StreamConfig>,
    pub stdout: Option<StreamConfig>,
    pub stderr: Option<StreamConfig>,
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub env: Vec<String>,
}

impl FactoryConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse cmdkit TOML config")
    }

    /// Open files and build [`FactoryOptions`].
    ///
    /// Relative paths (stream files and `dir`) are resolved against
    /// `base_dir`, normally the directory holding the config file.
    pub fn into_options(self, base_dir: &Path) -> Result<FactoryOptions> {
        let mut options = FactoryOptions::default();

        if let Some(stdin) = self.stdin {
            options.stdin = Some(input_source(stdin, base_dir)?);
        }
        if let Some(stdout) = self.stdout {
            options.stdout = Some(output_sink(stdout, base_dir)?);
        }
        if let Some(stderr) = self.stderr {
            options.stderr = Some(output_sink(stderr, base_dir)?);
        }
        if let Some(dir) = self.dir {
            options.dir = resolve(base_dir, &dir);
        }
        for entry in &self.env {
            if EnvVar::parse(entry).is_none() {
                tracing::warn!(entry = %entry, "config env entry is not KEY=VALUE and is ignored");
            }
            options = options.env(entry);
        }

        Ok(options)
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() || path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn input_source(stream: StreamConfig, base_dir: &Path) -> Result<InputSource> {
    Ok(match stream {
        StreamConfig::Mode(StreamMode::Null) => InputSource::Null,
        StreamConfig::Mode(StreamMode::Inherit) => InputSource::Inherit,
        StreamConfig::File(FileStream { file, append }) => {
            if append {
                bail!("`append` applies to output streams, not stdin ({})", file.display());
            }
            let path = resolve(base_dir, &file);
            let handle = File::open(&path)
                .with_context(|| format!("Failed to open stdin file: {}", path.display()))?;
            InputSource::from(handle)
        }
    })
}

fn output_sink(stream: StreamConfig, base_dir: &Path) -> Result<OutputSink> {
    Ok(match stream {
        StreamConfig::Mode(StreamMode::Null) => OutputSink::Null,
        StreamConfig::Mode(StreamMode::Inherit) => OutputSink::Inherit,
        StreamConfig::File(FileStream { file, append }) => {
            let path = resolve(base_dir, &file);
            let handle = OpenOptions::new()
                .create(true)
                .write(true)
                .append(append)
                .truncate(!append)
                .open(&path)
                .with_context(|| format!("Failed to open output file: {}", path.display()))?;
            OutputSink::from(handle)
        }
    })
}
