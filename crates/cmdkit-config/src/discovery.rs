use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use cmdkit_runner::FactoryOptions;

use crate::model::FactoryConfig;

/// Directory that holds the config file, relative to a search root.
pub const CONFIG_DIR: &str = ".cmdkit";
/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// A parsed config file and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: FactoryConfig,
}

impl LoadedConfig {
    /// Directory relative paths in the file are resolved against.
    ///
    /// For `<root>/.cmdkit/config.toml` this is `<root>`; for any other file
    /// it is the directory holding the file.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        if parent.file_name() == Some(OsStr::new(CONFIG_DIR)) {
            parent.parent().unwrap_or(parent)
        } else {
            parent
        }
    }

    /// Build factory options, resolving paths against [`base_dir`](Self::base_dir).
    pub fn into_options(self) -> Result<FactoryOptions> {
        let base_dir = self.base_dir().to_path_buf();
        self.config
            .into_options(&base_dir)
            .with_context(|| format!("Invalid config file: {}", self.path.display()))
    }
}

/// Search upward from `start_dir` for `.cmdkit/config.toml`.
///
/// The nearest file wins. The search stops at the filesystem root or at a
/// repository root (`.git`, `.hg`, `.svn`), whichever comes first.
pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current_dir = Some(start_dir);

    while let Some(dir) = current_dir {
        let config_path = dir.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }

        if dir.join(".git").exists() || dir.join(".hg").exists() || dir.join(".svn").exists() {
            break;
        }

        current_dir = dir.parent();
    }

    None
}

/// Read and parse a config file.
pub fn load(path: &Path) -> Result<LoadedConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = FactoryConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to load config file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "loaded cmdkit config");

    Ok(LoadedConfig {
        path: path.to_path_buf(),
        config,
    })
}

/// Discover and load the nearest config file, if any.
pub fn discover_from(start_dir: &Path) -> Result<Option<LoadedConfig>> {
    discover_config_file_from(start_dir)
        .map(|path| load(&path))
        .transpose()
}
