//! cmdkit-config - TOML configuration for factory defaults
//!
//! A `.cmdkit/config.toml` file describes the defaults a
//! [`CmdFactory`](cmdkit_runner::CmdFactory) stamps onto every command:
//!
//! ```toml
//! dir = "/srv/app"
//! env = ["RUST_LOG=info", "MODE=batch"]
//! stdin = "null"
//! stdout = "inherit"
//! stderr = { file = "err.log", append = true }
//! ```
//!
//! The file is found by searching upward from the working directory, or
//! given explicitly.

mod discovery;
mod model;

pub use discovery::{
    CONFIG_DIR, CONFIG_FILE, LoadedConfig, discover_config_file_from, discover_from, load,
};
pub use model::{FactoryConfig, FileStream, StreamConfig, StreamMode};
