//! Tracing setup for the cmdkit binary
//!
//! Library crates only emit `tracing` events; installing a subscriber is left
//! to the application. The CLI installs one here.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set.
#[must_use]
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "cmdkit=debug,cmdkit_runner=debug,cmdkit_config=debug,info"
    } else {
        "cmdkit=info,warn"
    }
}

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` takes precedence over `verbose`. Fails if a global subscriber is
/// already installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
