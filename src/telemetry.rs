//! Tracing initialization (fmt subscriber with env-filter).
//!
//! Log verbosity is controlled via the standard `RUST_LOG` environment
//! variable, defaulting to `info` when unset:
//!
//! ```bash
//! RUST_LOG=sambokid=debug,sqlx=warn sambokid -f config.yaml
//! ```

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize the global tracing subscriber.
///
/// Safe to call once per process; subsequent calls return an error from
/// `try_init` which callers may ignore in tests.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Telemetry initialized");

    Ok(())
}
