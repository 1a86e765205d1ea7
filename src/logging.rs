//! Log sink initialization.
//!
//! Library code logs through `tracing`. In the browser `tracing` forwards to
//! the `log` facade (its `log` feature) and `console_log` prints to the devtools
//! console. Natively a `tracing-subscriber` fmt layer is installed, filtered by
//! `RUST_LOG` (default `info`). Repeated calls are harmless.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

/// Install the platform log sink.
pub fn init() {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Debug).is_err() {
            tracing::debug!("console logger already installed");
        }
    }
    #[cfg(all(feature = "native", not(feature = "hydrate")))]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
            tracing::debug!("tracing subscriber already installed");
        }
    }
}
