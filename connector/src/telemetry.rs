//! Console tracing setup.
//!
//! The crate emits [`tracing`] events unconditionally; this module is an
//! opt-in convenience for hosts that do not install their own
//! subscriber. Only available with the `telemetry` feature.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Builder for the console tracing subscriber.
#[derive(Debug, Default)]
pub struct Telemetry {
    log_level: Option<String>,
}

impl Telemetry {
    /// Creates a new, empty [`Telemetry`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level filter used when `RUST_LOG` is not set.
    ///
    /// Accepts any valid [`EnvFilter`] directive string (e.g. `"debug"`,
    /// `"wallet_connector=debug"`).
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Registers a console subscriber as the global default.
    ///
    /// # Panics
    ///
    /// Panics if a global subscriber is already set.
    pub fn register(self) {
        let fallback = self.log_level.as_deref().unwrap_or("info");
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
            .with(tracing_subscriber::fmt::layer())
            .init();
        tracing::debug!("console tracing subscriber registered");
    }
}
