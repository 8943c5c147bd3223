//! Runtime configuration loaded from the environment.

use std::time::Duration;

/// Environment variable holding the simulated service latency in milliseconds.
pub const LATENCY_ENV: &str = "WATCHTOWER_LATENCY_MS";

/// Latency applied by the bundled sample feeds when nothing is configured.
pub const DEFAULT_LATENCY_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeConfig {
    /// Delay the sample feeds wait before answering, standing in for backend IO.
    pub simulated_latency: Duration,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; malformed values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let latency_ms = match lookup(LATENCY_ENV) {
            None => DEFAULT_LATENCY_MS,
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_LATENCY_MS,
                    "{LATENCY_ENV} is not a number of milliseconds; using default"
                );
                DEFAULT_LATENCY_MS
            }),
        };

        Self {
            simulated_latency: Duration::from_millis(latency_ms),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }
}
