//! Logging initialization.
//!
//! JSON output for deployed environments, pretty output for local work.
//! Per-request context comes from the tower-http trace layer, so no span
//! lifecycle events are emitted here; report queries log their own
//! operation-level events.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::LoggingConfig;

/// Initializes the logging subsystem based on configuration.
///
/// Idempotent: a second call (another test, an embedding harness) leaves
/// the existing subscriber in place instead of panicking.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            let json_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_target(true);
            subscriber.with(json_layer).try_init().ok();
        }
        _ => {
            let pretty_layer = fmt::layer().pretty().with_target(false);
            subscriber.with(pretty_layer).try_init().ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        let json = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
        };
        let pretty = LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        };

        // Repeated initialization, including a format change, must not
        // panic even when another test already installed a subscriber.
        init_logging(&json);
        init_logging(&json);
        init_logging(&pretty);
    }
}
