//! Tracing subscriber setup.

use roster_config::ObservabilityConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
#[must_use]
pub fn default_directive(config: &ObservabilityConfig) -> String {
    format!("{},sqlx=warn", config.log_level.to_lowercase())
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Output is JSON when
/// `log_format` is `json`, human-readable otherwise.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let json = config.log_format.eq_ignore_ascii_case("json");
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().with_target(true));
    let pretty_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_target(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();
}
