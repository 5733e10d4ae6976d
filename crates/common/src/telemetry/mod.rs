//! Tracing subscriber setup

use crate::config::ObservabilityConfig;
use crate::errors::{CreditError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set. Fails if the
/// filter directive is invalid or a subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| CreditError::Configuration {
            message: format!("invalid log level '{}': {}", config.log_level, e),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json_logging {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| CreditError::Configuration {
        message: format!("failed to install tracing subscriber: {}", e),
    })
}
