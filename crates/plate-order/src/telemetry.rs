//! Tracing setup

use crate::config::OrderConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins over the configured filter. Returns `false` if a
/// subscriber was already installed, which leaves that one in place.
pub fn init_tracing(config: &OrderConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let builder = fmt().with_env_filter(filter).with_target(false);
    let installed = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        let config = OrderConfig::default().with_log_filter("debug");
        init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
