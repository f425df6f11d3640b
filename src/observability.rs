use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging
///
/// `RUST_LOG` wins over `LOG_LEVEL`; `LOG_FORMAT=json` switches to one JSON
/// object per line, anything else gets the human readable format.
pub fn init_logging() {
    let config = LoggingConfig::from_env();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.is_json() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }

    info!(
        service = "hookfeed",
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.log_level,
        log_format = %config.log_format,
        "Logging initialized"
    );
}

/// Environment configuration for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub log_level: String,
    pub log_format: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("LOG_LEVEL").ok(),
            std::env::var("LOG_FORMAT").ok(),
        )
    }

    fn from_values(log_level: Option<String>, log_format: Option<String>) -> Self {
        Self {
            log_level: log_level
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "info".to_string()),
            log_format: log_format
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "pretty".to_string()),
        }
    }

    pub fn is_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
