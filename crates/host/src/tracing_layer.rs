use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sandbox_connect_core::config::LoggingSettings;
use sandbox_connect_core::{Error, Result};

/// Configure tracing for the process.
///
/// `RUST_LOG` takes precedence over the configured filter. Output goes to
/// stderr so it never mixes with a connect program's stdout.
pub fn configure_tracing(settings: &LoggingSettings) -> Result<()> {
    // Basic EnvFilter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&settings.filter))
        .map_err(|e| Error::configuration(format!("Invalid log filter: {}", e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if settings.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| Error::internal(format!("Failed to install tracing subscriber: {}", e)))
}
