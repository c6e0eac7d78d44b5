use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to parse log filter {filter}: {source}")]
    ParseFilter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("failed to install tracing subscriber: {0}")]
    SubscriberInstall(Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the global tracing subscriber writing to stderr.
///
/// `filter` takes `EnvFilter` directives such as `warn` or
/// `tidalplayer::pagination=debug`.
pub fn init_logging(filter: &str) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|source| LoggingError::ParseFilter {
        filter: filter.to_string(),
        source,
    })?;

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(LoggingError::SubscriberInstall)
}
