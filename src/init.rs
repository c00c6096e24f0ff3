use crate::config::LoggerConfig;
use crate::env::APP_NAME_ENV;
use crate::error::ConfigError;
use crate::layer::SinkLayer;
use crate::logger::Logger;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Name of the running application, used as the logger channel.
///
/// Taken from `APP_NAME`, then the executable's file stem, then this
/// crate's name.
pub fn app_name() -> String {
    std::env::var(APP_NAME_ENV)
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Build a [`Logger`] that ships records to Elasticsearch.
///
/// **Parameters**
/// - `config`: validated [`LoggerConfig`]; see [`LoggerConfig::from_value`]
///   and friends for building one from a mapping.
///
/// **Returns**
/// - A logger named after the running application with a single
///   [`SinkHandler`] bound to `config.index`.
/// - `Err(..)` if the HTTP client cannot be constructed, or the
///   `elasticsearch` feature is disabled.
///
/// [`SinkHandler`]: crate::handler::SinkHandler
pub fn create_logger(config: &LoggerConfig) -> Result<Logger, ConfigError> {
    #[cfg(feature = "elasticsearch")]
    {
        use crate::elasticsearch::{ClientConfig, ElasticsearchClient};
        use crate::handler::SinkHandler;

        let client = ElasticsearchClient::new(ClientConfig {
            scheme: config.scheme.clone(),
            host: config.host.clone(),
            port: config.port,
            user: config.user.clone(),
            password: config.pass.clone(),
            timeout: config.timeout,
        })?;

        let handler = SinkHandler::with_options(client, config.index.clone(), config.level, config.bubble);
        let logger = Logger::new(app_name()).with_handler(Arc::new(handler));

        tracing::debug!(
            channel = logger.name(),
            host = %config.host,
            index = %config.index,
            "elasticsearch logger created"
        );
        Ok(logger)
    }

    #[cfg(not(feature = "elasticsearch"))]
    {
        let _ = config;
        Err(ConfigError::ElasticsearchFeatureDisabled)
    }
}

/// Settings for the `tracing` bridge installed by [`init_tracing_with_config`].
///
/// **Fields**
/// - `channel_buffer`: maximum number of records queued for the logger
///   before new ones are dropped.
/// - `enable_stdout`: if `true`, a `tracing_subscriber::fmt` layer is
///   installed next to the [`SinkLayer`] so events also reach the console.
#[derive(Clone, Debug)]
pub struct LayerConfig {
    pub channel_buffer: usize,
    pub enable_stdout: bool,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 1024,
            enable_stdout: true,
        }
    }
}

/// Install a global `tracing` subscriber that forwards every event to
/// `logger`.
///
/// **Returns**
/// - The handle of the background task running the logger.
/// - `Err(..)` if a global subscriber is already installed.
///
/// Must be called from within a Tokio runtime.
pub fn init_tracing_with_config(
    logger: Logger,
    config: LayerConfig,
) -> Result<JoinHandle<()>, tracing::subscriber::SetGlobalDefaultError> {
    let (layer, handle) = SinkLayer::new(Arc::new(logger), config.channel_buffer);

    // Two branches because the layered subscriber types differ.
    if config.enable_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer();
        let subscriber = Registry::default().with(layer).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(handle)
}

/// Equivalent to [`init_tracing_with_config`] with [`LayerConfig::default`].
pub fn init_tracing(
    logger: Logger,
) -> Result<JoinHandle<()>, tracing::subscriber::SetGlobalDefaultError> {
    init_tracing_with_config(logger, LayerConfig::default())
}
