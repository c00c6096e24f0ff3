//! Environment variable names used by [`LoggerConfig::from_env`].
//!
//! These are purely helpers; the handler and client types remain
//! decoupled from environment access.
//!
//! [`LoggerConfig::from_env`]: crate::config::LoggerConfig::from_env

/// Basic-auth user for the index API.
pub const LOG_SINK_ES_USER_ENV: &str = "LOG_SINK_ES_USER";

/// Basic-auth password for the index API.
pub const LOG_SINK_ES_PASS_ENV: &str = "LOG_SINK_ES_PASS";

/// Host name or address of the node, default `127.0.0.1`.
pub const LOG_SINK_ES_HOST_ENV: &str = "LOG_SINK_ES_HOST";

/// `http` or `https`, default `https`.
pub const LOG_SINK_ES_SCHEME_ENV: &str = "LOG_SINK_ES_SCHEME";

/// Port of the node, default `9200`.
pub const LOG_SINK_ES_PORT_ENV: &str = "LOG_SINK_ES_PORT";

/// Target index name.
pub const LOG_SINK_ES_INDEX_ENV: &str = "LOG_SINK_ES_INDEX";

/// Optional minimum level, e.g. `warning`.
pub const LOG_SINK_ES_LEVEL_ENV: &str = "LOG_SINK_ES_LEVEL";

/// Name of the running application; used as the logger channel.
pub const APP_NAME_ENV: &str = "APP_NAME";
