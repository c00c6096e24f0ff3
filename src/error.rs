/// Error type returned when a logger or client cannot be built from
/// configuration. Raised at construction time, never while logging.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing required configuration key `{0}`")]
    MissingKey(&'static str),

    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("invalid scheme `{0}`, expected `http` or `https`")]
    InvalidScheme(String),

    #[error(transparent)]
    InvalidLevel(#[from] crate::level::ParseLevelError),

    #[error("invalid DSN: {0}")]
    InvalidDsn(String),

    #[error("malformed configuration: {0}")]
    Malformed(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("elasticsearch feature is not enabled")]
    ElasticsearchFeatureDisabled,
}

/// Error returned by an indexing call. Handlers return it to their caller
/// unchanged.
#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    #[cfg(feature = "elasticsearch")]
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("index request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
