use tokio::time::{sleep, Duration};
use tracing::{error, info};

use elastic_log_sink::{config::LoggerConfig, init::{create_logger, init_tracing}};

#[tokio::main]
async fn main() {
    let config = LoggerConfig::from_env().expect("LOG_SINK_ES_USER, LOG_SINK_ES_PASS and LOG_SINK_ES_INDEX must be set");
    let logger = create_logger(&config).expect("failed to build elasticsearch logger");
    init_tracing(logger).expect("install tracing subscriber");

    info!("starting service");

    error!(
        user_id = 42,
        reason = "invalid password",
        "authentication failed"
    );

    sleep(Duration::from_secs(2)).await;
}
