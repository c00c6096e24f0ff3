use std::sync::Arc;
use std::time::Instant;
use tokio::time::{sleep, Duration};
use tracing::error;

use elastic_log_sink::handler::SinkHandler;
use elastic_log_sink::init::init_tracing;
use elastic_log_sink::logger::Logger;
use elastic_log_sink::noop_client::NoopClient;

#[tokio::main]
async fn main() {
    let logger = Logger::new("default-load").with_handler(Arc::new(SinkHandler::new(NoopClient, "logs")));
    init_tracing(logger).expect("install tracing subscriber");

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        error!(iteration = i, "default load test error");
    }

    let elapsed = start.elapsed();
    println!("default config: sent {} events in {:?} (~{:.0} ev/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );

    // Give background task a little time to drain the channel
    sleep(Duration::from_secs(2)).await;
}
