//! Fan out a fixed batch of GET requests and print their results.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing_subscriber::EnvFilter;
use volley::{FanoutRunner, ReqwestHttpClient, RequestDescriptor};

/// Target endpoint every request in the batch is sent to.
const TARGET_URL: &str = "http://localhost:3000/namespaces";

/// Number of identical requests dispatched at once.
const REQUEST_COUNT: usize = 3;

#[tokio::main]
async fn main() {
    init_tracing();

    let descriptor = RequestDescriptor::get(TARGET_URL)
        .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let runner = FanoutRunner::new(ReqwestHttpClient::new());

    match runner.dispatch(&descriptor, REQUEST_COUNT).await {
        Ok(outcomes) => {
            for outcome in &outcomes {
                println!("{}", outcome.payload());
            }
            for (index, outcome) in outcomes.iter().enumerate() {
                println!("{}", outcome.summary_line(index));
            }
        }
        Err(e) => {
            // A batch-level failure ends this invocation, not the process.
            tracing::error!(error = %e, "Error making requests");
        }
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr; stdout is reserved for payload and summary lines.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
