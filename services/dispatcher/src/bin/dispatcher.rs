//! services/dispatcher/src/bin/dispatcher.rs
//!
//! The AWS Lambda entry point. Logging is set up once per process; everything
//! else (secrets, database client, mail session) is built per invocation.

use dispatcher_lib::{config::log_level_from_env, lambda::function_handler};
use lambda_runtime::{run, service_fn, Error};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // --- 1. Set Up Logging ---
    // CloudWatch does not render ANSI colours and stamps each line itself.
    let log_level = log_level_from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_level.to_string()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time(),
        )
        .init();

    // --- 2. Hand Control to the Runtime ---
    info!("Starting daily learning dispatcher...");
    run(service_fn(function_handler)).await
}
