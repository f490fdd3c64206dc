//! services/dispatcher/src/bin/invoke.rs
//!
//! Runs a single invocation locally against the configured environment and
//! prints the response JSON.

use clap::{ArgGroup, Parser};
use dispatcher_lib::{config::log_level_from_env, error::DispatchError, lambda::handle_event};
use serde_json::{json, Value};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "invoke")]
#[command(about = "Run one daily learning dispatch locally and print the response")]
#[command(version)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["event_type", "event", "stdin"]),
))]
struct Cli {
    /// Event type to send as `detail-type` (morning_content, evening_questions)
    event_type: Option<String>,

    /// Read the full event payload from a JSON file
    #[arg(long, value_name = "FILE")]
    event: Option<PathBuf>,

    /// Read the full event payload from stdin
    #[arg(long)]
    stdin: bool,
}

impl Cli {
    /// Turns the selected input into an event payload.
    async fn read_event(&self) -> Result<Value, DispatchError> {
        if let Some(path) = &self.event {
            let raw = tokio::fs::read_to_string(path).await?;
            return Ok(serde_json::from_str(&raw)?);
        }
        if self.stdin {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            return Ok(serde_json::from_str(&raw)?);
        }
        Ok(json!({ "detail-type": self.event_type.clone().unwrap_or_default() }))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the response.
    let log_level = log_level_from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let event = cli.read_event().await?;
    let response = handle_event(event).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
