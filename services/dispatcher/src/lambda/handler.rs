//! services/dispatcher/src/lambda/handler.rs
//!
//! The per-invocation pipeline: load configuration, build the adapters,
//! dispatch, and shape the response.
//!
//! Nothing here outlives a single invocation. The configuration, the MongoDB
//! client and the SMTP mailer are created per call and dropped at its end.

use crate::adapters::{MongoContentRepository, SmtpMailer};
use crate::config::Config;
use crate::error::DispatchError;
use crate::lambda::protocol::{self, InvocationResponse};
use daily_learning_core::{DailyDispatcher, Notifier, SystemClock};
use lambda_runtime::LambdaEvent;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Entry point registered with `lambda_runtime`.
///
/// Any `Err` is reported by the runtime as a failed invocation; no response
/// body is produced in that case.
pub async fn function_handler(
    event: LambdaEvent<Value>,
) -> Result<InvocationResponse, lambda_runtime::Error> {
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, "Invocation received");
    Ok(handle_event(payload).await?)
}

/// Runs one invocation against the real environment.
///
/// Configuration is loaded first, so a missing secret fails the invocation
/// before any database or mail connection is attempted.
pub async fn handle_event(event: Value) -> Result<InvocationResponse, DispatchError> {
    let config = Config::from_env()?;
    let dispatcher = build_dispatcher(&config).await?;
    respond(&dispatcher, event).await
}

/// Builds the production adapters for `config`.
pub async fn build_dispatcher(config: &Config) -> Result<DailyDispatcher, DispatchError> {
    let repository = MongoContentRepository::connect(
        &config.mongodb_uri,
        &config.database_name,
        &config.collection_name,
    )
    .await?;

    let mailer = SmtpMailer::new(
        config.smtp_host.clone(),
        config.smtp_port,
        config.sender_email.clone(),
        config.sender_password.clone(),
        config.recipients.clone(),
    );

    Ok(DailyDispatcher::new(
        Arc::new(repository),
        Notifier::new(Arc::new(mailer)),
        Arc::new(SystemClock),
        config.utc_offset,
    ))
}

/// Dispatches `event` and wraps the report, echoing the event back.
pub async fn respond(
    dispatcher: &DailyDispatcher,
    event: Value,
) -> Result<InvocationResponse, DispatchError> {
    let event_type = protocol::event_type(&event);
    info!(event_type = %event_type, "Dispatching");

    let report = dispatcher.dispatch(&event_type).await?;
    Ok(InvocationResponse::from_report(event, &report)?)
}
