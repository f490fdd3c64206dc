//! crates/daily_learning_core/src/notifier.rs
//!
//! Best-effort email delivery on top of a `MailTransport`.
//!
//! This is the only place where a failure is recoverable: every transport
//! error is logged and turned into `DeliveryOutcome::Failed`, so nothing
//! escapes to the caller.

use crate::domain::{DeliveryOutcome, EmailMessage};
use crate::ports::MailTransport;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct Notifier {
    transport: Arc<dyn MailTransport>,
}

impl Notifier {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Sends `subject`/`body` and reports whether it went out.
    pub async fn send_email(&self, subject: &str, body: &str) -> DeliveryOutcome {
        let message = EmailMessage {
            subject: subject.to_string(),
            body: body.to_string(),
        };
        self.deliver(&message).await
    }

    pub async fn deliver(&self, message: &EmailMessage) -> DeliveryOutcome {
        match self.transport.send(message).await {
            Ok(()) => {
                info!(subject = %message.subject, "Email sent");
                DeliveryOutcome::Sent
            }
            Err(e) => {
                error!(subject = %message.subject, error = %e, "Failed to send email");
                DeliveryOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
