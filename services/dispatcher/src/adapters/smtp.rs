//! services/dispatcher/src/adapters/smtp.rs
//!
//! This module contains the adapter for the outbound mail relay.
//! It implements the `MailTransport` port from the `core` crate using `lettre`.

use async_trait::async_trait;
use daily_learning_core::domain::EmailMessage;
use daily_learning_core::ports::{MailTransport, PortError, PortResult};
use lettre::message::header::{ContentType, To};
use lettre::message::{Mailbox, Mailboxes};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `MailTransport` port over SMTP with STARTTLS.
#[derive(Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    sender: String,
    password: String,
    recipients: String,
}

impl SmtpMailer {
    /// Creates a new `SmtpMailer`. The sender address doubles as the login name.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        sender: impl Into<String>,
        password: impl Into<String>,
        recipients: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            sender: sender.into(),
            password: password.into(),
            recipients: recipients.into(),
        }
    }

    /// Builds the RFC 5322 message. The recipient string goes into a single
    /// `To` header; a comma-separated list becomes several envelope recipients.
    fn build_message(&self, email: &EmailMessage) -> PortResult<Message> {
        let from: Mailbox = self
            .sender
            .parse()
            .map_err(|e| PortError::Delivery(format!("invalid sender address: {}", e)))?;
        let to: Mailboxes = self
            .recipients
            .parse()
            .map_err(|e| PortError::Delivery(format!("invalid recipient address: {}", e)))?;

        Message::builder()
            .from(from)
            .mailbox(To::from(to))
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| PortError::Delivery(format!("failed to build message: {}", e)))
    }

    fn transport(&self) -> PortResult<AsyncSmtpTransport<Tokio1Executor>> {
        let credentials = Credentials::new(self.sender.clone(), self.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| PortError::Delivery(e.to_string()))?
            .port(self.port)
            .credentials(credentials)
            .build();
        Ok(transport)
    }
}

//=========================================================================================
// `MailTransport` Trait Implementation
//=========================================================================================

#[async_trait]
impl MailTransport for SmtpMailer {
    /// Opens a session, sends one message and closes the session again.
    ///
    /// The transport is built per call without pooling, so the connection is
    /// dropped when this returns, on success and on error alike.
    async fn send(&self, email: &EmailMessage) -> PortResult<()> {
        let message = self.build_message(email)?;
        let transport = self.transport()?;

        debug!(host = %self.host, port = self.port, "Opening SMTP session");
        let response = transport
            .send(message)
            .await
            .map_err(|e| PortError::Delivery(e.to_string()))?;

        debug!(code = %response.code(), "SMTP relay accepted message");
        Ok(())
    }
}
