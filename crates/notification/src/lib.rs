//! # Notification Crate
//!
//! This crate sends transactional email through a configurable transport.
//!
//! ## Features
//!
//! - SMTP relay via `lettre` (implicit TLS, STARTTLS or plain)
//! - Gmail API integration with domain-wide delegation
//! - Plain text bodies with an optional HTML alternative
//! - Every delivery attempt resolves to a [`DispatchOutcome`]; transport
//!   failures never escape as errors

mod error;
pub mod gmail;
mod message;
pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use self::error::Error;

/// A single email to deliver.
///
/// Recipient, subject and text body are guaranteed to be non-empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    recipient: String,
    subject: String,
    text_body: String,
    html_body: Option<String>,
}

impl Notification {
    /// Creates a notification.
    ///
    /// An empty `html_body` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if the recipient, subject or text body
    /// is empty.
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        text_body: impl Into<String>,
        html_body: Option<String>,
    ) -> Result<Self, Error> {
        let recipient = recipient.into();
        let subject = subject.into();
        let text_body = text_body.into();

        for (field, value) in [("to", &recipient), ("subject", &subject), ("text", &text_body)] {
            if value.is_empty() {
                return Err(Error::MissingField { field });
            }
        }

        Ok(Self {
            recipient,
            subject,
            text_body,
            html_body: html_body.filter(|html| !html.is_empty()),
        })
    }

    #[inline]
    #[must_use]
    pub fn recipient(&self) -> &str { &self.recipient }

    #[inline]
    #[must_use]
    pub fn subject(&self) -> &str { &self.subject }

    #[inline]
    #[must_use]
    pub fn text_body(&self) -> &str { &self.text_body }

    #[inline]
    #[must_use]
    pub fn html_body(&self) -> Option<&str> { self.html_body.as_deref() }
}

/// Result of one delivery attempt.
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use]
pub enum DispatchOutcome {
    /// The provider accepted the message.
    Sent {
        /// Opaque acknowledgment returned by the provider.
        acknowledgment: String,
    },

    /// The message was not accepted.
    Failed {
        /// Human readable cause.
        cause: String,
    },
}

impl DispatchOutcome {
    #[inline]
    pub fn failed(cause: impl ToString) -> Self { Self::Failed { cause: cause.to_string() } }

    #[inline]
    #[must_use]
    pub const fn is_sent(&self) -> bool { matches!(self, Self::Sent { .. }) }
}

impl<E> From<Result<String, E>> for DispatchOutcome
where
    E: std::error::Error,
{
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(acknowledgment) => Self::Sent { acknowledgment },
            Err(err) => Self::failed(err),
        }
    }
}

/// Trait for clients that deliver notifications.
///
/// Implementations make exactly one attempt per call and report every failure
/// through [`DispatchOutcome::Failed`].
#[async_trait]
pub trait NotificationClient: Send + Sync {
    async fn send(&self, notification: &Notification) -> DispatchOutcome;
}

/// Transport selection.
#[allow(variant_size_differences)]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Config {
    Smtp(smtp::Config),
    Gmail(gmail::Config),
}

impl Default for Config {
    fn default() -> Self { Self::Smtp(smtp::Config::default()) }
}

/// Builds the client selected by `config`.
///
/// # Errors
///
/// Returns an error if the transport cannot be created.
pub async fn connect(config: Config) -> Result<Arc<dyn NotificationClient>, Error> {
    match config {
        Config::Smtp(config) => Ok(Arc::new(smtp::Client::new(config)?)),
        Config::Gmail(config) => Ok(Arc::new(gmail::Client::new(config).await?)),
    }
}
