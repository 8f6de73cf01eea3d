//! SMTP relay client, e.g. Gmail SMTP with an app password.

use std::{
    fmt::{self, Debug, Formatter},
    time::Duration,
};

use async_trait::async_trait;
use lettre::{
    transport::smtp::{authentication::Credentials, response::Response},
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::{error, message, DispatchOutcome, Error, Notification, NotificationClient};

/// How the connection to the relay is secured.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Security {
    /// Implicit TLS, usually port 465.
    #[default]
    Wrapper,

    /// STARTTLS upgrade, usually port 587.
    StartTls,

    /// Unencrypted, for local mail catchers only.
    Plain,
}

/// Configuration for the SMTP client.
#[derive(Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "Config::default_host")]
    pub host: String,

    #[serde(default = "Config::default_port")]
    pub port: u16,

    #[serde(default)]
    pub security: Security,

    /// Account name on the relay, also used as the sender address.
    #[serde(default)]
    pub username: String,

    /// Account secret. Authentication is skipped when empty.
    #[serde(default)]
    pub password: String,

    #[serde(default = "Config::default_sender_name")]
    pub sender_name: Option<String>,

    /// Timeout for each SMTP command.
    #[serde(default = "Config::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Config {
    #[inline]
    #[must_use]
    pub fn default_host() -> String { "smtp.gmail.com".to_string() }

    #[inline]
    #[must_use]
    pub const fn default_port() -> u16 { 465 }

    #[inline]
    #[must_use]
    pub fn default_sender_name() -> Option<String> { Some("VJTI OLX".to_string()) }

    #[inline]
    #[must_use]
    pub const fn default_timeout_secs() -> u64 { 30 }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            security: Security::default(),
            username: String::new(),
            password: String::new(),
            sender_name: Self::default_sender_name(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("security", &self.security)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("sender_name", &self.sender_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// SMTP client. Cloning shares nothing but configuration; each send opens its
/// own connection.
#[derive(Clone)]
pub struct Client {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    sender_name: Option<String>,
}

impl Client {
    /// Creates a new SMTP client.
    ///
    /// The sender address is only validated when a message is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS parameters for `host` cannot be built.
    pub fn new(config: Config) -> Result<Self, Error> {
        let Config { host, port, security, username, password, sender_name, timeout_secs } =
            config;

        tracing::info!(%host, port, ?security, sender = %username, "Using SMTP relay for email");

        let builder = match security {
            Security::Wrapper => AsyncSmtpTransport::<Tokio1Executor>::relay(&host),
            Security::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host),
            Security::Plain => Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&host)),
        }
        .context(error::CreateSmtpTransportSnafu { host: host.clone() })?
        .port(port)
        .timeout(Some(Duration::from_secs(timeout_secs)));

        let builder = if password.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(username.clone(), password))
        };

        Ok(Self { transport: builder.build(), from_address: username, sender_name })
    }

    async fn deliver(&self, notification: &Notification) -> Result<String, Error> {
        let from = message::sender_mailbox(self.sender_name.as_deref(), &self.from_address)?;
        let email = message::build_message(&from, notification)?;

        let response = self.transport.send(email).await.context(error::SmtpDeliverySnafu)?;

        Ok(acknowledgment(&response))
    }
}

#[async_trait]
impl NotificationClient for Client {
    async fn send(&self, notification: &Notification) -> DispatchOutcome {
        let outcome = DispatchOutcome::from(self.deliver(notification).await);

        match outcome {
            DispatchOutcome::Sent { ref acknowledgment } => {
                tracing::info!(to = %notification.recipient(), %acknowledgment, "Email accepted by SMTP relay");
            }
            DispatchOutcome::Failed { ref cause } => {
                tracing::error!(to = %notification.recipient(), %cause, "Failed to send email via SMTP");
            }
        }

        outcome
    }
}

/// Final server reply, e.g. `250 2.0.0 OK  1700000000 x1-20020a`.
fn acknowledgment(response: &Response) -> String {
    let lines = response.message().collect::<Vec<_>>();
    format!("{} {}", response.code(), lines.join(" ")).trim_end().to_string()
}
