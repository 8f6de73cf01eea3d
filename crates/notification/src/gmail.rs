//! Gmail API client implementation for sending emails via domain-wide
//! delegation.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use google_cloud_token::{TokenSource, TokenSourceProvider};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::{error, message, DispatchOutcome, Error, Notification, NotificationClient};

/// Gmail API scopes required for sending emails.
const SCOPES: [&str; 1] = ["https://www.googleapis.com/auth/gmail.send"];

const SEND_ENDPOINT: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

/// Configuration for the Gmail client.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Google Workspace user to impersonate for domain-wide delegation.
    /// This will also be used as the sender address.
    #[serde(default)]
    pub impersonate_user: String,

    #[serde(default = "Config::default_sender_name")]
    pub sender_name: Option<String>,
}

impl Config {
    #[inline]
    #[must_use]
    pub fn default_sender_name() -> Option<String> { Some("VJTI OLX".to_string()) }
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Gmail API client for sending emails.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    token_source: Arc<dyn TokenSource>,
    from_address: String,
    sender_name: Option<String>,
}

impl Client {
    /// Creates a new Gmail client with domain-wide delegation.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable Google credentials are found.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use notification::gmail::{Client, Config};
    ///
    /// # async fn example() -> Result<(), notification::Error> {
    /// let config = Config {
    ///     impersonate_user: "noreply@example.com".to_string(),
    ///     sender_name: Some("VJTI OLX".to_string()),
    /// };
    ///
    /// let client = Client::new(config).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: Config) -> Result<Self, Error> {
        let Config { impersonate_user, sender_name } = config;
        tracing::info!(%impersonate_user, "Using domain-wide delegation for Gmail API");

        let auth_config = google_cloud_auth::project::Config::default()
            .with_scopes(&SCOPES)
            .with_sub(&impersonate_user);

        let token_source_provider =
            google_cloud_auth::token::DefaultTokenSourceProvider::new(auth_config)
                .await
                .map_err(|err| Error::CreateMailer { message: err.to_string() })?;

        Ok(Self {
            http: reqwest::Client::new(),
            token_source: token_source_provider.token_source(),
            from_address: impersonate_user,
            sender_name,
        })
    }

    async fn deliver(&self, notification: &Notification) -> Result<String, Error> {
        let from = message::sender_mailbox(self.sender_name.as_deref(), &self.from_address)?;
        let encoded_email = URL_SAFE.encode(message::build_message(&from, notification)?.formatted());

        let token = self
            .token_source
            .token()
            .await
            .map_err(|err| Error::AccessToken { message: err.to_string() })?;

        let response = self
            .http
            .post(SEND_ENDPOINT)
            .header("Authorization", bearer(token))
            .json(&serde_json::json!({ "raw": encoded_email }))
            .send()
            .await
            .context(error::HttpRequestSnafu)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GmailApi { status: status.as_u16(), body });
        }

        let SendResponse { id } = response.json().await.context(error::HttpRequestSnafu)?;
        Ok(id)
    }
}

#[async_trait]
impl NotificationClient for Client {
    async fn send(&self, notification: &Notification) -> DispatchOutcome {
        let outcome = DispatchOutcome::from(self.deliver(notification).await);

        match outcome {
            DispatchOutcome::Sent { ref acknowledgment } => {
                tracing::info!(to = %notification.recipient(), message_id = %acknowledgment, "Email sent via Gmail API");
            }
            DispatchOutcome::Failed { ref cause } => {
                tracing::error!(to = %notification.recipient(), %cause, "Failed to send email via Gmail API");
            }
        }

        outcome
    }
}

fn bearer(token: String) -> String {
    if token.starts_with("Bearer ") {
        token
    } else {
        format!("Bearer {token}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_prefix_is_added_once() {
        assert_eq!(bearer("abc123".to_string()), "Bearer abc123");
        assert_eq!(bearer("Bearer abc123".to_string()), "Bearer abc123");
    }

    #[test]
    fn test_send_response_exposes_message_id() {
        let response: SendResponse =
            serde_json::from_str(r#"{"id":"18c0f1","threadId":"18c0f1","labelIds":["SENT"]}"#)
                .unwrap();
        assert_eq!(response.id, "18c0f1");
    }

    #[test]
    fn test_config_defaults_sender_name() {
        let config: Config = serde_yaml::from_str("impersonate_user: noreply@example.com\n").unwrap();
        assert_eq!(config.sender_name.as_deref(), Some("VJTI OLX"));
    }
}
