// request and response bodies of the HTTP API

use notification::Notification;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use utoipa::ToSchema;

use crate::error::{self, Error, Result};

/// Body of `POST /sendEmail`.
///
/// Every field is optional on the wire so that a missing field is reported as
/// a validation failure rather than a parse failure.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize, ToSchema)]
pub struct SendEmailRequest {
    /// Recipient address.
    #[schema(example = "buyer@example.com")]
    pub to: Option<String>,

    #[schema(example = "Your listing has a new offer")]
    pub subject: Option<String>,

    /// Plain text body.
    #[schema(example = "Someone wants to buy your bicycle.")]
    pub text: Option<String>,

    /// Optional HTML alternative of `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl SendEmailRequest {
    /// Wire names of required fields that are absent, `null` or empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [("to", &self.to), ("subject", &self.subject), ("text", &self.text)]
            .into_iter()
            .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
            .map(|(field, _)| field)
            .collect()
    }

    /// # Errors
    ///
    /// Returns [`Error::MissingRequiredFields`] naming every missing field.
    pub fn validate(&self) -> Result<()> {
        let fields = self.missing_fields();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingRequiredFields { fields })
        }
    }

    /// # Errors
    ///
    /// Returns an error if a required field is missing.
    pub fn into_notification(self) -> Result<Notification> {
        self.validate()?;

        let Self { to, subject, text, html } = self;
        Notification::new(
            to.unwrap_or_default(),
            subject.unwrap_or_default(),
            text.unwrap_or_default(),
            html,
        )
        .context(error::InvalidNotificationSnafu)
    }
}
