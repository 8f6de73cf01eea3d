use lettre::{
    message::{header::ContentType, Mailbox, MultiPart},
    Address, Message,
};
use snafu::ResultExt;

use crate::{error, Error, Notification};

/// Builds the `From` mailbox, e.g. `"VJTI OLX" <sender@gmail.com>`.
pub(crate) fn sender_mailbox(name: Option<&str>, address: &str) -> Result<Mailbox, Error> {
    let email = address
        .parse::<Address>()
        .context(error::ParseAddressSnafu { address: address.to_string() })?;

    Ok(Mailbox::new(name.filter(|name| !name.is_empty()).map(str::to_string), email))
}

/// Builds the MIME message for `notification`.
///
/// A notification without an HTML body becomes a `text/plain` message,
/// otherwise a `multipart/alternative` with both parts.
pub(crate) fn build_message(from: &Mailbox, notification: &Notification) -> Result<Message, Error> {
    let to = notification
        .recipient()
        .parse::<Mailbox>()
        .context(error::ParseAddressSnafu { address: notification.recipient().to_string() })?;

    let builder = Message::builder().from(from.clone()).to(to).subject(notification.subject());

    match notification.html_body() {
        Some(html) => builder.multipart(MultiPart::alternative_plain_html(
            notification.text_body().to_string(),
            html.to_string(),
        )),
        None => builder.header(ContentType::TEXT_PLAIN).body(notification.text_body().to_string()),
    }
    .context(error::BuildEmailSnafu)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatted(message: &Message) -> String { String::from_utf8(message.formatted()).unwrap() }

    #[test]
    fn test_build_plain_text_message() {
        let from = sender_mailbox(Some("VJTI OLX"), "sender@example.com").unwrap();
        let notification =
            Notification::new("recipient@example.com", "Your listing", "Hello there", None).unwrap();

        let message = build_message(&from, &notification).unwrap();
        let formatted = formatted(&message);

        assert!(formatted.contains("VJTI OLX"));
        assert!(formatted.contains("<sender@example.com>"));
        assert!(formatted.contains("To: recipient@example.com"));
        assert!(formatted.contains("Subject: Your listing"));
        assert!(formatted.contains("Content-Type: text/plain"));
        assert!(formatted.contains("Hello there"));
        assert!(!formatted.contains("multipart/alternative"));
    }

    #[test]
    fn test_build_message_with_html_alternative() {
        let from = sender_mailbox(None, "sender@example.com").unwrap();
        let notification = Notification::new(
            "recipient@example.com",
            "Your listing",
            "Hello there",
            Some("<h1>Hello there</h1>".to_string()),
        )
        .unwrap();

        let message = build_message(&from, &notification).unwrap();
        let formatted = formatted(&message);

        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("text/plain"));
        assert!(formatted.contains("text/html"));
        assert!(formatted.contains("<h1>Hello there</h1>"));
    }

    #[test]
    fn test_build_message_invalid_recipient() {
        let from = sender_mailbox(None, "sender@example.com").unwrap();
        let notification = Notification::new("invalid-email", "Hi", "Hello", None).unwrap();

        let err = build_message(&from, &notification).unwrap_err();
        assert!(matches!(err, Error::ParseAddress { ref address, .. } if address == "invalid-email"));
    }

    #[test]
    fn test_sender_mailbox_invalid_address() {
        assert!(sender_mailbox(Some("VJTI OLX"), "not-an-address").is_err());
    }
}
