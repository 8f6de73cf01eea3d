use snafu::Snafu;

/// Errors that can occur in the notification crate.
#[allow(variant_size_differences)]
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// A required part of the notification is empty.
    #[snafu(display("Required field `{field}` is missing or empty"))]
    MissingField {
        /// Wire name of the field.
        field: &'static str,
    },

    /// An email address could not be parsed.
    #[snafu(display("Invalid email address `{address}`, error: {source}"))]
    ParseAddress {
        /// The rejected address.
        address: String,
        /// The underlying lettre error.
        source: lettre::address::AddressError,
    },

    /// Failed to build email.
    #[snafu(display("Failed to build email message, error: {source}"))]
    BuildEmail {
        /// The underlying lettre error.
        source: lettre::error::Error,
    },

    /// Failed to create the SMTP transport.
    #[snafu(display("Failed to create SMTP transport for {host}, error: {source}"))]
    CreateSmtpTransport {
        /// Configured relay host.
        host: String,
        /// The underlying lettre error.
        source: lettre::transport::smtp::Error,
    },

    /// The SMTP server refused the message or could not be reached.
    #[snafu(display("Failed to send email via SMTP, error: {source}"))]
    SmtpDelivery {
        /// The underlying lettre error.
        source: lettre::transport::smtp::Error,
    },

    /// Failed to create mailer client.
    #[snafu(display("Failed to create Gmail token source, error: {message}"))]
    CreateMailer {
        /// Description of the authentication failure.
        message: String,
    },

    /// Failed to obtain an access token for the Gmail API.
    #[snafu(display("Failed to get Gmail access token, error: {message}"))]
    AccessToken {
        /// Description of the token failure.
        message: String,
    },

    /// HTTP request failed.
    #[snafu(display("HTTP request failed: {source}"))]
    HttpRequest {
        /// The underlying reqwest error.
        source: reqwest::Error,
    },

    /// The Gmail API answered with a non-success status.
    #[snafu(display("Gmail API rejected the message with status {status}: {body}"))]
    GmailApi {
        /// HTTP status returned by the API.
        status: u16,
        /// Response body returned by the API.
        body: String,
    },
}
