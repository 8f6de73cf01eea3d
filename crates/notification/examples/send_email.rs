//! Example: Send one email through the Gmail SMTP relay.
//!
//! # Usage
//!
//! ```bash
//! export EMAIL_USER="sender@gmail.com"
//! export EMAIL_PASS="app-password"
//! cargo run --example send_email -- recipient@example.com
//! ```

use notification::{smtp, DispatchOutcome, Notification};

#[tokio::main]
async fn main() -> Result<(), notification::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let recipient = std::env::args().nth(1).unwrap_or_else(|| "user@example.com".to_string());

    let config = smtp::Config {
        username: std::env::var("EMAIL_USER").unwrap_or_default(),
        password: std::env::var("EMAIL_PASS").unwrap_or_default(),
        ..smtp::Config::default()
    };

    let client = notification::connect(notification::Config::Smtp(config)).await?;

    let notification = Notification::new(
        recipient,
        "Your listing is live",
        "Your item is now visible to other students.",
        Some("<p>Your item is now <b>visible</b> to other students.</p>".to_string()),
    )?;

    match client.send(&notification).await {
        DispatchOutcome::Sent { acknowledgment } => tracing::info!(%acknowledgment, "Email sent"),
        DispatchOutcome::Failed { cause } => tracing::warn!(%cause, "Email was not sent"),
    }

    Ok(())
}
