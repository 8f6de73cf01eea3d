use std::{sync::Arc, time::Duration};

use notification::{DispatchOutcome, NotificationClient};
use olx_backend_core::model::SendEmailRequest;

/// Validates email requests and hands them to the configured transport.
#[derive(Clone)]
pub struct DispatchService {
    client: Arc<dyn NotificationClient>,
    timeout: Duration,
}

impl DispatchService {
    #[inline]
    #[must_use]
    pub fn new(client: Arc<dyn NotificationClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Sends `request` with a single delivery attempt.
    ///
    /// An invalid request fails without reaching the transport. A transport
    /// that does not finish within the dispatch timeout is reported as failed.
    pub async fn dispatch(&self, request: SendEmailRequest) -> DispatchOutcome {
        let notification = match request.into_notification() {
            Ok(notification) => notification,
            Err(err) => {
                tracing::warn!(%err, "Rejected email request");
                return DispatchOutcome::failed(err);
            }
        };

        let outcome =
            tokio::time::timeout(self.timeout, self.client.send(&notification)).await.unwrap_or_else(
                |_| {
                    DispatchOutcome::failed(format!(
                        "Mail provider did not respond within {} seconds",
                        self.timeout.as_secs_f64()
                    ))
                },
            );

        match outcome {
            DispatchOutcome::Sent { ref acknowledgment } => {
                tracing::info!(to = %notification.recipient(), %acknowledgment, "Email sent");
            }
            DispatchOutcome::Failed { ref cause } => {
                tracing::warn!(to = %notification.recipient(), %cause, "Email dispatch failed");
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use async_trait::async_trait;
    use notification::Notification;

    use super::*;

    struct RecordingClient {
        outcome: DispatchOutcome,
        delay: Duration,
        sent: Mutex<Vec<Notification>>,
        calls: AtomicUsize,
    }

    impl RecordingClient {
        fn new(outcome: DispatchOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                delay: Duration::ZERO,
                sent: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl NotificationClient for RecordingClient {
        async fn send(&self, notification: &Notification) -> DispatchOutcome {
            let _ = self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().unwrap().push(notification.clone());
            tokio::time::sleep(self.delay).await;
            self.outcome.clone()
        }
    }

    fn request() -> SendEmailRequest {
        SendEmailRequest {
            to: Some("buyer@example.com".to_string()),
            subject: Some("Offer".to_string()),
            text: Some("Is the bicycle still available?".to_string()),
            html: None,
        }
    }

    #[tokio::test]
    async fn test_sent_outcome_is_returned_unchanged() {
        let client = RecordingClient::new(DispatchOutcome::Sent {
            acknowledgment: "250 2.0.0 OK".to_string(),
        });
        let service = DispatchService::new(client.clone(), Duration::from_secs(5));

        let outcome = service.dispatch(request()).await;

        assert_eq!(outcome, DispatchOutcome::Sent { acknowledgment: "250 2.0.0 OK".to_string() });
        let sent = client.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient(), "buyer@example.com");
        assert_eq!(sent[0].text_body(), "Is the bicycle still available?");
    }

    #[tokio::test]
    async fn test_failed_outcome_is_returned_unchanged() {
        let client = RecordingClient::new(DispatchOutcome::failed("535 Authentication failed"));
        let service = DispatchService::new(client, Duration::from_secs(5));

        let outcome = service.dispatch(request()).await;

        assert_eq!(outcome, DispatchOutcome::failed("535 Authentication failed"));
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_transport() {
        let client = RecordingClient::new(DispatchOutcome::Sent { acknowledgment: "ok".into() });
        let service = DispatchService::new(client.clone(), Duration::from_secs(5));

        let outcome = service.dispatch(SendEmailRequest { to: None, ..request() }).await;

        assert!(matches!(outcome, DispatchOutcome::Failed { ref cause } if cause.contains("to")));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_slow_transport_times_out() {
        let client = Arc::new(RecordingClient {
            outcome: DispatchOutcome::Sent { acknowledgment: "late".into() },
            delay: Duration::from_secs(5),
            sent: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        });
        let service = DispatchService::new(client, Duration::from_millis(50));

        let outcome = service.dispatch(request()).await;

        assert_eq!(
            outcome,
            DispatchOutcome::failed("Mail provider did not respond within 0.05 seconds")
        );
    }

    #[tokio::test]
    async fn test_identical_requests_are_sent_twice() {
        let client = RecordingClient::new(DispatchOutcome::Sent { acknowledgment: "ok".into() });
        let service = DispatchService::new(client.clone(), Duration::from_secs(5));

        assert!(service.dispatch(request()).await.is_sent());
        assert!(service.dispatch(request()).await.is_sent());

        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }
}
