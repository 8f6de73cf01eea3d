use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every JSON response produced by the API.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ToSchema)]
pub struct Message {
    /// Human readable outcome.
    #[schema(example = "Email sent successfully")]
    pub message: String,

    /// Cause of a failure, only present on error responses that carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Message {
    #[inline]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self { Self { message: message.into(), error: None } }

    #[inline]
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[derive(Clone, Debug)]
pub struct JsonMessage {
    status_code: StatusCode,
    body: Message,
}

impl JsonMessage {
    #[inline]
    #[must_use]
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self { status_code, body: Message::new(message) }
    }

    #[inline]
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self { Self::new(StatusCode::OK, message) }

    #[inline]
    #[must_use]
    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.body = self.body.with_error(error);
        self
    }
}

impl IntoResponse for JsonMessage {
    fn into_response(self) -> Response { (self.status_code, Json(self.body)).into_response() }
}

#[doc(hidden)]
pub use tracing as __tracing;

/// Builds a [`JsonMessage`] response.
///
/// The `reason:` forms log the reason first, at `error` level for server
/// errors and at `warn` level otherwise.
#[macro_export]
macro_rules! json_response {
    (status: $status:expr,message: $message:expr) => {
        <$crate::response::JsonMessage as ::axum::response::IntoResponse>::into_response(
            $crate::response::JsonMessage::new($status, $message),
        )
    };

    (status: $status:expr,message: $message:expr,error: $error:expr) => {
        <$crate::response::JsonMessage as ::axum::response::IntoResponse>::into_response(
            $crate::response::JsonMessage::new($status, $message).error($error),
        )
    };

    (reason: $reason:expr,status: $status:expr,message: $message:expr) => {{
        let status: ::axum::http::StatusCode = $status;
        if status.is_server_error() {
            $crate::response::__tracing::error!(
                status_code = status.as_u16(),
                "Internal Server Error: {:?}",
                $reason
            );
        } else {
            $crate::response::__tracing::warn!(
                status_code = status.as_u16(),
                "Response Error: {:?}",
                $reason
            );
        }

        $crate::json_response! { status: status, message: $message }
    }};

    (reason: $reason:expr,status: $status:expr,message: $message:expr,error: $error:expr) => {{
        let status: ::axum::http::StatusCode = $status;
        if status.is_server_error() {
            $crate::response::__tracing::error!(
                status_code = status.as_u16(),
                "Internal Server Error: {:?}",
                $reason
            );
        } else {
            $crate::response::__tracing::warn!(
                status_code = status.as_u16(),
                "Response Error: {:?}",
                $reason
            );
        }

        $crate::json_response! { status: status, message: $message, error: $error }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_is_omitted_when_absent() {
        let value = serde_json::to_value(Message::new("Missing required fields")).unwrap();
        assert_eq!(value, serde_json::json!({ "message": "Missing required fields" }));

        let value = serde_json::to_value(
            Message::new("Failed to send email").with_error("535 Authentication failed"),
        )
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "message": "Failed to send email",
                "error": "535 Authentication failed"
            })
        );
    }

    #[test]
    fn test_macro_keeps_status_code() {
        let response = json_response! {
            reason: "upstream down",
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Failed to send email",
            error: "connection refused"
        };
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = json_response! { status: StatusCode::BAD_REQUEST, message: "Missing required fields" };
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
