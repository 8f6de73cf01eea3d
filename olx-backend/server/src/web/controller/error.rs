use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use olx_axum::json_response;
use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Model { source: olx_backend_core::error::Error },

    #[snafu(display("Invalid request body, error: {message}"))]
    InvalidRequestBody { message: String },

    #[snafu(display("Request body too large, error: {message}"))]
    RequestBodyTooLarge { message: String },

    #[snafu(display("Failed to send email, error: {cause}"))]
    SendEmail { cause: String },

    #[snafu(display("MongoDB is unavailable, error: {source}"))]
    DatabaseUnavailable { source: mongodb::error::Error },
}

impl From<olx_backend_core::error::Error> for Error {
    fn from(source: olx_backend_core::error::Error) -> Self { Self::Model { source } }
}

impl IntoResponse for Error {
    // SAFETY: allow: high cognitive complexity caused by `tracing` macro
    #[allow(clippy::cognitive_complexity)]
    fn into_response(self) -> Response {
        match self {
            Self::Model { source } => source.into_response(),
            Self::InvalidRequestBody { ref message } => json_response! {
                reason: self,
                status: StatusCode::BAD_REQUEST,
                message: "Invalid request body",
                error: message.clone()
            },
            Self::RequestBodyTooLarge { ref message } => json_response! {
                reason: self,
                status: StatusCode::PAYLOAD_TOO_LARGE,
                message: "Request body too large",
                error: message.clone()
            },
            Self::SendEmail { ref cause } => json_response! {
                reason: self,
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to send email",
                error: cause.clone()
            },
            Self::DatabaseUnavailable { ref source } => json_response! {
                reason: self,
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "Service unavailable",
                error: source.to_string()
            },
        }
    }
}
