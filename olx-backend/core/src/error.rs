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
    #[snafu(display("Missing required fields: {}", fields.join(", ")))]
    MissingRequiredFields { fields: Vec<&'static str> },

    #[snafu(display("{source}"))]
    InvalidNotification { source: notification::Error },
}

impl IntoResponse for Error {
    // SAFETY: allow: high cognitive complexity caused by `tracing` macro
    #[allow(clippy::cognitive_complexity)]
    fn into_response(self) -> Response {
        match self {
            Self::MissingRequiredFields { .. } | Self::InvalidNotification { .. } => json_response! {
                reason: self,
                status: StatusCode::BAD_REQUEST,
                message: "Missing required fields"
            },
        }
    }
}
