use std::net::SocketAddr;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use notification::DispatchOutcome;
use olx_axum::response::JsonMessage;
use olx_backend_core::model::SendEmailRequest;

use crate::{
    web::controller::{Error, Result},
    ServiceState,
};

/// Send a transactional email
///
/// Makes exactly one delivery attempt. The request is rejected before any
/// delivery attempt if `to`, `subject` or `text` is missing or empty.
#[utoipa::path(
    post,
    operation_id = "send_email",
    path = "/sendEmail",
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "Email sent successfully", body = olx_axum::response::Message),
        (status = 400, description = "Missing required fields or malformed body", body = olx_axum::response::Message),
        (status = 413, description = "Request body exceeds the size limit", body = olx_axum::response::Message),
        (status = 500, description = "The mail provider did not accept the email", body = olx_axum::response::Message)
    ),
    tag = "Email"
)]
pub async fn send_email(
    State(state): State<ServiceState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: std::result::Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<JsonMessage> {
    let request = match payload {
        Ok(Json(request)) => request,
        // no body or a non-JSON body carries none of the required fields
        Err(JsonRejection::MissingJsonContentType(_)) => SendEmailRequest::default(),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(Error::RequestBodyTooLarge { message: rejection.body_text() });
        }
        Err(rejection) => {
            return Err(Error::InvalidRequestBody { message: rejection.body_text() });
        }
    };

    request.validate()?;

    let client_ip = olx_axum::request_ip(&headers, connect_info.as_ref().map(|info| &info.0));
    tracing::info!(
        client_ip = ?client_ip,
        to = ?request.to,
        "Dispatching email"
    );

    match state.dispatch_service.dispatch(request).await {
        DispatchOutcome::Sent { .. } => Ok(JsonMessage::ok("Email sent successfully")),
        DispatchOutcome::Failed { cause } => Err(Error::SendEmail { cause }),
    }
}
