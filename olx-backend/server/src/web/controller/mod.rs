// FIXME: remove this after this utoipa issue is fixed: https://github.com/juhaku/utoipa/pull/1423
#![allow(clippy::needless_for_each)]
mod email;
mod error;

use axum::{extract::State, routing, Extension, Json, Router};
use mongodb::bson::doc;
use olx_axum::response::{JsonMessage, Message};
use olx_backend_core::{model::SendEmailRequest, ServerInfo};
use snafu::ResultExt;
use utoipa::OpenApi;

pub use self::error::{Error, Result};
use crate::ServiceState;

pub fn api_router(service_state: ServiceState) -> Router {
    Router::new()
        .route("/health", routing::get(health))
        .route("/sendEmail", routing::post(email::send_email))
        .with_state(service_state)
}

/// Get server info
#[utoipa::path(
    get,
    operation_id = "get_server_info",
    path = "/",
    responses(
        (status = 200, body = ServerInfo)
    )
)]
pub async fn server_info(Extension(server_info): Extension<ServerInfo>) -> Json<ServerInfo> {
    Json(server_info)
}

/// Check that the datastore is reachable
#[utoipa::path(
    get,
    operation_id = "health",
    path = "/health",
    responses(
        (status = 200, body = Message),
        (status = 503, description = "MongoDB is unreachable", body = Message)
    )
)]
pub async fn health(State(state): State<ServiceState>) -> Result<JsonMessage> {
    let _ = state
        .database
        .run_command(doc! { "ping": 1 })
        .await
        .context(error::DatabaseUnavailableSnafu)?;

    Ok(JsonMessage::ok("OK"))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        server_info,
        health,
        email::send_email,
    ),
    components(schemas(
        ServerInfo,
        Message,
        SendEmailRequest,
    )),
    tags(
        (name = "Email", description = "Transactional email")
    )
)]
pub struct ApiDoc;
