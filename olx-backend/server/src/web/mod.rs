pub mod controller;
pub mod error;

use std::{future::Future, net::SocketAddr};

use axum::{extract::Request, http, routing, Extension, Json, Router, ServiceExt};
use mongodb::Database;
use olx_axum::json_response;
use olx_backend_core::{config::WebConfig, ServerInfo};
use snafu::ResultExt;
use tokio::net::TcpListener;
use tower::{Layer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    normalize_path::NormalizePathLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;

pub use self::{controller::ApiDoc, error::Error};
use crate::service::DispatchService;

pub async fn new_api_server<ShutdownSignal>(
    web_config: WebConfig,
    service_state: ServiceState,
    server_info: ServerInfo,
    shutdown_signal: ShutdownSignal,
) -> Result<(), Error>
where
    ShutdownSignal: Future<Output = ()> + Send + 'static,
{
    let socket_address = web_config.listen_address;

    let router = {
        let router = api_router(service_state, server_info, &web_config);
        let router = NormalizePathLayer::trim_trailing_slash().layer(router);
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(router)
    };

    let listener = TcpListener::bind(&socket_address).await.context(error::BindTcpServerSnafu)?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|err| Error::ServeHttpServer { message: err.to_string() })
}

/// Builds every route of the API with its middleware stack.
pub fn api_router(
    service_state: ServiceState,
    server_info: ServerInfo,
    web_config: &WebConfig,
) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(web_config))
        .layer(CompressionLayer::new());

    Router::new()
        .route("/", routing::get(controller::server_info))
        .route("/openapi.json", routing::get(openapi_json))
        .merge(controller::api_router(service_state))
        .nest_service("/uploads", ServeDir::new(&web_config.uploads_directory))
        .fallback(fallback)
        .layer(Extension(server_info))
        .layer(middleware_stack)
}

fn cors_layer(WebConfig { allowed_origins, .. }: &WebConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins.iter().cloned()))
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT, http::Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

// SAFETY: `axum` handler must be async
#[allow(clippy::unused_async)]
async fn fallback(uri: http::Uri) -> axum::response::Response {
    json_response! {
        status: http::StatusCode::NOT_FOUND,
        message: format!("No route for {}", uri.path())
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> { Json(ApiDoc::openapi()) }

#[derive(Clone)]
pub struct ServiceState {
    pub dispatch_service: DispatchService,
    pub database: Database,
}

impl ServiceState {
    /// Create a new service state
    #[inline]
    #[must_use]
    pub const fn new(dispatch_service: DispatchService, database: Database) -> Self {
        Self { dispatch_service, database }
    }
}
