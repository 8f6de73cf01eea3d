mod error;
mod service;
mod web;

use std::sync::Arc;

use futures::{future::BoxFuture, FutureExt};
use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use notification::NotificationClient;
use olx_backend_core::{
    config::{Config, MongoDbConfig, WebConfig},
    ServerInfo, DEFAULT_MONGODB_DATABASE,
};
use sigfinn::{ExitStatus, LifecycleManager, Shutdown};
use snafu::ResultExt;

pub use self::{
    error::{Error, Result},
    service::DispatchService,
    web::{api_router, ApiDoc, ServiceState},
};

/// # Errors
/// Returns errors when server fails to start
pub async fn serve_with_shutdown(config: Config, server_info: ServerInfo) -> Result<()> {
    let Config { web, mongodb, mail } = config;

    let database = initialize_mongodb(&mongodb).await?;

    let notification_client = initialize_notification_client(mail.transport).await?;

    let service_state = ServiceState::new(
        DispatchService::new(notification_client, mail.dispatch_timeout),
        database,
    );

    let lifecycle_manager = LifecycleManager::<Error>::new();

    let _handle = lifecycle_manager
        .spawn("Http Server", create_web_http_server_future(web, service_state, server_info));

    if let Ok(Err(err)) = lifecycle_manager.serve().await {
        tracing::error!("{err}");
        Err(err)
    } else {
        Ok(())
    }
}

#[tracing::instrument(
    skip_all,
    fields(
        uri = %config.redacted_uri(),
        database = ?config.database
    )
)]
async fn initialize_mongodb(config: &MongoDbConfig) -> Result<Database> {
    tracing::info!("Initializing MongoDB client");

    let uri = config.redacted_uri();

    let mut options = ClientOptions::parse(&config.uri)
        .await
        .context(error::ParseMongoDbUriSnafu { uri: uri.clone() })?;
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.server_selection_timeout);
    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client =
        Client::with_options(options).context(error::CreateMongoDbClientSnafu { uri: uri.clone() })?;

    let database = match config.database {
        Some(ref name) => client.database(name),
        None => client.default_database().unwrap_or_else(|| client.database(DEFAULT_MONGODB_DATABASE)),
    };

    // fail fast, nothing works without the datastore
    let _ = database
        .run_command(doc! { "ping": 1 })
        .await
        .context(error::PingMongoDbSnafu { uri })?;

    tracing::info!(database = %database.name(), "MongoDB connected");

    Ok(database)
}

#[tracing::instrument(skip_all)]
async fn initialize_notification_client(
    transport: notification::Config,
) -> Result<Arc<dyn NotificationClient>> {
    tracing::info!("Initializing mail transport");

    notification::connect(transport).await.context(error::InitializeNotificationClientSnafu)
}

fn create_web_http_server_future(
    web_config: WebConfig,
    service_state: ServiceState,
    server_info: ServerInfo,
) -> impl FnOnce(Shutdown) -> BoxFuture<'static, ExitStatus<Error>> {
    move |shutdown_signal| {
        async move {
            tracing::info!("Listen Web HTTP server endpoint on {}", web_config.listen_address);

            let result =
                web::new_api_server(web_config, service_state, server_info, shutdown_signal).await;

            match result {
                Ok(()) => {
                    tracing::info!("HTTP server is shut down gracefully");
                    ExitStatus::Success
                }
                Err(err) => ExitStatus::FatalError(Error::from(err)),
            }
        }
        .boxed()
    }
}
