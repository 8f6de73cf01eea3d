use snafu::Snafu;

use crate::web;

pub type Result<T> = std::result::Result<T, Error>;

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Invalid MongoDB connection string `{uri}`, error: {source}"))]
    ParseMongoDbUri { uri: String, source: mongodb::error::Error },

    #[snafu(display("Can not create MongoDB client for `{uri}`, error: {source}"))]
    CreateMongoDbClient { uri: String, source: mongodb::error::Error },

    #[snafu(display("Failed to reach MongoDB at `{uri}`, error: {source}"))]
    PingMongoDb { uri: String, source: mongodb::error::Error },

    #[snafu(display("Can not initialize mail transport, error: {source}"))]
    InitializeNotificationClient { source: notification::Error },

    #[snafu(display("{source}"))]
    Web { source: web::Error },
}

impl From<web::Error> for Error {
    fn from(source: web::Error) -> Self { Self::Web { source } }
}
