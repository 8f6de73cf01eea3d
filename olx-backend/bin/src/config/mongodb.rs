use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MongoDbConfig {
    #[serde(default = "MongoDbConfig::default_uri")]
    pub uri: String,

    /// Falls back to the database named in `uri`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    #[serde(default = "MongoDbConfig::default_app_name")]
    pub app_name: Option<String>,

    #[serde(default = "MongoDbConfig::default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "MongoDbConfig::default_server_selection_timeout_secs")]
    pub server_selection_timeout_secs: u64,
}

impl MongoDbConfig {
    #[inline]
    pub fn default_uri() -> String { olx_backend_core::DEFAULT_MONGODB_URI.to_string() }

    #[inline]
    pub fn default_app_name() -> Option<String> { Some(olx_backend_core::PROJECT_NAME.to_string()) }

    #[inline]
    pub const fn default_connect_timeout_secs() -> u64 { 10 }

    #[inline]
    pub const fn default_server_selection_timeout_secs() -> u64 { 30 }
}

impl Default for MongoDbConfig {
    fn default() -> Self {
        Self {
            uri: Self::default_uri(),
            database: None,
            app_name: Self::default_app_name(),
            connect_timeout_secs: Self::default_connect_timeout_secs(),
            server_selection_timeout_secs: Self::default_server_selection_timeout_secs(),
        }
    }
}

impl From<MongoDbConfig> for olx_backend_core::config::MongoDbConfig {
    fn from(
        MongoDbConfig {
            uri,
            database,
            app_name,
            connect_timeout_secs,
            server_selection_timeout_secs,
        }: MongoDbConfig,
    ) -> Self {
        Self {
            uri,
            database,
            app_name,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            server_selection_timeout: Duration::from_secs(server_selection_timeout_secs),
        }
    }
}
