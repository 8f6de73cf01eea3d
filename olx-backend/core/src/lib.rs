pub mod config;
pub mod error;
pub mod model;

use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
    sync::LazyLock,
};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PROJECT_NAME: &str = "olx-backend";

pub const PROGRAM_NAME: &str = "olx-backend";
pub const CONFIG_NAME: &str = "olx-backend.yaml";

pub const DEFAULT_WEB_PORT: u16 = 5000;
pub const DEFAULT_WEB_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] =
    ["http://localhost:5173", "https://vjti-olx-1.vercel.app"];
pub const DEFAULT_UPLOADS_DIRECTORY: &str = "uploads";

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/olx";
/// Used when neither the configuration nor the connection string names a
/// database.
pub const DEFAULT_MONGODB_DATABASE: &str = "olx";

pub static PROJECT_CONFIG_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    ProjectDirs::from("", PROJECT_NAME, PROJECT_NAME).map_or_else(
        || PathBuf::from(".").join(PROJECT_NAME),
        |dirs| dirs.config_dir().to_path_buf(),
    )
});

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub version: String,
    pub branch: String,
    pub commit_hash: String,
    pub start_time: DateTime<Utc>,
}
