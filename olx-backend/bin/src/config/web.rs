use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

use http::HeaderValue;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::config::{error, Error};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct WebConfig {
    #[serde(default = "WebConfig::default_host")]
    pub host: IpAddr,

    #[serde(default = "WebConfig::default_port")]
    pub port: u16,

    /// Origins allowed to call the API from a browser.
    #[serde(default = "WebConfig::default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    #[serde(default = "WebConfig::default_uploads_directory")]
    pub uploads_directory: PathBuf,
}

impl WebConfig {
    #[inline]
    pub const fn socket_address(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }

    #[inline]
    pub const fn default_host() -> IpAddr { olx_backend_core::DEFAULT_WEB_HOST }

    #[inline]
    pub const fn default_port() -> u16 { olx_backend_core::DEFAULT_WEB_PORT }

    #[inline]
    pub fn default_allowed_origins() -> Vec<String> {
        olx_backend_core::DEFAULT_ALLOWED_ORIGINS.iter().map(ToString::to_string).collect()
    }

    #[inline]
    pub fn default_uploads_directory() -> PathBuf {
        PathBuf::from(olx_backend_core::DEFAULT_UPLOADS_DIRECTORY)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            allowed_origins: Self::default_allowed_origins(),
            uploads_directory: Self::default_uploads_directory(),
        }
    }
}

impl TryFrom<WebConfig> for olx_backend_core::config::WebConfig {
    type Error = Error;

    fn try_from(config: WebConfig) -> Result<Self, Self::Error> {
        let listen_address = config.socket_address();
        let WebConfig { allowed_origins, uploads_directory, .. } = config;

        let allowed_origins = allowed_origins
            .into_iter()
            .map(|origin| {
                // credentialed CORS requires explicit origins
                if origin.trim() == "*" {
                    return error::WildcardAllowedOriginSnafu.fail();
                }
                HeaderValue::from_str(&origin).context(error::InvalidAllowedOriginSnafu { origin })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { listen_address, allowed_origins, uploads_directory })
    }
}
