mod error;
mod mail;
mod mongodb;
mod web;

use std::path::{Path, PathBuf};

use olx_cli_common::config::LogConfig;
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

pub use self::{error::Error, mail::MailConfig, mongodb::MongoDbConfig, web::WebConfig};

const PORT_ENV: &str = "PORT";
const MONGO_URI_ENV: &str = "MONGO_URI";
const EMAIL_USER_ENV: &str = "EMAIL_USER";
const EMAIL_PASS_ENV: &str = "EMAIL_PASS";

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub web: WebConfig,

    #[serde(default)]
    pub mongodb: MongoDbConfig,

    #[serde(default)]
    pub mail: MailConfig,
}

impl Config {
    #[inline]
    pub fn default_path() -> PathBuf {
        [
            olx_backend_core::PROJECT_CONFIG_DIR.to_path_buf(),
            PathBuf::from(olx_backend_core::CONFIG_NAME),
        ]
        .into_iter()
        .collect()
    }

    #[inline]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config: Self = {
            let data = std::fs::read_to_string(&path)
                .context(error::OpenConfigSnafu { filename: path.as_ref().to_path_buf() })?;

            serde_yaml::from_str(&data)
                .context(error::ParseConfigSnafu { filename: path.as_ref().to_path_buf() })?
        };

        config.log.file_path = match config.log.file_path.map(|path| {
            path.try_resolve()
                .map(|path| path.to_path_buf())
                .with_context(|_| error::ResolveFilePathSnafu { file_path: path.clone() })
        }) {
            Some(Ok(path)) => Some(path),
            Some(Err(err)) => return Err(err),
            None => None,
        };

        Ok(config)
    }

    /// Applies the process environment on top of the file configuration.
    ///
    /// Unset and empty variables leave the configuration untouched.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(value) = lookup(PORT_ENV) {
            self.web.port = value
                .parse()
                .map_err(|_| Error::InvalidEnvironmentVariable { name: PORT_ENV, value })?;
        }
        if let Some(uri) = lookup(MONGO_URI_ENV) {
            self.mongodb.uri = uri;
        }
        if let Some(sender) = lookup(EMAIL_USER_ENV) {
            self.mail.set_sender(sender);
        }
        if let Some(password) = lookup(EMAIL_PASS_ENV) {
            self.mail.set_password(password);
        }

        Ok(())
    }
}

#[inline]
pub fn load_server_config(
    Config { web, mongodb, mail, .. }: Config,
) -> Result<olx_backend_core::config::Config, Error> {
    Ok(olx_backend_core::config::Config {
        web: web.try_into()?,
        mongodb: mongodb.into(),
        mail: mail.into(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let text = serde_yaml::to_string(&Config::default()).unwrap();
        let config: Config = serde_yaml::from_str(&text).unwrap();

        assert_eq!(config.web, WebConfig::default());
        assert_eq!(config.web.port, 5000);
        assert_eq!(config.mongodb.uri, olx_backend_core::DEFAULT_MONGODB_URI);
        assert_eq!(config.mail.dispatch_timeout_secs, 30);
        assert!(matches!(config.mail.transport, notification::Config::Smtp(_)));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config.web.allowed_origins, WebConfig::default_allowed_origins());
        assert_eq!(config.web.uploads_directory, PathBuf::from("uploads"));
    }

    #[test]
    fn test_environment_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[
                ("PORT", "8080"),
                ("MONGO_URI", "mongodb://db.internal:27017/olx"),
                ("EMAIL_USER", "sender@gmail.com"),
                ("EMAIL_PASS", "app-password"),
            ]))
            .unwrap();

        assert_eq!(config.web.port, 8080);
        assert_eq!(config.mongodb.uri, "mongodb://db.internal:27017/olx");
        let notification::Config::Smtp(ref smtp) = config.mail.transport else {
            panic!("SMTP transport expected");
        };
        assert_eq!(smtp.username, "sender@gmail.com");
        assert_eq!(smtp.password, "app-password");
    }

    #[test]
    fn test_email_user_sets_gmail_impersonated_user() {
        let mut config: Config =
            serde_yaml::from_str("mail:\n  transport:\n    type: gmail\n").unwrap();
        config.apply_overrides(env(&[("EMAIL_USER", "noreply@example.com")])).unwrap();

        let notification::Config::Gmail(ref gmail) = config.mail.transport else {
            panic!("Gmail transport expected");
        };
        assert_eq!(gmail.impersonate_user, "noreply@example.com");
    }

    #[test]
    fn test_empty_and_invalid_environment_values() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("PORT", ""), ("MONGO_URI", "")])).unwrap();
        assert_eq!(config.web.port, 5000);
        assert_eq!(config.mongodb.uri, olx_backend_core::DEFAULT_MONGODB_URI);

        let err = config.apply_overrides(env(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, Error::InvalidEnvironmentVariable { name: "PORT", .. }));
    }

    #[test]
    fn test_server_config_rejects_invalid_origin() {
        let mut config = Config::default();
        config.web.allowed_origins = vec!["http://localhost:5173\n".to_string()];

        assert!(matches!(load_server_config(config), Err(Error::InvalidAllowedOrigin { .. })));
    }

    #[test]
    fn test_server_config_rejects_wildcard_origin() {
        let mut config = Config::default();
        config.web.allowed_origins = vec!["http://localhost:5173".to_string(), "*".to_string()];

        assert!(matches!(load_server_config(config), Err(Error::WildcardAllowedOrigin)));
    }

    #[test]
    fn test_server_config_conversion() {
        let server_config = load_server_config(Config::default()).unwrap();

        assert_eq!(server_config.web.listen_address.port(), 5000);
        assert_eq!(server_config.web.allowed_origins.len(), 2);
        assert_eq!(server_config.mail.dispatch_timeout.as_secs(), 30);
        assert_eq!(server_config.mongodb.connect_timeout.as_secs(), 10);
    }
}
