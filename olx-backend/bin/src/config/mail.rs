use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MailConfig {
    #[serde(default = "MailConfig::default_dispatch_timeout_secs")]
    pub dispatch_timeout_secs: u64,

    #[serde(default)]
    pub transport: notification::Config,
}

impl MailConfig {
    #[inline]
    pub const fn default_dispatch_timeout_secs() -> u64 { 30 }

    /// Sets the sender account, i.e. the SMTP username or the impersonated
    /// Gmail user.
    pub fn set_sender(&mut self, sender: String) {
        match self.transport {
            notification::Config::Smtp(ref mut smtp) => smtp.username = sender,
            notification::Config::Gmail(ref mut gmail) => gmail.impersonate_user = sender,
        }
    }

    /// Sets the SMTP password. The Gmail API transport has no password.
    pub fn set_password(&mut self, password: String) {
        if let notification::Config::Smtp(ref mut smtp) = self.transport {
            smtp.password = password;
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            dispatch_timeout_secs: Self::default_dispatch_timeout_secs(),
            transport: notification::Config::default(),
        }
    }
}

impl From<MailConfig> for olx_backend_core::config::MailConfig {
    fn from(MailConfig { dispatch_timeout_secs, transport }: MailConfig) -> Self {
        Self { transport, dispatch_timeout: Duration::from_secs(dispatch_timeout_secs) }
    }
}
