//! Configuration for the notification handler.
//!
//! Loaded from environment variables over defaults, figment-style; the
//! handler runs headless, so there is no config file lookup.

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Notification handler configuration.
///
/// Environment variables prefixed with `ACS_NOTIFY_` override defaults,
/// e.g. `ACS_NOTIFY_DESTINATION`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address that receives the notification email.
    pub destination: String,
    /// Address the notification is sent from. Must be verified with the
    /// email API provider.
    pub source: String,
    /// Prefix prepended to the sender's subject line.
    pub subject_prefix: String,
    /// Email API endpoint URL.
    pub api_endpoint: String,
    /// Bearer token for the email API, if the endpoint requires one.
    pub api_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            destination: String::new(),
            source: String::new(),
            subject_prefix: "Instrument ACS contact: ".to_string(),
            api_endpoint: String::new(),
            api_token: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment over defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction or validation fails.
    pub fn load() -> Result<Self> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("ACS_NOTIFY_"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either address is missing or malformed, or the
    /// API endpoint is not an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        if !looks_like_address(&self.destination) {
            return Err(Error::config_validation(
                "destination is not an email address",
            ));
        }
        if !looks_like_address(&self.source) {
            return Err(Error::config_validation("source is not an email address"));
        }
        if !self.api_endpoint.starts_with("http://") && !self.api_endpoint.starts_with("https://") {
            return Err(Error::config_validation(
                "api_endpoint must be an http(s) URL",
            ));
        }
        Ok(())
    }
}

/// Cheap shape check; real validation is the provider's job.
fn looks_like_address(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}
