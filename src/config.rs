use crate::error::SyncError;
use figment::{Figment, providers::Serialized};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

pub const DEFAULT_TOKEN_URL: &str = "https://login.salesforce.com/services/oauth2/token";
pub const DEFAULT_INSTANCE_URL: &str = "https://eu9.salesforce.com";
pub const DEFAULT_API_VERSION: &str = "v40.0";
pub const DEFAULT_CORP_DOMAIN: &str = "enterprise.io";
pub const DEFAULT_PHOTO_URL_PREFIX: &str = "https://enterprise.io/wp-content/uploads/20%/%/";

/// Environment variables read at startup.
const ENV_KEYS: &[&str] = &[
    "CLIENTID",
    "CLIENTSECRET",
    "USERNAME",
    "PASSWORD",
    "SECURITYTOKEN",
    "RDS",
    "SF_TOKEN_URL",
    "SF_INSTANCE_URL",
    "SF_API_VERSION",
    "CORP_DOMAIN",
    "PHOTO_URL_PREFIX",
    "LOGLEVEL",
    "PROXY",
];

/// Process-wide settings for one job invocation.
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "clientid")]
    pub client_id: String,
    #[serde(rename = "clientsecret")]
    pub client_secret: String,
    pub username: String,
    pub password: String,
    #[serde(rename = "securitytoken")]
    pub security_token: String,

    /// sqlx connection URL of the legacy photo-path store (photo sync only).
    #[serde(default)]
    pub rds: Option<String>,

    #[serde(rename = "sf_token_url")]
    pub token_url: Url,
    #[serde(rename = "sf_instance_url")]
    pub instance_url: Url,
    #[serde(rename = "sf_api_version")]
    pub api_version: String,
    pub corp_domain: String,
    pub photo_url_prefix: String,
    pub loglevel: String,
    #[serde(default)]
    pub proxy: Option<Url>,
}

impl Config {
    /// Load from the process environment. Call `dotenvy::dotenv()` first if a
    /// `.env` file should be honoured.
    pub fn load() -> Result<Self, SyncError> {
        Self::from_figment(Self::figment())
    }

    /// Base figment populated from the known environment variables.
    ///
    /// Values go in as plain strings: figment's `Env` provider would parse an
    /// all-digit password or security token into a number.
    pub fn figment() -> Figment {
        let env: BTreeMap<String, String> = ENV_KEYS
            .iter()
            .filter_map(|key| {
                std::env::var(key)
                    .ok()
                    .map(|value| (key.to_ascii_lowercase(), value))
            })
            .collect();
        Figment::new().merge(Serialized::defaults(env))
    }

    /// Extract settings, filling unset optional keys with their defaults.
    pub fn from_figment(figment: Figment) -> Result<Self, SyncError> {
        let cfg: Config = figment
            .join(Serialized::defaults(defaults()))
            .extract()
            .map_err(Box::new)?;
        Ok(cfg)
    }

    /// Connection URL of the photo-path store, required by the photo sync job.
    pub fn rds(&self) -> Result<&str, SyncError> {
        self.rds
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(SyncError::MissingSetting("RDS"))
    }

    /// Query endpoint for the configured API version.
    pub fn query_url(&self) -> Result<Url, SyncError> {
        let path = format!("/services/data/{}/query/", self.api_version);
        Ok(self.instance_url.join(&path)?)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("security_token", &"<redacted>")
            .field("rds", &self.rds.as_ref().map(|_| "<redacted>"))
            .field("token_url", &self.token_url.as_str())
            .field("instance_url", &self.instance_url.as_str())
            .field("api_version", &self.api_version)
            .field("corp_domain", &self.corp_domain)
            .field("photo_url_prefix", &self.photo_url_prefix)
            .field("loglevel", &self.loglevel)
            .field("proxy", &self.proxy.as_ref().map(Url::as_str))
            .finish()
    }
}

fn defaults() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("sf_token_url", DEFAULT_TOKEN_URL),
        ("sf_instance_url", DEFAULT_INSTANCE_URL),
        ("sf_api_version", DEFAULT_API_VERSION),
        ("corp_domain", DEFAULT_CORP_DOMAIN),
        ("photo_url_prefix", DEFAULT_PHOTO_URL_PREFIX),
        ("loglevel", "info"),
    ])
}
