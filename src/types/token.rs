use chrono::{DateTime, Utc};
use oauth2::AccessToken;
use serde::Deserialize;

/// Token issued by the identity provider for one job run.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionToken {
    pub access_token: AccessToken,
    #[serde(default)]
    pub instance_url: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Milliseconds since the Unix epoch, as a string.
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

impl SessionToken {
    pub fn secret(&self) -> &str {
        self.access_token.secret()
    }

    pub fn issued_at_utc(&self) -> Option<DateTime<Utc>> {
        let millis: i64 = self.issued_at.as_deref()?.parse().ok()?;
        DateTime::from_timestamp_millis(millis)
    }
}
