use crate::config::Config;
use crate::error::SyncError;
use crate::types::SessionToken;

use oauth2::{ClientId, ClientSecret, ResourceOwnerPassword, ResourceOwnerUsername};
use reqwest::header::ACCEPT;
use tracing::{error, info};
use url::Url;

/// Exchanges the integration user's credentials for a bearer token using the
/// OAuth password grant.
pub struct AuthClient {
    http: reqwest::Client,
    token_url: Url,
    client_id: ClientId,
    client_secret: ClientSecret,
    username: ResourceOwnerUsername,
    /// Account password with the security token appended.
    password: ResourceOwnerPassword,
}

impl AuthClient {
    pub fn new(http: reqwest::Client, cfg: &Config) -> Self {
        Self {
            http,
            token_url: cfg.token_url.clone(),
            client_id: ClientId::new(cfg.client_id.clone()),
            client_secret: ClientSecret::new(cfg.client_secret.clone()),
            username: ResourceOwnerUsername::new(cfg.username.clone()),
            password: ResourceOwnerPassword::new(format!(
                "{}{}",
                cfg.password, cfg.security_token
            )),
        }
    }

    /// Request a fresh token. Any response mentioning `error` is a rejection.
    pub async fn authenticate(&self) -> Result<SessionToken, SyncError> {
        let resp = self
            .http
            .post(self.token_url.clone())
            .header(ACCEPT, "application/json")
            .form(&[
                ("grant_type", "password"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.secret().as_str()),
                ("username", self.username.as_str()),
                ("password", self.password.secret().as_str()),
            ])
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if body.contains("error") {
            error!(%status, body = %body, "token request rejected");
            return Err(SyncError::AuthRejected(body));
        }

        let token: SessionToken = serde_json::from_str(&body).map_err(SyncError::TokenDecode)?;
        info!(
            instance_url = token.instance_url.as_deref().unwrap_or("<none>"),
            issued_at = ?token.issued_at_utc(),
            "access token issued"
        );
        Ok(token)
    }
}
