use crate::config::Config;
use crate::error::SyncError;
use crate::types::{QueryEnvelope, SessionToken};

use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Thin REST client bound to one CRM instance.
#[derive(Clone)]
pub struct SalesforceClient {
    pub(crate) http: reqwest::Client,
    instance_url: Url,
    query_url: Url,
}

impl SalesforceClient {
    pub fn new(http: reqwest::Client, cfg: &Config) -> Result<Self, SyncError> {
        Ok(Self {
            http,
            instance_url: cfg.instance_url.clone(),
            query_url: cfg.query_url()?,
        })
    }

    /// Run a SOQL query and decode the first page of results.
    ///
    /// Every failure here is reported as a recoverable query error.
    pub async fn query<T>(
        &self,
        token: &SessionToken,
        soql: &str,
    ) -> Result<QueryEnvelope<T>, SyncError>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .http
            .get(self.query_url.clone())
            .query(&[("q", soql)])
            .bearer_auth(token.secret())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(SyncError::QueryTransport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::QueryStatus(status));
        }

        let body = resp.bytes().await.map_err(SyncError::QueryTransport)?;
        let page: QueryEnvelope<T> =
            serde_json::from_slice(&body).map_err(SyncError::QueryDecode)?;

        debug!(
            total_size = page.total_size,
            fetched = page.records.len(),
            "query page received"
        );
        if !page.done {
            warn!(
                total_size = page.total_size,
                fetched = page.records.len(),
                next = page.next_records_url.as_deref().unwrap_or("<none>"),
                "query has more pages; only the first one is processed"
            );
        }
        Ok(page)
    }

    /// Resolve a record's self URL against the instance.
    pub fn record_url(&self, self_url: &str) -> Result<Url, SyncError> {
        Ok(self.instance_url.join(self_url)?)
    }
}

/// Quote a value as a SOQL string literal.
pub fn soql_literal(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}
