use super::client::SalesforceClient;
use crate::error::SyncError;
use crate::types::{ContactPatch, ContactRecord, SessionToken};

use reqwest::StatusCode;
use tracing::warn;

impl SalesforceClient {
    /// PATCH one field of a contact.
    ///
    /// Success is exactly `204 No Content` with an empty body. Anything else
    /// is logged and returned as a recoverable `UpdateRejected`, as is a
    /// record without a self URL; failing to
    /// complete the exchange at all is fatal.
    pub async fn update_contact(
        &self,
        token: &SessionToken,
        record: &ContactRecord,
        patch: &ContactPatch,
    ) -> Result<(), SyncError> {
        if record.url().trim().is_empty() {
            warn!(name = record.display_name(), "contact has no self URL; update skipped");
            return Err(SyncError::MissingSelfUrl {
                name: record.display_name().to_string(),
            });
        }
        let url = self.record_url(record.url())?;
        let resp = self
            .http
            .patch(url.clone())
            .bearer_auth(token.secret())
            .json(patch)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if status == StatusCode::NO_CONTENT && body.is_empty() {
            return Ok(());
        }

        warn!(
            name = record.display_name(),
            url = %url,
            %status,
            body = %body,
            "contact update rejected"
        );
        Err(SyncError::UpdateRejected {
            name: record.display_name().to_string(),
            status,
        })
    }
}
