use super::report::JobReport;
use crate::config::Config;
use crate::error::SyncError;
use crate::http::build_client;
use crate::salesforce::{AuthClient, SalesforceClient, contacts};
use crate::service::corporate_email;
use crate::types::ContactPatch;
use tracing::error;

/// Rewrite the CRM email of every active employee outside the corporate
/// domain to `first.last@<corp_domain>`.
pub async fn run(cfg: &Config) -> Result<JobReport, SyncError> {
    let http = build_client(cfg)?;
    let token = AuthClient::new(http.clone(), cfg).authenticate().await?;
    let crm = SalesforceClient::new(http, cfg)?;

    let mut report = JobReport::start("change-mail");

    let listed = contacts::list_without_corporate_email(&crm, &token, &cfg.corp_domain).await;
    let contacts = match listed {
        Ok(records) => records,
        Err(e) if !e.is_fatal() => {
            error!(error = %e, "listing contacts failed; nothing to process");
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    report.listed = contacts.len();

    for contact in &contacts {
        let Some(email) = corporate_email(contact.display_name(), &cfg.corp_domain) else {
            report.skipped += 1;
            continue;
        };
        match crm
            .update_contact(&token, contact, &ContactPatch::Email(email))
            .await
        {
            Ok(()) => report.updated += 1,
            Err(e) if !e.is_fatal() => report.rejected += 1,
            Err(e) => return Err(e),
        }
    }

    Ok(report.finish())
}
