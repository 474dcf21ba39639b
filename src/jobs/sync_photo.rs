use super::report::JobReport;
use crate::config::Config;
use crate::db::{PhotoPath, PhotoPathLookup};
use crate::error::SyncError;
use crate::http::build_client;
use crate::salesforce::{AuthClient, SalesforceClient, contacts};
use crate::service::format_email_key;
use crate::types::ContactPatch;
use tracing::{debug, error, info};

/// Copy each recruited employee's legacy photo URL into the CRM photo field
/// when that field is empty.
pub async fn run(cfg: &Config) -> Result<JobReport, SyncError> {
    let lookup = PhotoPathLookup::new(cfg.rds()?, cfg.photo_url_prefix.clone());
    let http = build_client(cfg)?;
    let token = AuthClient::new(http.clone(), cfg).authenticate().await?;
    let crm = SalesforceClient::new(http, cfg)?;

    let mut report = JobReport::start("sync-photo");

    let employees = match contacts::list_employees(&crm, &token).await {
        Ok(records) => records,
        Err(e) if !e.is_fatal() => {
            error!(error = %e, "listing employees failed; nothing to process");
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    report.listed = employees.len();

    for employee in &employees {
        let email = employee.email();
        if email.is_empty() {
            debug!(name = employee.display_name(), "no email on record");
            report.skipped += 1;
            continue;
        }

        let present = match contacts::has_photo(&crm, &token, email).await {
            Ok(present) => present,
            Err(e) if !e.is_fatal() => {
                error!(error = %e, name = employee.display_name(), "photo check failed");
                false
            }
            Err(e) => return Err(e),
        };
        if present {
            report.already_present += 1;
            continue;
        }

        let path = match lookup.find(&format_email_key(email)).await? {
            PhotoPath::Found(path) => path,
            PhotoPath::NoRows => {
                report.no_photo_path += 1;
                continue;
            }
        };

        let patch = ContactPatch::Photo(photo_html(&path, employee.display_name()));
        match crm.update_contact(&token, employee, &patch).await {
            Ok(()) => {
                info!(name = employee.display_name(), "profile photo updated");
                report.updated += 1;
            }
            Err(e) if !e.is_fatal() => report.rejected += 1,
            Err(e) => return Err(e),
        }
    }

    Ok(report.finish())
}

/// Fixed-size `<img>` snippet stored in the CRM photo field.
pub fn photo_html(path: &str, name: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" style="height:100px; width:100px;" border="0"/>"#,
        escape_attr(path),
        escape_attr(name)
    )
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
