use super::client::{SalesforceClient, soql_literal};
use crate::error::SyncError;
use crate::types::{ContactRecord, PhotoRecord, SessionToken};
use std::collections::HashSet;
use tracing::info;

/// Active employees who have not left the company.
pub const ACTIVE_EMPLOYEES_SOQL: &str = "SELECT Email, Name FROM Contact \
     WHERE Type_de_contact__c = 'Salarié' AND A_quitte_la_societe__c = False";

/// Active employees whose recruitment is complete.
pub const RECRUITED_EMPLOYEES_SOQL: &str = "SELECT Email, Name FROM Contact \
     WHERE Type_de_contact__c = 'Salarié' AND A_quitte_la_societe__c = False \
     AND Etapes_r_alis_es__c = 'Recrute'";

/// Active contacts whose email is not on the corporate domain.
pub async fn list_without_corporate_email(
    client: &SalesforceClient,
    token: &SessionToken,
    corp_domain: &str,
) -> Result<Vec<ContactRecord>, SyncError> {
    let page = client
        .query::<ContactRecord>(token, ACTIVE_EMPLOYEES_SOQL)
        .await?;
    Ok(without_corporate_email(page.records, corp_domain))
}

/// Keep records outside `corp_domain`, one per email, in listing order.
/// Records without an email are all kept.
pub fn without_corporate_email(records: Vec<ContactRecord>, corp_domain: &str) -> Vec<ContactRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| !r.email().contains(corp_domain))
        .filter(|r| {
            r.email
                .as_deref()
                .is_none_or(|email| seen.insert(email.to_string()))
        })
        .collect()
}

/// Recruited employees eligible for photo sync.
pub async fn list_employees(
    client: &SalesforceClient,
    token: &SessionToken,
) -> Result<Vec<ContactRecord>, SyncError> {
    let page = client
        .query::<ContactRecord>(token, RECRUITED_EMPLOYEES_SOQL)
        .await?;
    Ok(page.records)
}

/// Whether the contact(s) registered under `email` already carry a photo.
pub async fn has_photo(
    client: &SalesforceClient,
    token: &SessionToken,
    email: &str,
) -> Result<bool, SyncError> {
    let soql = format!(
        "SELECT Photos2__c FROM Contact WHERE Email = {}",
        soql_literal(email)
    );
    let page = client.query::<PhotoRecord>(token, &soql).await?;
    let present = photo_present(&page.records);
    if present {
        let user = email.split('@').next().unwrap_or(email);
        info!(user, "contact already has a profile picture");
    }
    Ok(present)
}

/// True only when there is at least one record and none lacks a photo.
pub fn photo_present(records: &[PhotoRecord]) -> bool {
    !records.is_empty() && records.iter().all(PhotoRecord::has_photo)
}
