use serde::{Deserialize, Serialize};

/// Envelope returned by the CRM query endpoint.
///
/// Only the first page is ever consumed; `done` and `next_records_url` are
/// decoded for logging.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryEnvelope<T> {
    #[serde(default)]
    pub total_size: u64,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub next_records_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecordAttributes {
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Self URL of the record, relative to the instance.
    #[serde(default)]
    pub url: String,
}

/// Contact projection with `SELECT Email, Name`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContactRecord {
    pub attributes: RecordAttributes,
    #[serde(rename = "Email", default)]
    pub email: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

impl ContactRecord {
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn url(&self) -> &str {
        &self.attributes.url
    }
}

/// Contact projection with `SELECT Photos2__c`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PhotoRecord {
    #[serde(default)]
    pub attributes: Option<RecordAttributes>,
    #[serde(rename = "Photos2__c", default)]
    pub photo: Option<String>,
}

impl PhotoRecord {
    pub fn has_photo(&self) -> bool {
        self.photo.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Single-field partial update sent with PATCH.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum ContactPatch {
    #[serde(rename = "Email")]
    Email(String),
    #[serde(rename = "Photos2__c")]
    Photo(String),
}
