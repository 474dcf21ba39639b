use crate::error::SyncError;
use sqlx::{AnyConnection, Connection};
use tracing::debug;

const PHOTO_PATH_QUERY: &str = "SELECT guid FROM badges_posts WHERE guid LIKE ?";

/// Outcome of a lookup that reached the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoPath {
    Found(String),
    NoRows,
}

/// Resolves the uploaded photo URL of an employee from the legacy store.
///
/// One connection is opened and closed per lookup.
pub struct PhotoPathLookup {
    database_url: String,
    url_prefix: String,
}

impl PhotoPathLookup {
    pub fn new(database_url: impl Into<String>, url_prefix: impl Into<String>) -> Self {
        sqlx::any::install_default_drivers();
        Self {
            database_url: database_url.into(),
            url_prefix: url_prefix.into(),
        }
    }

    /// LIKE pattern: fixed URL prefix, the email key, then anything.
    pub fn pattern(&self, email_key: &str) -> String {
        format!("{}{}%", self.url_prefix, email_key)
    }

    pub async fn find(&self, email_key: &str) -> Result<PhotoPath, SyncError> {
        let pattern = self.pattern(email_key);
        let mut conn = AnyConnection::connect(&self.database_url).await?;
        let row = sqlx::query_scalar::<_, String>(PHOTO_PATH_QUERY)
            .bind(pattern.clone())
            .fetch_optional(&mut conn)
            .await;
        let closed = conn.close().await;
        let row = row?;
        closed?;

        debug!(pattern = %pattern, found = row.is_some(), "photo path lookup");
        Ok(match row {
            Some(path) => PhotoPath::Found(path),
            None => PhotoPath::NoRows,
        })
    }
}
