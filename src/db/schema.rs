//! DDL mirroring the columns of the upload table that the lookup reads.

/// Upload table:
/// - `ID` primary key
/// - `guid` absolute URL of the uploaded file, embedding the email key
pub const UPLOADS_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS badges_posts (
    ID INTEGER PRIMARY KEY,
    guid VARCHAR(255) NOT NULL DEFAULT ''
)
"#;
