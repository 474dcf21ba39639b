use reqwest::StatusCode;
use thiserror::Error as ThisError;

/// Whether an error must stop the whole batch or only the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fatal,
    Recoverable,
}

#[derive(Debug, ThisError)]
pub enum SyncError {
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("missing required setting `{0}`")]
    MissingSetting(&'static str),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("token endpoint rejected credentials: {0}")]
    AuthRejected(String),

    #[error("undecodable token response: {0}")]
    TokenDecode(serde_json::Error),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("CRM query failed to complete: {0}")]
    QueryTransport(reqwest::Error),

    #[error("CRM query returned status {0}")]
    QueryStatus(StatusCode),

    #[error("CRM query returned malformed JSON: {0}")]
    QueryDecode(serde_json::Error),

    #[error("contact {name} has no self URL")]
    MissingSelfUrl { name: String },

    #[error("update of {name} rejected with status {status}")]
    UpdateRejected { name: String, status: StatusCode },
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::QueryTransport(_)
            | SyncError::QueryStatus(_)
            | SyncError::QueryDecode(_)
            | SyncError::MissingSelfUrl { .. }
            | SyncError::UpdateRejected { .. } => ErrorKind::Recoverable,
            SyncError::Config(_)
            | SyncError::MissingSetting(_)
            | SyncError::UrlParse(_)
            | SyncError::AuthRejected(_)
            | SyncError::TokenDecode(_)
            | SyncError::Transport(_)
            | SyncError::Database(_) => ErrorKind::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Fatal
    }
}
