pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod jobs;
pub mod salesforce;
pub mod service;
pub mod telemetry;
pub mod types;

pub use config::Config;
pub use error::{ErrorKind, SyncError};
pub use jobs::JobReport;
