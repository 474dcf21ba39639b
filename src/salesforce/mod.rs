//! CRM access: token exchange, SOQL queries and partial record updates.

pub mod auth;
pub mod client;
pub mod contacts;
pub mod update;

pub use auth::AuthClient;
pub use client::SalesforceClient;
