//! Legacy photo-path store.
//!
//! Layout:
//! - `photo_paths.rs`: single-row lookup of an upload URL by email key
//! - `schema.rs`: DDL of the upload table (used to seed local stores)

pub mod photo_paths;
pub mod schema;

pub use photo_paths::{PhotoPath, PhotoPathLookup};
pub use schema::UPLOADS_INIT;
