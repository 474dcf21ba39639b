pub mod contact;
pub mod token;

pub use contact::{ContactPatch, ContactRecord, PhotoRecord, QueryEnvelope, RecordAttributes};
pub use token::SessionToken;
