pub mod email_key;
pub mod name_normalizer;

pub use email_key::format_email_key;
pub use name_normalizer::{corporate_email, strip_accents};
