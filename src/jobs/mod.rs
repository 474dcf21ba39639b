//! Batch drivers. Each run authenticates once and walks the listed contacts
//! sequentially; fatal errors abort the run, recoverable ones skip a step.

pub mod change_mail;
pub mod report;
pub mod sync_photo;

pub use report::JobReport;
