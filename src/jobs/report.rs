use chrono::{DateTime, Utc};
use tracing::info;

/// Counters collected during one job run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub job: &'static str,
    pub listed: usize,
    /// Records not eligible for an update (unusable name or email).
    pub skipped: usize,
    pub updated: usize,
    pub rejected: usize,
    pub already_present: usize,
    pub no_photo_path: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl JobReport {
    pub fn start(job: &'static str) -> Self {
        Self {
            job,
            listed: 0,
            skipped: 0,
            updated: 0,
            rejected: 0,
            already_present: 0,
            no_photo_path: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(mut self) -> Self {
        let finished_at = Utc::now();
        self.finished_at = Some(finished_at);
        info!(
            job = self.job,
            listed = self.listed,
            updated = self.updated,
            rejected = self.rejected,
            skipped = self.skipped,
            already_present = self.already_present,
            no_photo_path = self.no_photo_path,
            elapsed_ms = (finished_at - self.started_at).num_milliseconds(),
            "job finished"
        );
        self
    }
}
