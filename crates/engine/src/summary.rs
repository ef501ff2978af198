use crate::dispatch::{UpdateJob, UpdateOutcome, UpdateReport};
use serde::Serialize;

/// End-of-run statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub page_id: String,

    /// Level-1 headings in the primary container
    pub chapters: usize,

    /// Chapters whose mirrored container was renumbered
    pub sections: usize,

    /// Chapters skipped because no mirror reference follows them
    pub chapters_without_mirror: usize,

    /// Level-3 headings left alone for lack of a preceding level-2 heading
    pub unnumbered: usize,

    /// Labels that differ from the computed ones
    pub planned: usize,

    pub unchanged: usize,
    pub updated: usize,
    pub conflict_exhausted: usize,
    pub failed: usize,

    pub dry_run: bool,

    /// Planned jobs (dry run) or dispatched results
    pub changes: Vec<ChangeRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeRecord {
    #[serde(flatten)]
    pub job: UpdateJob,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<UpdateOutcome>,
}

impl RunSummary {
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            ..Self::default()
        }
    }

    pub fn add_pending(&mut self, job: UpdateJob) {
        self.planned += 1;
        self.changes.push(ChangeRecord { job, outcome: None });
    }

    pub fn add_report(&mut self, report: UpdateReport) {
        self.planned += 1;
        match report.outcome {
            UpdateOutcome::Updated { .. } => self.updated += 1,
            UpdateOutcome::ConflictExhausted { .. } => self.conflict_exhausted += 1,
            UpdateOutcome::Fatal { .. } => self.failed += 1,
        }
        self.changes.push(ChangeRecord {
            job: report.job,
            outcome: Some(report.outcome),
        });
    }

    /// True when every planned change landed
    pub fn is_complete(&self) -> bool {
        self.dry_run || (self.conflict_exhausted == 0 && self.failed == 0)
    }
}
