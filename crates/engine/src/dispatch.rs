use crate::store::OutlineStore;
use crate::types::{HeadingLevel, UpdateResponse};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(2);

/// Conflict retry budget; the wait before attempt `n + 1` is `base_delay * n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BASE_DELAY)
    }
}

/// A label to write to one heading block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateJob {
    pub block_id: String,
    pub level: HeadingLevel,
    pub old: String,
    pub new: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateOutcome {
    Updated { attempts: u32 },
    ConflictExhausted { attempts: u32 },
    Fatal { attempts: u32, detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    #[serde(flatten)]
    pub job: UpdateJob,
    pub outcome: UpdateOutcome,
}

/// Write one label, retrying on conflicts within the policy's budget
pub async fn apply_update<S>(store: &S, job: &UpdateJob, policy: &RetryPolicy) -> UpdateOutcome
where
    S: OutlineStore + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match store.update_heading(&job.block_id, job.level, &job.new).await {
            UpdateResponse::Ok => {
                log::info!(
                    "Heading {}: '{}' has been changed to '{}'",
                    job.level,
                    job.old,
                    job.new
                );
                return UpdateOutcome::Updated { attempts: attempt };
            }
            UpdateResponse::Conflict => {
                if attempt == max_attempts {
                    break;
                }
                let delay = policy.delay_after(attempt);
                log::warn!(
                    "Conflict updating block {}; retrying {}/{} in {:?}",
                    job.block_id,
                    attempt + 1,
                    max_attempts,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            UpdateResponse::Error(detail) => {
                log::error!("Failed to update block {}: {detail}", job.block_id);
                return UpdateOutcome::Fatal {
                    attempts: attempt,
                    detail,
                };
            }
        }
    }

    log::error!(
        "Failed to update block '{}' after {max_attempts} attempts (conflicts)",
        job.block_id
    );
    UpdateOutcome::ConflictExhausted {
        attempts: max_attempts,
    }
}

/// Run every job of a batch concurrently and wait for all of them.
///
/// One job's failure never cancels the others.
pub async fn dispatch_batch<S>(
    store: Arc<S>,
    jobs: Vec<UpdateJob>,
    policy: RetryPolicy,
) -> Vec<UpdateReport>
where
    S: OutlineStore + ?Sized + 'static,
{
    let handles: Vec<_> = jobs
        .into_iter()
        .map(|job| {
            let store = Arc::clone(&store);
            let task_job = job.clone();
            let handle =
                tokio::spawn(async move { apply_update(&*store, &task_job, &policy).await });
            (job, handle)
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    for (job, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("Update task for block {} failed: {err}", job.block_id);
                UpdateOutcome::Fatal {
                    attempts: 0,
                    detail: format!("update task failed: {err}"),
                }
            }
        };
        reports.push(UpdateReport { job, outcome });
    }
    reports
}
