use crate::diff::diff;
use crate::dispatch::{dispatch_batch, RetryPolicy, UpdateJob};
use crate::error::Result;
use crate::extractor::{extract, Labels, Outline};
use crate::fetcher::fetch_all;
use crate::mirror::{locate_mirrors, MirrorScan};
use crate::renumber::{chapter_numbers, renumber_level1, renumber_level23, SectionLabels};
use crate::store::OutlineStore;
use crate::summary::RunSummary;
use crate::types::{Block, HeadingLevel};
use std::collections::HashSet;
use std::sync::Arc;

/// Which document to renumber
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTarget {
    /// Search by title, first result
    Title(String),
    Id(String),
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub mirror_scan: MirrorScan,
    pub retry: RetryPolicy,

    /// Compute and report changes without writing them
    pub dry_run: bool,
}

/// A chapter's mirrored container and its recomputed subheadings
#[derive(Debug, Clone)]
pub struct ChapterSection {
    /// Position of the owning level-1 heading in the primary container
    pub heading_position: usize,
    pub chapter: u32,
    pub container_id: String,
    pub blocks: Vec<Block>,
    pub outline: Outline,
    pub labels: SectionLabels,
}

/// Labels to write for one level of one container
#[derive(Debug, Clone)]
pub struct UpdateBatch {
    pub level: HeadingLevel,
    pub container_id: String,
    pub jobs: Vec<UpdateJob>,
    pub unchanged: usize,
}

/// Everything derived from the live document during one run
#[derive(Debug, Clone)]
pub struct RenumberPlan {
    pub page_id: String,
    pub blocks: Vec<Block>,
    pub outline: Outline,
    pub level1: Labels,
    pub sections: Vec<ChapterSection>,
    pub chapters_without_mirror: usize,
}

impl RenumberPlan {
    /// Fetch the primary container and every mirrored container, then number them
    pub async fn build<S>(store: &S, page_id: &str, scan: MirrorScan) -> Result<Self>
    where
        S: OutlineStore + ?Sized,
    {
        let blocks = fetch_all(store, page_id).await?;
        let outline = extract(&blocks)?;
        let level1 = renumber_level1(&outline.level1);
        let chapters = chapter_numbers(&outline.level1);

        let mirrors = locate_mirrors(outline.level1.keys(), &blocks, scan);

        // A container is numbered under the first chapter that claims it.
        let mut claimed: HashSet<String> = HashSet::new();
        let mut sections = Vec::with_capacity(mirrors.len());
        for (heading_position, container_id) in mirrors {
            let chapter = chapters[&heading_position];
            if !claimed.insert(container_id.clone()) {
                log::warn!(
                    "Chapter {chapter}: container {container_id} is numbered by an earlier chapter; skipping"
                );
                continue;
            }
            let section_blocks = fetch_all(store, &container_id).await?;
            let section_outline = extract(&section_blocks)?;
            let labels =
                renumber_level23(&section_outline.level2, &section_outline.level3, chapter);
            for position in &labels.unnumbered {
                log::warn!(
                    "Chapter {chapter}: level-3 heading at {position} has no level-2 parent; left unnumbered"
                );
            }

            sections.push(ChapterSection {
                heading_position,
                chapter,
                container_id,
                blocks: section_blocks,
                outline: section_outline,
                labels,
            });
        }

        let chapters_without_mirror = outline.level1.len() - sections.len();
        Ok(Self {
            page_id: page_id.to_string(),
            blocks,
            outline,
            level1,
            sections,
            chapters_without_mirror,
        })
    }

    /// Changed labels grouped by level, then container; level 1 first
    pub fn batches(&self) -> Vec<UpdateBatch> {
        let mut batches = vec![job_batch(
            HeadingLevel::One,
            &self.page_id,
            &self.blocks,
            &self.outline.level1,
            &self.level1,
        )];
        for level in [HeadingLevel::Two, HeadingLevel::Three] {
            for section in &self.sections {
                let new = match level {
                    HeadingLevel::Three => &section.labels.level3,
                    _ => &section.labels.level2,
                };
                batches.push(job_batch(
                    level,
                    &section.container_id,
                    &section.blocks,
                    section.outline.level(level),
                    new,
                ));
            }
        }
        batches
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::new(&self.page_id);
        summary.chapters = self.outline.level1.len();
        summary.sections = self.sections.len();
        summary.chapters_without_mirror = self.chapters_without_mirror;
        summary.unnumbered = self
            .sections
            .iter()
            .map(|section| section.labels.unnumbered.len())
            .sum();
        summary
    }
}

fn job_batch(
    level: HeadingLevel,
    container_id: &str,
    blocks: &[Block],
    old: &Labels,
    new: &Labels,
) -> UpdateBatch {
    let diff = diff(old, new);
    if diff.unchanged > 0 {
        log::info!(
            "Heading {level}: {} label(s) in {container_id} have not been changed",
            diff.unchanged
        );
    }

    let jobs = diff
        .changes
        .into_iter()
        .map(|change| UpdateJob {
            block_id: blocks[change.position].id.clone(),
            level,
            old: change.old,
            new: change.new,
        })
        .collect();

    UpdateBatch {
        level,
        container_id: container_id.to_string(),
        jobs,
        unchanged: diff.unchanged,
    }
}

/// Dispatch batches one after another, each batch concurrently
pub async fn apply_batches<S>(
    store: Arc<S>,
    batches: Vec<UpdateBatch>,
    policy: RetryPolicy,
    summary: &mut RunSummary,
) where
    S: OutlineStore + ?Sized + 'static,
{
    for batch in batches {
        summary.unchanged += batch.unchanged;
        if batch.jobs.is_empty() {
            continue;
        }
        log::debug!(
            "Dispatching {} level-{} update(s) for {}",
            batch.jobs.len(),
            batch.level,
            batch.container_id
        );
        for report in dispatch_batch(Arc::clone(&store), batch.jobs, policy).await {
            summary.add_report(report);
        }
    }
}

/// Resolve the page, renumber its outline and write back what changed
pub async fn run<S>(store: Arc<S>, target: &PageTarget, options: &RunOptions) -> Result<RunSummary>
where
    S: OutlineStore + ?Sized + 'static,
{
    let page_id = match target {
        PageTarget::Id(id) => id.clone(),
        PageTarget::Title(title) => {
            let id = store.search(title).await?;
            log::debug!("Page '{title}' resolved to {id}");
            id
        }
    };

    let plan = RenumberPlan::build(&*store, &page_id, options.mirror_scan).await?;
    let batches = plan.batches();
    let mut summary = plan.summary();
    summary.dry_run = options.dry_run;

    if options.dry_run {
        for batch in batches {
            summary.unchanged += batch.unchanged;
            for job in batch.jobs {
                log::info!(
                    "Heading {}: '{}' would be changed to '{}'",
                    job.level,
                    job.old,
                    job.new
                );
                summary.add_pending(job);
            }
        }
        return Ok(summary);
    }

    apply_batches(store, batches, options.retry, &mut summary).await;
    log::info!(
        "Renumbering finished: {} updated, {} unchanged, {} conflict-exhausted, {} failed",
        summary.updated,
        summary.unchanged,
        summary.conflict_exhausted,
        summary.failed
    );
    Ok(summary)
}
