use outline_engine::{RunSummary, UpdateOutcome};

pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let mode = if summary.dry_run { " (dry run)" } else { "" };
    out.push_str(&format!("Renumbered page {}{mode}\n", summary.page_id));
    out.push_str(&format!(
        "  chapters: {} ({} with synced block, {} without)\n",
        summary.chapters, summary.sections, summary.chapters_without_mirror
    ));
    if summary.unnumbered > 0 {
        out.push_str(&format!(
            "  level-3 headings before any level-2 heading: {}\n",
            summary.unnumbered
        ));
    }
    out.push_str(&format!(
        "  changed: {}  unchanged: {}\n",
        summary.planned, summary.unchanged
    ));
    if !summary.dry_run {
        out.push_str(&format!(
            "  updated: {}  conflict-exhausted: {}  failed: {}\n",
            summary.updated, summary.conflict_exhausted, summary.failed
        ));
    }

    for change in &summary.changes {
        let status = match &change.outcome {
            None => "pending".to_string(),
            Some(UpdateOutcome::Updated { .. }) => "ok".to_string(),
            Some(UpdateOutcome::ConflictExhausted { attempts }) => {
                format!("conflict after {attempts} attempts")
            }
            Some(UpdateOutcome::Fatal { detail, .. }) => format!("failed: {detail}"),
        };
        out.push_str(&format!(
            "  [H{}] '{}' -> '{}' ({status})\n",
            change.job.level, change.job.old, change.job.new
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use outline_engine::{HeadingLevel, UpdateJob, UpdateReport};

    fn job(old: &str, new: &str) -> UpdateJob {
        UpdateJob {
            block_id: "b".to_string(),
            level: HeadingLevel::Two,
            old: old.to_string(),
            new: new.to_string(),
        }
    }

    #[test]
    fn renders_outcomes() {
        let mut summary = RunSummary::new("page-1");
        summary.chapters = 2;
        summary.sections = 1;
        summary.chapters_without_mirror = 1;
        summary.add_report(UpdateReport {
            job: job("3.1 Old", "1.1 Old"),
            outcome: UpdateOutcome::Updated { attempts: 1 },
        });
        summary.add_report(UpdateReport {
            job: job("Plan", "1.2 Plan"),
            outcome: UpdateOutcome::ConflictExhausted { attempts: 5 },
        });

        let text = render_summary(&summary);

        assert!(text.contains("Renumbered page page-1\n"));
        assert!(text.contains("chapters: 2 (1 with synced block, 1 without)"));
        assert!(text.contains("updated: 1  conflict-exhausted: 1  failed: 0"));
        assert!(text.contains("[H2] '3.1 Old' -> '1.1 Old' (ok)"));
        assert!(text.contains("(conflict after 5 attempts)"));
    }

    #[test]
    fn dry_run_lists_pending_changes() {
        let mut summary = RunSummary::new("p");
        summary.dry_run = true;
        summary.add_pending(job("Scope", "2.1 Scope"));

        let text = render_summary(&summary);

        assert!(text.contains("(dry run)"));
        assert!(text.contains("'Scope' -> '2.1 Scope' (pending)"));
        assert!(!text.contains("updated:"));
    }
}
