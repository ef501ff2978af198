use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use outline_engine::{run, MirrorScan, PageTarget, RetryPolicy, RunOptions, DEFAULT_MAX_ATTEMPTS};
use outline_notion::{NotionConfig, NotionStore};
use std::sync::Arc;
use std::time::Duration;

mod report;

#[derive(Parser)]
#[command(name = "renumber-outline")]
#[command(
    about = "Renumber chapter headings of a Notion page and its synced blocks",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Title of the page to renumber (first search result is used)
    #[arg(required_unless_present = "page_id", conflicts_with = "page_id")]
    title: Option<String>,

    /// Renumber this page id instead of searching by title
    #[arg(long)]
    page_id: Option<String>,

    /// Compute and print changes without writing them
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Update attempts per heading while the API reports conflicts
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Delay before the first conflict retry, in ms; grows linearly per attempt
    #[arg(long, default_value_t = 2_000)]
    retry_delay_ms: u64,

    /// Only look for a chapter's synced block before the next chapter heading
    #[arg(long)]
    bound_mirror_scan: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn target(&self) -> PageTarget {
        match (&self.page_id, &self.title) {
            (Some(id), _) => PageTarget::Id(id.clone()),
            (None, Some(title)) => PageTarget::Title(title.clone()),
            // clap enforces one of them
            (None, None) => unreachable!("either a title or --page-id is required"),
        }
    }

    fn options(&self) -> RunOptions {
        RunOptions {
            mirror_scan: if self.bound_mirror_scan {
                MirrorScan::ChapterBounded
            } else {
                MirrorScan::Unbounded
            },
            retry: RetryPolicy::new(
                self.max_attempts,
                Duration::from_millis(self.retry_delay_ms),
            ),
            dry_run: self.dry_run,
        }
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    // stdout is reserved for JSON in --json mode
    if cli.quiet || cli.json {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    if !cli.verbose {
        builder.filter_module("reqwest", log::LevelFilter::Warn);
        builder.filter_module("hyper", log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = NotionConfig::from_env().context("Failed to load Notion configuration")?;
    let store = NotionStore::new(config).context("Failed to build Notion client")?;

    let summary = run(Arc::new(store), &cli.target(), &cli.options())
        .await
        .context("Renumbering aborted")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", report::render_summary(&summary));
    }

    if !summary.is_complete() {
        anyhow::bail!(
            "{} heading(s) could not be updated ({} conflict-exhausted, {} failed); rerun to retry",
            summary.conflict_exhausted + summary.failed,
            summary.conflict_exhausted,
            summary.failed
        );
    }
    Ok(())
}
