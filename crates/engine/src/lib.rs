//! # Outline Engine
//!
//! Keeps chapter / subchapter / subsubchapter numbers of a document consistent.
//!
//! ## Pipeline
//!
//! ```text
//! Primary container
//!     │
//!     ├──> Fetcher (paginated, document order)
//!     │      └─> Blocks
//!     │
//!     ├──> Extractor ──> level-1 headings ──> Renumber (1..N)
//!     │
//!     ├──> Mirror locator (first synced reference after each chapter)
//!     │      └─> Fetcher + Extractor per mirrored container
//!     │             └─> Renumber levels 2/3 (C.s, C.s.ss)
//!     │
//!     ├──> Diff (exact label comparison)
//!     │
//!     └──> Dispatcher (concurrent per batch, linear conflict backoff)
//!            └─> RunSummary
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use outline_engine::{run, OutlineStore, PageTarget, RunOptions};
//!
//! async fn renumber(store: Arc<dyn OutlineStore>) -> outline_engine::Result<()> {
//!     let target = PageTarget::Title("Research log".to_string());
//!     let summary = run(store, &target, &RunOptions::default()).await?;
//!     println!("{} updated, {} unchanged", summary.updated, summary.unchanged);
//!     Ok(())
//! }
//! ```

mod diff;
mod dispatch;
mod error;
mod extractor;
mod fetcher;
mod mirror;
mod pipeline;
mod renumber;
mod store;
mod summary;
mod types;

pub use diff::{diff, LabelChange, LabelDiff};
pub use dispatch::{
    apply_update, dispatch_batch, RetryPolicy, UpdateJob, UpdateOutcome, UpdateReport,
    DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS,
};
pub use error::{OutlineError, Result};
pub use extractor::{extract, Labels, Outline};
pub use fetcher::fetch_all;
pub use mirror::{locate_mirrors, MirrorScan};
pub use pipeline::{
    apply_batches, run, ChapterSection, PageTarget, RenumberPlan, RunOptions, UpdateBatch,
};
pub use renumber::{
    chapter_numbers, renumber_level1, renumber_level23, strip_number_prefix, SectionLabels,
};
pub use store::OutlineStore;
#[cfg(any(test, feature = "test-support"))]
pub use store::{MemoryStore, UpdateCall};
pub use summary::{ChangeRecord, RunSummary};
pub use types::{Block, BlockKind, ChildPage, HeadingLevel, UpdateResponse};
