use crate::error::{OutlineError, Result};
use crate::types::{Block, HeadingLevel};
use std::collections::BTreeMap;

/// Position -> heading text, ordered by position
pub type Labels = BTreeMap<usize, String>;

/// Headings of one container keyed by their local position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub level1: Labels,
    pub level2: Labels,
    pub level3: Labels,
}

impl Outline {
    pub fn level(&self, level: HeadingLevel) -> &Labels {
        match level {
            HeadingLevel::One => &self.level1,
            HeadingLevel::Two => &self.level2,
            HeadingLevel::Three => &self.level3,
        }
    }

    fn level_mut(&mut self, level: HeadingLevel) -> &mut Labels {
        match level {
            HeadingLevel::One => &mut self.level1,
            HeadingLevel::Two => &mut self.level2,
            HeadingLevel::Three => &mut self.level3,
        }
    }

    pub fn heading_count(&self) -> usize {
        self.level1.len() + self.level2.len() + self.level3.len()
    }
}

/// Classify headings of `blocks` by level in a single pass.
///
/// A heading without text cannot be renumbered and aborts the run.
pub fn extract(blocks: &[Block]) -> Result<Outline> {
    let mut outline = Outline::default();

    for (position, block) in blocks.iter().enumerate() {
        let Some(level) = block.heading_level() else {
            continue;
        };
        let text = block.text.clone().ok_or_else(|| OutlineError::MissingText {
            block_id: block.id.clone(),
        })?;
        outline.level_mut(level).insert(position, text);
    }

    log::debug!(
        "Extracted {} level-1, {} level-2, {} level-3 headings",
        outline.level1.len(),
        outline.level2.len(),
        outline.level3.len()
    );
    Ok(outline)
}
