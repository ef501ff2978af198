use crate::types::Block;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How far forward the locator looks for a chapter's mirror reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorScan {
    /// Up to the end of the container; a later chapter's reference may be
    /// picked up when a chapter has none of its own
    #[default]
    Unbounded,

    /// Stop at the next level-1 heading
    ChapterBounded,
}

/// Map each level-1 heading position to the first mirror reference after it.
///
/// Headings with no reference in range are left out of the result.
pub fn locate_mirrors<'a>(
    level1_positions: impl IntoIterator<Item = &'a usize>,
    blocks: &[Block],
    scan: MirrorScan,
) -> BTreeMap<usize, String> {
    let mut positions: Vec<usize> = level1_positions.into_iter().copied().collect();
    positions.sort_unstable();

    let mut mirrors = BTreeMap::new();
    for (idx, &heading) in positions.iter().enumerate() {
        let limit = match scan {
            MirrorScan::Unbounded => blocks.len(),
            MirrorScan::ChapterBounded => positions
                .get(idx + 1)
                .copied()
                .unwrap_or(blocks.len())
                .min(blocks.len()),
        };

        let start = heading.saturating_add(1).min(limit);
        let found = blocks[start..limit]
            .iter()
            .enumerate()
            .find_map(|(offset, block)| block.mirror_target().map(|id| (start + offset, id)));

        match found {
            Some((position, container_id)) => {
                log::debug!(
                    "Chapter at {heading}: mirror reference at {position} -> {container_id}"
                );
                mirrors.insert(heading, container_id.to_string());
            }
            None => log::warn!(
                "Chapter at {heading} has no mirrored container; skipping its subheadings"
            ),
        }
    }
    mirrors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HeadingLevel;

    fn chapter(id: &str) -> Block {
        Block::heading(id, HeadingLevel::One, id)
    }

    #[test]
    fn first_reference_after_heading_wins() {
        let blocks = vec![
            chapter("c1"),
            Block::other("p"),
            Block::mirror("m1", "s1"),
            Block::mirror("m1b", "s1b"),
            chapter("c2"),
            Block::mirror("m2", "s2"),
        ];

        let mirrors = locate_mirrors(&[0, 4], &blocks, MirrorScan::Unbounded);

        assert_eq!(mirrors.get(&0).map(String::as_str), Some("s1"));
        assert_eq!(mirrors.get(&4).map(String::as_str), Some("s2"));
    }

    #[test]
    fn reference_before_heading_is_ignored() {
        let blocks = vec![Block::mirror("m0", "s0"), chapter("c1")];

        let mirrors = locate_mirrors(&[1], &blocks, MirrorScan::Unbounded);
        assert!(mirrors.is_empty());
    }

    #[test]
    fn unbounded_scan_borrows_next_chapters_reference() {
        let blocks = vec![chapter("c1"), chapter("c2"), Block::mirror("m2", "s2")];

        let unbounded = locate_mirrors(&[0, 1], &blocks, MirrorScan::Unbounded);
        assert_eq!(unbounded.get(&0).map(String::as_str), Some("s2"));
        assert_eq!(unbounded.get(&1).map(String::as_str), Some("s2"));

        let bounded = locate_mirrors(&[0, 1], &blocks, MirrorScan::ChapterBounded);
        assert_eq!(bounded.get(&0), None);
        assert_eq!(bounded.get(&1).map(String::as_str), Some("s2"));
    }

    #[test]
    fn heading_at_end_has_no_mirror() {
        let blocks = vec![Block::mirror("m", "s"), chapter("last")];
        assert!(locate_mirrors(&[1], &blocks, MirrorScan::ChapterBounded).is_empty());
    }
}
