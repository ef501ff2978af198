//! Canonical numbering of chapters, subchapters and subsubchapters.

use crate::extractor::Labels;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static NUMBER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)*\s*").expect("number prefix regex is valid"));

/// Remove a leading `1`, `1.2`, `1.2.3 ` style number from a heading
pub fn strip_number_prefix(text: &str) -> &str {
    match NUMBER_PREFIX.find(text) {
        Some(prefix) => &text[prefix.end()..],
        None => text,
    }
}

/// Chapter number of every level-1 heading: `1..N` in position order
pub fn chapter_numbers(level1: &Labels) -> BTreeMap<usize, u32> {
    level1.keys().zip(1..).map(|(&pos, n)| (pos, n)).collect()
}

pub fn renumber_level1(level1: &Labels) -> Labels {
    let chapters = chapter_numbers(level1);
    level1
        .iter()
        .map(|(pos, text)| {
            let chapter = chapters[pos];
            (*pos, format!("{chapter} {}", strip_number_prefix(text)))
        })
        .collect()
}

/// New labels for the level-2 and level-3 headings of one mirrored container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionLabels {
    pub level2: Labels,
    pub level3: Labels,

    /// Level-3 positions preceding every level-2 heading; left as they are
    pub unnumbered: Vec<usize>,
}

pub fn renumber_level23(headers2: &Labels, headers3: &Labels, chapter: u32) -> SectionLabels {
    let mut numbers2: BTreeMap<usize, String> = BTreeMap::new();
    let mut level2 = Labels::new();
    for ((&pos, text), subchapter) in headers2.iter().zip(1u32..) {
        let number = format!("{chapter}.{subchapter}");
        level2.insert(pos, format!("{number} {}", strip_number_prefix(text)));
        numbers2.insert(pos, number);
    }

    let mut counters: BTreeMap<usize, u32> = BTreeMap::new();
    let mut level3 = Labels::new();
    let mut unnumbered = Vec::new();
    for (&pos, text) in headers3 {
        let Some((&parent, parent_number)) = numbers2.range(..=pos).next_back() else {
            unnumbered.push(pos);
            continue;
        };
        let counter = counters.entry(parent).or_insert(0);
        *counter += 1;
        level3.insert(
            pos,
            format!("{parent_number}.{counter} {}", strip_number_prefix(text)),
        );
    }

    SectionLabels {
        level2,
        level3,
        unnumbered,
    }
}
