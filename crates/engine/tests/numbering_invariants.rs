use outline_engine::{
    diff, locate_mirrors, renumber_level1, renumber_level23, strip_number_prefix, Block,
    HeadingLevel, Labels, MirrorScan,
};
use proptest::prelude::*;

fn stale_prefix() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (0u32..20).prop_map(|n| format!("{n} ")),
        (0u32..9, 0u32..9).prop_map(|(a, b)| format!("{a}.{b} ")),
        (0u32..9, 0u32..9, 0u32..9).prop_map(|(a, b, c)| format!("{a}.{b}.{c} ")),
    ]
}

/// Level-1 headings at strictly increasing positions
fn chapter_layout() -> impl Strategy<Value = Labels> {
    prop::collection::vec((1usize..40, stale_prefix()), 1..12).prop_map(|entries| {
        let mut raw = Labels::new();
        let mut position = 0usize;
        for (i, (gap, prefix)) in entries.into_iter().enumerate() {
            position += gap;
            raw.insert(position, format!("{prefix}Chapter {i}"));
        }
        raw
    })
}

/// A container layout: level 2 / level 3 headings at increasing positions
fn section_layout() -> impl Strategy<Value = (Labels, Labels)> {
    prop::collection::vec((1usize..4, stale_prefix(), 0u8..3), 5..30).prop_map(|entries| {
        let mut headers2 = Labels::new();
        let mut headers3 = Labels::new();
        let mut position = 0usize;
        for (i, (gap, prefix, kind)) in entries.into_iter().enumerate() {
            position += gap;
            let text = format!("{prefix}heading {i}");
            if kind == 0 {
                headers2.insert(position, text);
            } else {
                headers3.insert(position, text);
            }
        }
        (headers2, headers3)
    })
}

fn number_of(label: &str) -> &str {
    label.split(' ').next().unwrap()
}

proptest! {
    #[test]
    fn level1_numbers_follow_position_order(raw in chapter_layout()) {
        let renumbered = renumber_level1(&raw);

        prop_assert_eq!(renumbered.len(), raw.len());
        for (expected, (pos, label)) in (1..).zip(&renumbered) {
            let number = number_of(label);
            let expected = expected.to_string();
            prop_assert_eq!(number, expected.as_str());
            prop_assert_eq!(&label[number.len() + 1..], strip_number_prefix(&raw[pos]));
        }
    }

    #[test]
    fn level2_and_level3_invariants_hold(
        chapter in 1u32..10,
        (headers2, headers3) in section_layout(),
    ) {
        let section = renumber_level23(&headers2, &headers3, chapter);

        for (sub, label) in (1..).zip(section.level2.values()) {
            let expected = format!("{chapter}.{sub}");
            prop_assert_eq!(number_of(label), expected.as_str());
        }

        let mut last_parent: Option<usize> = None;
        let mut expected_counter = 0;
        for (pos, label) in &section.level3 {
            let parent = headers2.range(..=*pos).next_back().map(|(p, _)| *p);
            prop_assert!(parent.is_some(), "level-3 at {} numbered without a parent", pos);
            let parent = parent.unwrap();
            if last_parent != Some(parent) {
                last_parent = Some(parent);
                expected_counter = 1;
            } else {
                expected_counter += 1;
            }
            let parent_number = number_of(&section.level2[&parent]);
            let expected = format!("{parent_number}.{expected_counter}");
            prop_assert_eq!(number_of(label), expected.as_str());
        }

        let first_level2 = headers2.keys().next().copied();
        for pos in &section.unnumbered {
            prop_assert!(first_level2.map_or(true, |first| *pos < first));
        }
        prop_assert_eq!(
            section.level3.len() + section.unnumbered.len(),
            headers3.len()
        );
    }

    #[test]
    fn second_pass_has_nothing_to_change(
        chapter in 1u32..10,
        (headers2, headers3) in section_layout(),
    ) {
        let first = renumber_level23(&headers2, &headers3, chapter);

        let mut applied3 = headers3.clone();
        applied3.extend(first.level3.clone());
        let second = renumber_level23(&first.level2, &applied3, chapter);

        prop_assert!(diff(&first.level2, &second.level2).changes.is_empty());
        prop_assert!(diff(&applied3, &second.level3).changes.is_empty());
    }
}

#[test]
fn documented_scenarios() {
    let level1 = renumber_level1(&Labels::from([
        (5, "2 Intro".to_string()),
        (40, "1 Background".to_string()),
    ]));
    assert_eq!(level1[&5], "1 Intro");
    assert_eq!(level1[&40], "2 Background");

    let section = renumber_level23(
        &Labels::from([(0, "Old".to_string())]),
        &Labels::from([(1, "A".to_string()), (2, "B".to_string())]),
        1,
    );
    assert_eq!(section.level2[&0], "1.1 Old");
    assert_eq!(section.level3[&1], "1.1.1 A");
    assert_eq!(section.level3[&2], "1.1.2 B");
}

#[test]
fn each_chapter_finds_its_own_mirror() {
    let blocks = vec![
        Block::heading("c1", HeadingLevel::One, "1 A"),
        Block::other("p"),
        Block::mirror("r1", "s1"),
        Block::heading("c2", HeadingLevel::One, "2 B"),
        Block::mirror("r2", "s2"),
        Block::mirror("r3", "s3"),
    ];

    let mirrors = locate_mirrors(&[0, 3], &blocks, MirrorScan::ChapterBounded);

    assert_eq!(mirrors[&0], "s1");
    assert_eq!(mirrors[&3], "s2");
}
