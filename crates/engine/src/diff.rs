use crate::extractor::Labels;
use serde::Serialize;

/// A heading whose label has to be rewritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelChange {
    pub position: usize,
    pub old: String,
    pub new: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelDiff {
    pub changes: Vec<LabelChange>,
    pub unchanged: usize,
}

/// Compare computed labels with the current ones; only exact mismatches change.
///
/// Positions without a new label (unnumbered headings) are not considered.
pub fn diff(old: &Labels, new: &Labels) -> LabelDiff {
    let mut result = LabelDiff::default();
    for (&position, new_label) in new {
        let Some(old_label) = old.get(&position) else {
            continue;
        };
        if old_label == new_label {
            result.unchanged += 1;
        } else {
            result.changes.push(LabelChange {
                position,
                old: old_label.clone(),
                new: new_label.clone(),
            });
        }
    }
    result
}
