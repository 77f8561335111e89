use std::collections::HashSet;

use crate::{
    analysis::{bbox::Bbox, labels::Category},
    layout::element::Block,
};

/// Identity of a picture-text fragment: the integer-rounded bounding
/// rectangle plus the exact text.
///
/// Rounding absorbs the sub-unit coordinate jitter between repeated
/// inference calls on overlapping regions. Text is compared verbatim
/// (case-sensitive, untrimmed) on purpose: near-duplicates that differ by
/// OCR noise are kept as two fragments rather than guessed to be one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChildKey {
    bbox: [i64; 4],
    text: String,
}

impl ChildKey {
    pub fn new(bbox: &Bbox, text: &str) -> Self {
        Self {
            bbox: bbox.rounded(),
            text: text.to_string(),
        }
    }

    /// Identity of an existing block, when it has both geometry and text.
    pub fn of(block: &Block) -> Option<Self> {
        let bbox = block.bbox.as_ref()?;
        let text = block.text.as_deref()?;
        Some(Self::new(bbox, text))
    }
}

/// Seeds a seen-set from children already attached to a picture, so that a
/// repeated merge with the same grounding result adds nothing.
///
/// Only `PictureText` children participate; a picture can in principle
/// carry other child kinds and those never shadow incoming fragments.
pub fn seed_from_children(children: &[Block]) -> HashSet<ChildKey> {
    children
        .iter()
        .filter(|child| child.category == Category::PictureText)
        .filter_map(ChildKey::of)
        .collect()
}
