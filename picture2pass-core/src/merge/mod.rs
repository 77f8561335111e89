use std::collections::HashSet;

use crate::{
    analysis::{bbox::Bbox, labels::Category},
    consts::{CHILD_SOURCE, DEFAULT_CONTAINMENT_TOLERANCE},
    layout::{document::GroundingResult, element::Block},
};

pub mod dedup;

use dedup::{ChildKey, seed_from_children};

/// Knobs for one merge invocation.
#[derive(Debug, Clone, Copy)]
pub struct MergeOptions {
    /// Drop fragments whose identity key was already attached.
    pub dedup: bool,
    /// Containment slack handed to the geometric test.
    pub tolerance: f32,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            dedup: true,
            tolerance: DEFAULT_CONTAINMENT_TOLERANCE,
        }
    }
}

/// Attaches the qualifying fragments of one grounding result as
/// `PictureText` children of `picture`.
///
/// No-op unless `picture` is a `Picture` block with usable geometry. A
/// fragment qualifies when it is textual (`Text` or `Formula`), carries a
/// bbox and non-empty text, and lies inside the picture's bbox within the
/// tolerance. With `dedup` on, fragments already attached (by rounded-bbox
/// plus exact-text identity) are skipped, which makes repeated merges
/// idempotent and interleaved merges accumulative.
///
/// The only side effect is rewriting `picture.children`; the field stays
/// absent when nothing qualifies.
pub fn merge_picture(picture: &mut Block, grounding: &GroundingResult, options: &MergeOptions) {
    if !picture.is_picture() {
        return;
    }
    let Some(picture_bbox) = picture.bbox else {
        return;
    };

    let mut children = picture.children.take().unwrap_or_default();
    let mut seen = if options.dedup {
        seed_from_children(&children)
    } else {
        HashSet::new()
    };

    for fragment in &grounding.blocks {
        if !fragment.category.is_textual() {
            continue;
        }
        let Some(bbox) = fragment.bbox else {
            continue;
        };
        let Some(text) = fragment.text.as_deref() else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        if !picture_bbox.contains_with_tolerance(&bbox, options.tolerance) {
            continue;
        }
        if options.dedup && !seen.insert(ChildKey::new(&bbox, text)) {
            continue;
        }
        children.push(picture_text_child(fragment, bbox));
    }

    if !children.is_empty() {
        picture.children = Some(children);
    }
}

/// Converts a second-pass fragment into the child block attached under a
/// picture. Confidence rides along when the fragment had a readable one.
fn picture_text_child(fragment: &Block, bbox: Bbox) -> Block {
    Block {
        category: Category::PictureText,
        bbox: Some(bbox),
        text: fragment.text.clone(),
        conf: fragment.conf,
        source: Some(CHILD_SOURCE.to_string()),
        children: None,
    }
}
