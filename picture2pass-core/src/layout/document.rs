use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    consts::{MERGE_VERSION, SOURCE_LAYOUT_ONLY, SOURCE_MERGED},
    layout::element::Block,
};

/// One page's layout result.
///
/// `blocks` is in the detection/reading order of the layout pass; merge
/// operations mutate blocks in place by index and never re-sort the list.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LayoutDocument {
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl LayoutDocument {
    /// Indices of every `Picture` block, in document order.
    pub fn picture_indices(&self) -> Vec<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.is_picture())
            .map(|(index, _)| index)
            .collect()
    }

    /// Stamps provenance for a page where no grounding pass ran.
    ///
    /// An existing `source` (e.g. set by the inference backend) is kept.
    pub fn mark_layout_only(&mut self) {
        self.meta
            .entry("source")
            .or_insert_with(|| Value::from(SOURCE_LAYOUT_ONLY));
    }

    /// Stamps provenance after the grounding merge has run.
    pub fn mark_merged(&mut self) {
        self.meta
            .insert("merge_version".to_string(), Value::from(MERGE_VERSION));
        self.meta
            .insert("source".to_string(), Value::from(SOURCE_MERGED));
    }
}

/// One grounding answer, scoped to a single picture's bounding box but
/// expressed in absolute page coordinates.
///
/// A malformed answer without a `blocks` key parses as zero usable
/// fragments rather than failing the page.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GroundingResult {
    #[serde(default)]
    pub blocks: Vec<Block>,
}
