use std::path::Path;

use futures::future;
use snafu::ResultExt;
use tracing::{debug, info, warn};

use crate::{
    consts::{
        DEFAULT_CONTAINMENT_TOLERANCE, DEFAULT_GROUNDING_PROMPT, DEFAULT_LAYOUT_PROMPT,
        DEFAULT_MAX_PICTURES_PER_PAGE,
    },
    error::{GroundingPassSnafu, LayoutPassSnafu, Picture2PassError},
    inference::{GroundingInference, LayoutInference},
    layout::document::LayoutDocument,
    merge::{MergeOptions, merge_picture},
};

/// Drives the two-pass flow for one page image.
///
/// Owns the document for the duration of a page; the merger only ever gets
/// an exclusive handle to one picture block at a time, by index into the
/// document's block list.
pub struct PageParser<L, G> {
    pub layout: L,
    pub grounding: G,
    pub config: ParserConfig,
}

#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub layout_prompt: String,
    pub grounding_prompt: String,
    pub max_pictures_per_page: usize,
    pub dedup: bool,
    pub tolerance: f32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            layout_prompt: DEFAULT_LAYOUT_PROMPT.to_string(),
            grounding_prompt: DEFAULT_GROUNDING_PROMPT.to_string(),
            max_pictures_per_page: DEFAULT_MAX_PICTURES_PER_PAGE,
            dedup: true,
            tolerance: DEFAULT_CONTAINMENT_TOLERANCE,
        }
    }
}

impl<L, G> PageParser<L, G>
where
    L: LayoutInference,
    G: GroundingInference,
{
    pub fn new(layout: L, grounding: G, config: ParserConfig) -> Self {
        Self {
            layout,
            grounding,
            config,
        }
    }

    /// Runs the layout pass, then a grounding pass per qualifying picture,
    /// and returns the merged document.
    ///
    /// Either the whole page succeeds or a single error names the failing
    /// stage; a partial document is never returned as if it were complete.
    pub async fn process_page(&self, image: &Path) -> Result<LayoutDocument, Picture2PassError> {
        let mut document = self
            .layout
            .run_layout(image, &self.config.layout_prompt)
            .await
            .context(LayoutPassSnafu {
                path: image.display().to_string(),
            })?;

        let pictures = document.picture_indices();
        if pictures.is_empty() {
            debug!("no picture blocks detected, skipping grounding pass");
            document.mark_layout_only();
            return Ok(document);
        }
        info!(pictures = pictures.len(), "layout pass complete");

        // Select grounding targets: document order, capped, geometry required.
        // A picture without a usable bbox is skipped and does not consume cap.
        let mut targets = Vec::new();
        for index in pictures {
            if targets.len() >= self.config.max_pictures_per_page {
                debug!(
                    cap = self.config.max_pictures_per_page,
                    "picture cap reached, remaining pictures skipped"
                );
                break;
            }
            match document.blocks[index].bbox {
                Some(bbox) => targets.push((index, bbox)),
                None => warn!(index, "picture without usable bbox, skipping grounding"),
            }
        }

        // The grounding calls are independent reads against distinct crops of
        // the same immutable image, so they are gathered together; every
        // mutation below stays sequential and per-index, which keeps block
        // order independent of completion order.
        let grounding_calls = targets
            .iter()
            .map(|&(_, bbox)| {
                self.grounding
                    .run_grounding(image, bbox, &self.config.grounding_prompt)
            })
            .collect::<Vec<_>>();
        let groundings = future::join_all(grounding_calls).await;

        let options = MergeOptions {
            dedup: self.config.dedup,
            tolerance: self.config.tolerance,
        };
        for (&(index, _), grounding) in targets.iter().zip(groundings) {
            let grounding = grounding.context(GroundingPassSnafu {
                picture_index: index,
            })?;
            merge_picture(&mut document.blocks[index], &grounding, &options);
            debug!(
                index,
                children = document.blocks[index]
                    .children
                    .as_ref()
                    .map_or(0, Vec::len),
                "picture merged"
            );
        }

        document.mark_merged();
        Ok(document)
    }
}
