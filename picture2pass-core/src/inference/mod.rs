use std::{future::Future, path::Path};

use crate::{
    analysis::bbox::Bbox,
    error::InferenceError,
    layout::document::{GroundingResult, LayoutDocument},
};

pub mod dots;

/// Full-page layout pass.
///
/// Implementations must return blocks in reading order, with `Picture`
/// bboxes in original-image coordinates. Errors propagate; the core never
/// retries.
pub trait LayoutInference {
    fn run_layout(
        &self,
        image: &Path,
        prompt: &str,
    ) -> impl Future<Output = Result<LayoutDocument, InferenceError>>;
}

/// OCR pass restricted to one bounding box.
///
/// Detections come back in the same absolute page coordinate space as the
/// full page, not relative to the crop.
pub trait GroundingInference {
    fn run_grounding(
        &self,
        image: &Path,
        bbox: Bbox,
        prompt: &str,
    ) -> impl Future<Output = Result<GroundingResult, InferenceError>>;
}
