/// Slack (in page coordinate units) allowed when testing whether a text
/// fragment lies inside a picture's bounding box.
///
/// Detector jitter between the layout pass and the grounding pass routinely
/// moves edges by fractions of a unit; half a unit absorbs that without
/// admitting fragments that genuinely straddle the picture boundary. A
/// fragment further out than the tolerance on any axis is rejected whole,
/// never clipped.
pub const DEFAULT_CONTAINMENT_TOLERANCE: f32 = 0.5;

/// Hard cap on grounding invocations per page.
///
/// Pages with pathological layouts can produce dozens of picture detections;
/// each grounding call is a full model invocation, so the cap bounds the
/// second pass. Pictures beyond the cap keep whatever children the first
/// pass gave them (usually none).
pub const DEFAULT_MAX_PICTURES_PER_PAGE: usize = 12;

/// Prompt identifier for the full-page layout pass.
pub const DEFAULT_LAYOUT_PROMPT: &str = "prompt_layout_all_en";

/// Prompt identifier for the per-picture grounding pass.
pub const DEFAULT_GROUNDING_PROMPT: &str = "prompt_grounding_ocr";

/// Value of `meta.merge_version` once a merge has run.
///
/// Bump this when the merge semantics change so downstream consumers can
/// tell which algorithm produced a persisted document.
pub const MERGE_VERSION: &str = "hier-v1";

/// Value of `meta.source` for a document produced by both passes.
pub const SOURCE_MERGED: &str = "dots+picture2pass";

/// Value of `meta.source` for a page where the layout pass found no
/// pictures and the grounding pass was skipped entirely.
pub const SOURCE_LAYOUT_ONLY: &str = "layout-only";

/// Value of the `source` field stamped on every synthesized `PictureText`
/// child, distinguishing second-pass fragments from first-pass blocks.
pub const CHILD_SOURCE: &str = "picture-ocr";

/// Environment variable naming the dots.ocr parser script invoked by the
/// subprocess adapter.
pub const DOTS_PARSER_ENV_NAME: &str = "DOTS_OCR_PARSER";

/// Environment variable overriding the python interpreter used to run the
/// parser script.
pub const DOTS_PYTHON_ENV_NAME: &str = "DOTS_OCR_PYTHON";

/// Interpreter used when [`DOTS_PYTHON_ENV_NAME`] is unset.
pub const DEFAULT_PYTHON: &str = "python";
