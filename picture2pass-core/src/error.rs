use snafu::prelude::*;

/// Failures raised by an inference collaborator (layout or grounding).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum InferenceError {
    #[snafu(display("Environment `{}` not found, error {}", name, source))]
    EnvNotFound {
        source: std::env::VarError,
        name: String,
    },
    #[snafu(display("Create scratch dir error: {}", source))]
    TempDir { source: std::io::Error },
    #[snafu(display("Spawn parser at stage `{}` error: {}", stage, source))]
    Spawn {
        source: std::io::Error,
        stage: String,
    },
    #[snafu(display("Parser exited with {:?} at stage `{}`: {}", code, stage, stderr))]
    ProcessExit {
        stage: String,
        code: Option<i32>,
        stderr: String,
    },
    #[snafu(display("Read `{}` error: {}", path, source))]
    ReadOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No layout record found in `{}`", path))]
    MissingRecord { path: String },
    #[snafu(display("Decode json at stage `{}` error: {}", stage, source))]
    Json {
        source: serde_json::Error,
        stage: String,
    },
}

/// A page-fatal failure, tagged with the stage that raised it.
///
/// Inference failures are never retried here; the page either completes
/// fully merged or fails as a whole, so callers never see a partial
/// document disguised as a complete one.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Picture2PassError {
    #[snafu(display("Layout pass for `{}` error: {}", path, source))]
    LayoutPass {
        source: InferenceError,
        path: String,
    },
    #[snafu(display("Grounding pass for picture {} error: {}", picture_index, source))]
    GroundingPass {
        source: InferenceError,
        picture_index: usize,
    },
}
