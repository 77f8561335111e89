use std::{
    future::Future,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use snafu::{OptionExt, ResultExt};
use tokio::process::Command;
use tracing::debug;

use crate::{
    analysis::bbox::Bbox,
    consts::{DEFAULT_PYTHON, DOTS_PARSER_ENV_NAME, DOTS_PYTHON_ENV_NAME},
    error::{
        EnvNotFoundSnafu, InferenceError, JsonSnafu, MissingRecordSnafu, ProcessExitSnafu,
        ReadOutputSnafu, SpawnSnafu, TempDirSnafu,
    },
    inference::{GroundingInference, LayoutInference},
    layout::document::{GroundingResult, LayoutDocument},
};

/// Subprocess adapter around the dots.ocr parser script.
///
/// The script writes a one-line JSONL record into the output directory; the
/// record's `layout_info_path` points at the full layout JSON. Both the
/// layout pass and the bbox-restricted grounding pass go through the same
/// invocation, the latter adding `--bbox x1 y1 x2 y2`.
#[derive(Clone, Debug)]
pub struct DotsClient {
    python: String,
    script: PathBuf,
}

impl DotsClient {
    pub fn new(python: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
            script: script.into(),
        }
    }

    /// Resolves the parser location from the environment.
    pub fn from_env() -> Result<Self, InferenceError> {
        let script = std::env::var(DOTS_PARSER_ENV_NAME).context(EnvNotFoundSnafu {
            name: DOTS_PARSER_ENV_NAME,
        })?;
        let python =
            std::env::var(DOTS_PYTHON_ENV_NAME).unwrap_or_else(|_| DEFAULT_PYTHON.to_string());

        Ok(Self::new(python, script))
    }

    async fn run_parser(
        &self,
        image: &Path,
        prompt: &str,
        bbox: Option<Bbox>,
    ) -> Result<LayoutDocument, InferenceError> {
        let scratch = tempfile::tempdir().context(TempDirSnafu)?;

        let mut command = Command::new(&self.python);
        command
            .arg(&self.script)
            .arg(image)
            .arg("--prompt")
            .arg(prompt)
            .arg("--output")
            .arg(scratch.path());
        if let Some(bbox) = bbox {
            command.arg("--bbox");
            for coord in bbox.to_xyxy() {
                command.arg((coord as i64).to_string());
            }
        }

        debug!(prompt, bounded = bbox.is_some(), "invoking dots parser");
        let output = command.output().await.context(SpawnSnafu {
            stage: "dots-parser",
        })?;
        if !output.status.success() {
            return ProcessExitSnafu {
                stage: "dots-parser",
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .fail();
        }

        let stem = image
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let jsonl_path = scratch.path().join(format!("{stem}.jsonl"));
        let raw = std::fs::read_to_string(&jsonl_path).context(ReadOutputSnafu {
            path: jsonl_path.display().to_string(),
        })?;
        let record = raw
            .lines()
            .find(|line| !line.trim().is_empty())
            .context(MissingRecordSnafu {
                path: jsonl_path.display().to_string(),
            })?;
        let record: Map<String, Value> = serde_json::from_str(record).context(JsonSnafu {
            stage: "jsonl-record",
        })?;

        let info_path = record
            .get("layout_info_path")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let mut document = match info_path {
            Some(ref info_path) if Path::new(info_path).exists() => {
                let raw = std::fs::read_to_string(info_path).context(ReadOutputSnafu {
                    path: info_path.clone(),
                })?;
                serde_json::from_str::<LayoutDocument>(&raw).context(JsonSnafu {
                    stage: "layout-info",
                })?
            }
            _ => LayoutDocument::default(),
        };

        // the JSONL record carries the run metadata and wins over whatever
        // the layout file already had
        for (key, value) in record {
            document.meta.insert(key, value);
        }

        Ok(document)
    }
}

impl LayoutInference for DotsClient {
    fn run_layout(
        &self,
        image: &Path,
        prompt: &str,
    ) -> impl Future<Output = Result<LayoutDocument, InferenceError>> {
        self.run_parser(image, prompt, None)
    }
}

impl GroundingInference for DotsClient {
    fn run_grounding(
        &self,
        image: &Path,
        bbox: Bbox,
        prompt: &str,
    ) -> impl Future<Output = Result<GroundingResult, InferenceError>> {
        async move {
            let document = self.run_parser(image, prompt, Some(bbox)).await?;
            Ok(GroundingResult {
                blocks: document.blocks,
            })
        }
    }
}
