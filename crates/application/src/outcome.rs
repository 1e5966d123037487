//! Pipeline results and the non-fatal warnings collected along the way

use std::fmt;

use chrono::{DateTime, Utc};
use domain::{ArticleOrigin, PodcastScript, RunId, SynthesisResult};
use serde::Serialize;

/// Pipeline stage a warning or error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Request validation and source resolution
    Input,
    /// Article acquisition
    Fetch,
    /// Script writing
    Generation,
    /// Audio synthesis
    Synthesis,
}

impl PipelineStage {
    /// Lowercase stage name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Fetch => "fetch",
            Self::Generation => "generation",
            Self::Synthesis => "synthesis",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An optional provider was skipped or failed and the stage fell back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageWarning {
    /// Stage that degraded
    pub stage: PipelineStage,
    /// Provider that was skipped or failed
    pub provider: String,
    /// What happened, suitable for showing to a user
    pub message: String,
}

impl StageWarning {
    /// Create a new warning
    pub fn new(
        stage: PipelineStage,
        provider: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            provider: provider.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for StageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}

/// Value produced by a stage plus any warnings raised while producing it
#[derive(Debug, Clone)]
pub struct StageOutcome<T> {
    /// Stage output
    pub value: T,
    /// Fallbacks taken on the way
    pub warnings: Vec<StageWarning>,
}

impl<T> StageOutcome<T> {
    /// Outcome without warnings
    pub const fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Outcome carrying the warnings gathered so far
    pub const fn with_warnings(value: T, warnings: Vec<StageWarning>) -> Self {
        Self { value, warnings }
    }
}

/// Everything a successful run produces
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    /// Correlation id of the run
    pub run_id: RunId,
    /// The script that was narrated
    pub script: PodcastScript,
    /// Audio and its provenance
    #[serde(skip)]
    pub synthesis: SynthesisResult,
    /// Where the article text came from
    pub article_origin: ArticleOrigin,
    /// Fallbacks taken during the run
    pub warnings: Vec<StageWarning>,
    /// When the run finished
    pub generated_at: DateTime<Utc>,
}

impl PipelineResult {
    /// Whether any optional provider was skipped or failed
    pub fn degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}
