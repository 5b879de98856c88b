//! Session report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::QuizDirection;
use crate::session::{QuizConfig, SessionResult};
use crate::statistics::{summarize, ScoreSummary};

/// A finished quiz session, ready to render or save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Library the questions came from.
    pub library: String,
    /// Which side of each snippet was shown.
    pub direction: QuizDirection,
    /// Settings the session ran with.
    pub config: QuizConfig,
    /// Tags the corpus was filtered to, if any.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Number of items the questions were drawn from.
    pub corpus_size: usize,
    /// Answers and mean score.
    pub result: SessionResult,
    /// Summary statistics over the answers.
    pub summary: ScoreSummary,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Everything about a run that is not part of its result.
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub library: String,
    pub direction: QuizDirection,
    pub config: QuizConfig,
    pub tags: Vec<String>,
    pub corpus_size: usize,
    pub duration_ms: u64,
}

impl SessionReport {
    /// Build a report for a finished session.
    pub fn new(info: RunInfo, result: SessionResult) -> Result<Self> {
        let summary =
            summarize(&result.answers).context("cannot report on a session without answers")?;
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            library: info.library,
            direction: info.direction,
            config: info.config,
            tags: info.tags,
            corpus_size: info.corpus_size,
            result,
            summary,
            duration_ms: info.duration_ms,
        })
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
