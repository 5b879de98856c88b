//! Aggregate statistics over scored answers.

use serde::{Deserialize, Serialize};

use crate::session::ScoredAnswer;

/// Arithmetic mean of the scores, or `None` when there are none.
pub fn mean(scores: &[i64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<i64>() as f64 / scores.len() as f64)
}

/// Median of the scores, averaging the middle pair for even counts.
pub fn median(scores: &[i64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) as f64 / 2.0)
    } else {
        Some(sorted[mid] as f64)
    }
}

/// Summary of one session's scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Number of questions answered.
    pub count: usize,
    /// Arithmetic mean score.
    pub mean: f64,
    /// Median score.
    pub median: f64,
    /// Lowest score.
    pub min: i64,
    /// Highest score.
    pub max: i64,
    /// Answers equal to the expected text. Not the same as scoring 100: an
    /// empty answer to a 100-char text also scores 100.
    pub perfect: usize,
}

/// Summarize a set of scored answers.
pub fn summarize(answers: &[ScoredAnswer]) -> Option<ScoreSummary> {
    let scores: Vec<i64> = answers.iter().map(|a| a.score).collect();
    let min = scores.iter().copied().min()?;
    let max = scores.iter().copied().max()?;

    Some(ScoreSummary {
        count: scores.len(),
        mean: mean(&scores)?,
        median: median(&scores)?,
        min,
        max,
        perfect: answers.iter().filter(|a| a.is_perfect()).count(),
    })
}
