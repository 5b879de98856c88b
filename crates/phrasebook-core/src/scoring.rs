//! Edit-distance similarity scoring.
//!
//! Answers are scored with the Levenshtein distance (insertions, deletions and
//! substitutions all cost 1) converted to a percentage of the combined length
//! of both strings. Strings are compared char by char, not byte by byte.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a candidate answer is compared with the expected one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMetric {
    #[default]
    Levenshtein,
}

impl ScoringMetric {
    /// Score `candidate` against `expected`.
    pub fn score(&self, candidate: &str, expected: &str) -> i64 {
        match self {
            ScoringMetric::Levenshtein => similarity(candidate, expected),
        }
    }
}

impl fmt::Display for ScoringMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMetric::Levenshtein => write!(f, "levenshtein"),
        }
    }
}

impl FromStr for ScoringMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "levenshtein" | "edit-distance" => Ok(ScoringMetric::Levenshtein),
            other => Err(format!("unknown scoring metric: {other}")),
        }
    }
}

/// Similarity of `candidate` to `expected`, where 100 means identical.
///
/// When both strings are non-empty the result is
/// `trunc(100 - d / (len(candidate) + len(expected)) * 100)` with `d` the edit
/// distance. The value is not clamped.
///
/// If either string is empty the length of the other one is returned as a raw
/// distance, without the percentage conversion. Two empty strings yield `0`.
pub fn similarity(candidate: &str, expected: &str) -> i64 {
    let candidate: Vec<char> = candidate.chars().collect();
    let expected: Vec<char> = expected.chars().collect();

    if candidate.is_empty() {
        return expected.len() as i64;
    }
    if expected.is_empty() {
        return candidate.len() as i64;
    }

    let d = edit_distance(&candidate, &expected) as f64;
    let total = (candidate.len() + expected.len()) as f64;
    (100.0 - d / total * 100.0) as i64
}

/// Raw Levenshtein distance between two strings.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    edit_distance(&a, &b)
}

/// Single-row dynamic programming over `expected`, one pass per candidate char.
fn edit_distance(candidate: &[char], expected: &[char]) -> usize {
    let mut row: Vec<usize> = (0..=expected.len()).collect();

    for (i, &c) in candidate.iter().enumerate() {
        // row[0] still holds the previous row's first cell, i.e. `i`.
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, &e) in expected.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if c == e {
                diag
            } else {
                1 + diag.min(row[j]).min(above)
            };
            diag = above;
        }
    }

    row[expected.len()]
}
