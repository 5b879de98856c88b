//! phrasebook-report: Session report rendering.
//!
//! Renders finished quiz sessions as self-contained HTML or as Markdown.

pub mod html;
pub mod markdown;

#[cfg(test)]
mod fixtures;

/// Band a score falls into, used for colouring.
pub(crate) fn score_band(score: i64) -> &'static str {
    if score >= 80 {
        "good"
    } else if score >= 50 {
        "fair"
    } else {
        "poor"
    }
}
