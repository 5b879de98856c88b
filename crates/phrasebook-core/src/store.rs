//! Append-only snippet library stored as JSON lines.
//!
//! Each recorded snippet is one JSON object on its own line. Blank lines are
//! ignored, so libraries written with a leading newline before every record
//! load just as well as line-terminated ones.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::model::{Item, QuizDirection, Snippet};

/// Default library location, relative to the working directory.
pub const DEFAULT_LIBRARY_PATH: &str = "./library/snippets";

/// A snippet library file.
#[derive(Debug, Clone)]
pub struct SnippetStore {
    path: PathBuf,
}

impl SnippetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every snippet. Any malformed line fails the whole load.
    pub fn load(&self) -> Result<Vec<Snippet>, StoreError> {
        let content = self.read()?;
        let mut snippets = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let snippet: Snippet =
                serde_json::from_str(line).map_err(|source| StoreError::Parse {
                    path: self.path.clone(),
                    line: idx + 1,
                    source,
                })?;
            snippets.push(snippet);
        }
        tracing::debug!(path = %self.path.display(), count = snippets.len(), "library loaded");
        Ok(snippets)
    }

    /// Load leniently, collecting problems instead of stopping at the first one.
    pub fn scan(&self) -> Result<ScanReport, StoreError> {
        let content = self.read()?;
        let mut report = ScanReport::default();
        let mut seen = HashSet::new();

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            let snippet: Snippet = match serde_json::from_str(line) {
                Ok(s) => s,
                Err(e) => {
                    report.problems.push(LineProblem {
                        line: line_no,
                        kind: ProblemKind::Malformed,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            if snippet.sentence.trim().is_empty() {
                report.problems.push(LineProblem {
                    line: line_no,
                    kind: ProblemKind::EmptySentence,
                    message: "sentence is empty".into(),
                });
            }
            if snippet.translation.trim().is_empty() {
                report.problems.push(LineProblem {
                    line: line_no,
                    kind: ProblemKind::EmptyTranslation,
                    message: "translation is empty".into(),
                });
            }
            if !snippet.sentence.is_empty() && !seen.insert(snippet.sentence.clone()) {
                report.problems.push(LineProblem {
                    line: line_no,
                    kind: ProblemKind::Duplicate,
                    message: format!("duplicate sentence: {}", snippet.sentence),
                });
            }
            report.snippets.push(snippet);
        }

        Ok(report)
    }

    /// Append one snippet, creating the file and its directory if needed.
    pub fn append(&self, snippet: &Snippet) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(snippet).map_err(StoreError::Encode)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        if !ends_with_newline(&mut file).map_err(|source| self.io_error(source))? {
            line.insert(0, '\n');
        }
        file.write_all(line.as_bytes())
            .map_err(|source| self.io_error(source))?;

        tracing::info!(path = %self.path.display(), tag = %snippet.tag, "snippet recorded");
        Ok(())
    }

    fn read(&self) -> Result<String, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.clone()));
        }
        std::fs::read_to_string(&self.path).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Whether an existing file is empty or ends with `\n`. Older libraries put
/// the newline before each record instead of after it.
fn ends_with_newline(file: &mut std::fs::File) -> std::io::Result<bool> {
    if file.seek(SeekFrom::End(0))? == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Outcome of a lenient library scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Every line that decoded, including ones with warnings.
    pub snippets: Vec<Snippet>,
    /// Problems found, in line order.
    pub problems: Vec<LineProblem>,
}

impl ScanReport {
    /// Lines that could not be decoded at all.
    pub fn malformed(&self) -> usize {
        self.problems
            .iter()
            .filter(|p| p.kind == ProblemKind::Malformed)
            .count()
    }
}

/// A problem on one line of the library.
#[derive(Debug, Clone)]
pub struct LineProblem {
    /// 1-based line number.
    pub line: usize,
    pub kind: ProblemKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    Malformed,
    EmptySentence,
    EmptyTranslation,
    Duplicate,
}

/// Turn snippets into quiz items, optionally keeping only some tags.
///
/// Tag matching is case-insensitive. An empty filter keeps everything.
pub fn items(snippets: &[Snippet], direction: QuizDirection, tags: &[String]) -> Vec<Item> {
    snippets
        .iter()
        .filter(|s| tags.is_empty() || tags.iter().any(|t| t.eq_ignore_ascii_case(&s.tag)))
        .map(|s| direction.item(s))
        .collect()
}
