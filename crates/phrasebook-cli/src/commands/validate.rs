//! The `phrasebook validate` command.

use std::path::PathBuf;

use anyhow::Result;

use phrasebook_core::store::{ProblemKind, SnippetStore};
use phrasebook_providers::config::load_config;

pub fn execute(library: Option<PathBuf>) -> Result<()> {
    let library = match library {
        Some(path) => path,
        None => load_config()?.library,
    };
    let store = SnippetStore::new(library);
    let report = store.scan()?;

    println!(
        "Library: {} ({} snippets)",
        store.path().display(),
        report.snippets.len()
    );
    for problem in &report.problems {
        let level = if problem.kind == ProblemKind::Malformed {
            "ERROR"
        } else {
            "WARNING"
        };
        println!("  line {}: {level}: {}", problem.line, problem.message);
    }

    let malformed = report.malformed();
    if report.problems.is_empty() {
        println!("Library valid.");
    } else {
        println!("\n{} problem(s) found.", report.problems.len());
    }
    anyhow::ensure!(malformed == 0, "{malformed} malformed line(s) in library");

    Ok(())
}
