//! The `phrasebook record` command.

use std::path::PathBuf;

use anyhow::Result;

use phrasebook_core::input::LineAnswers;
use phrasebook_core::recorder::Recorder;
use phrasebook_core::store::SnippetStore;
use phrasebook_providers::config::{load_config_from, select_translator};

pub async fn execute(
    library: Option<PathBuf>,
    translator_name: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = SnippetStore::new(library.unwrap_or_else(|| config.library.clone()));
    let translator = select_translator(&config, translator_name.as_deref())?;

    let mut recorder = Recorder::new(&store, &config.tags, &config.target_language)
        .with_source_language(config.source_language.clone());
    if let Some(t) = translator.as_deref() {
        eprintln!("Suggesting translations with {}", t.name());
        recorder = recorder.with_translator(t);
    }

    let stdin = std::io::stdin();
    let mut answers = LineAnswers::new(stdin.lock(), std::io::stdout());
    let written = recorder.record(&mut answers).await?;

    eprintln!("{written} snippet(s) written to {}", store.path().display());
    Ok(())
}
