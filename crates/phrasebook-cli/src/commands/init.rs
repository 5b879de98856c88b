//! The `phrasebook init` command.

use std::path::Path;

use anyhow::Result;

use phrasebook_core::store::DEFAULT_LIBRARY_PATH;

pub fn execute() -> Result<()> {
    if Path::new("phrasebook.toml").exists() {
        println!("phrasebook.toml already exists, skipping.");
    } else {
        std::fs::write("phrasebook.toml", SAMPLE_CONFIG)?;
        println!("Created phrasebook.toml");
    }

    let library = Path::new(DEFAULT_LIBRARY_PATH);
    if library.exists() {
        println!("{DEFAULT_LIBRARY_PATH} already exists, skipping.");
    } else {
        if let Some(parent) = library.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(library, "")?;
        println!("Created {DEFAULT_LIBRARY_PATH}");
    }

    println!("\nNext steps:");
    println!("  1. Edit phrasebook.toml to pick a translator (or leave it unset)");
    println!("  2. Run: phrasebook record");
    println!("  3. Run: phrasebook quiz");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# phrasebook configuration

library = "./library/snippets"
quiz_size = 5
sampling = "random"
metric = "levenshtein"
direction = "translate"
target_language = "zh-cn"
tags = ["Abstract", "Introduction", "Related_works", "Method", "Experiment", "Discussion", "Other"]

# default_translator = "openai"

[translators.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[translators.libretranslate]
type = "libretranslate"
base_url = "http://localhost:5000"
"#;
