//! The `phrasebook tags` command.

use std::path::PathBuf;

use anyhow::Result;

use phrasebook_providers::config::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    for (id, tag) in config.tags.entries() {
        println!("{id}: {tag}");
    }
    Ok(())
}
