//! phrasebook CLI: record snippets and quiz yourself on them.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "phrasebook",
    version,
    about = "Vocabulary flashcards scored by edit distance"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record new snippets into the library
    Record {
        /// Snippet library file
        #[arg(long)]
        library: Option<PathBuf>,

        /// Translator to suggest translations with (a name from the config)
        #[arg(long)]
        translator: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take a quiz over the library
    Quiz {
        /// Snippet library file
        #[arg(long)]
        library: Option<PathBuf>,

        /// Number of questions
        #[arg(long)]
        size: Option<usize>,

        /// Quiz direction: translate, reverse
        #[arg(long)]
        direction: Option<String>,

        /// Question order: random, sequential
        #[arg(long)]
        sampling: Option<String>,

        /// Scoring metric: levenshtein
        #[arg(long)]
        metric: Option<String>,

        /// Only ask snippets with these tags (comma-separated)
        #[arg(long)]
        tag: Option<String>,

        /// Seed for reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to write session reports to
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format: json, html, markdown, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a library file for malformed lines
    Validate {
        /// Snippet library file
        #[arg(long)]
        library: Option<PathBuf>,
    },

    /// List tag ids
    Tags {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and an empty library
    Init,
}

/// Default log targets, used only when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "phrasebook=info,phrasebook_core=info,phrasebook_providers=info";

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Record {
            library,
            translator,
            config,
        } => commands::record::execute(library, translator, config).await,
        Commands::Quiz {
            library,
            size,
            direction,
            sampling,
            metric,
            tag,
            seed,
            output,
            format,
            config,
        } => commands::quiz::execute(commands::quiz::QuizArgs {
            library,
            size,
            direction,
            sampling,
            metric,
            tag,
            seed,
            output,
            format,
            config,
        }),
        Commands::Validate { library } => commands::validate::execute(library),
        Commands::Tags { config } => commands::tags::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
