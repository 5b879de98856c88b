//! The `phrasebook quiz` command.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use phrasebook_core::input::LineAnswers;
use phrasebook_core::model::{Item, QuizDirection};
use phrasebook_core::report::{RunInfo, SessionReport};
use phrasebook_core::scoring::ScoringMetric;
use phrasebook_core::session::{
    QuizObserver, QuizSession, SamplingPolicy, ScoredAnswer, SessionResult,
};
use phrasebook_core::store::{self, SnippetStore};
use phrasebook_providers::config::load_config_from;
use phrasebook_report::html::write_html_report;
use phrasebook_report::markdown::write_markdown_report;

pub struct QuizArgs {
    pub library: Option<PathBuf>,
    pub size: Option<usize>,
    pub direction: Option<String>,
    pub sampling: Option<String>,
    pub metric: Option<String>,
    pub tag: Option<String>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub format: String,
    pub config: Option<PathBuf>,
}

/// Prints question numbers and per-answer feedback.
struct ConsoleObserver;

impl QuizObserver for ConsoleObserver {
    fn on_question(&self, number: usize, total: usize, _item: &Item) {
        println!("\n[{number}/{total}]");
    }

    fn on_answer(&self, _number: usize, answer: &ScoredAnswer) {
        println!("score: {}", answer.score);
        if !answer.is_perfect() {
            println!("expected: {}", answer.item.back);
        }
    }

    fn on_complete(&self, result: &SessionResult) {
        println!("\naverage score: {:.1}", result.mean);
    }
}

pub fn execute(args: QuizArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;

    let mut quiz = config.quiz();
    if let Some(size) = args.size {
        quiz.size = size;
    }
    if let Some(s) = &args.sampling {
        quiz.sampling = s.parse::<SamplingPolicy>().map_err(anyhow::Error::msg)?;
    }
    if let Some(m) = &args.metric {
        quiz.metric = m.parse::<ScoringMetric>().map_err(anyhow::Error::msg)?;
    }
    let direction = match &args.direction {
        Some(d) => d.parse::<QuizDirection>().map_err(anyhow::Error::msg)?,
        None => config.direction,
    };
    let tags: Vec<String> = args
        .tag
        .as_deref()
        .map(|t| {
            t.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let library = args.library.unwrap_or_else(|| config.library.clone());
    let store = SnippetStore::new(&library);
    let snippets = store.load()?;
    let corpus = store::items(&snippets, direction, &tags);
    if !tags.is_empty() {
        tracing::info!(
            kept = corpus.len(),
            total = snippets.len(),
            "filtered library by tag"
        );
    }

    let mut session = QuizSession::new(&corpus, quiz.clone())?;
    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    };

    eprintln!(
        "phrasebook v{}: {} questions from {} snippets ({direction})",
        env!("CARGO_PKG_VERSION"),
        session.effective_size(),
        corpus.len()
    );

    let start = Instant::now();
    let stdin = std::io::stdin();
    let mut answers = LineAnswers::new(stdin.lock(), std::io::stdout());
    let result = session.run(&mut *rng, &mut answers, &ConsoleObserver)?;
    let duration_ms = start.elapsed().as_millis() as u64;

    let report = SessionReport::new(
        RunInfo {
            library: library.display().to_string(),
            direction,
            config: quiz,
            tags,
            corpus_size: corpus.len(),
            duration_ms,
        },
        result,
    )?;

    print_summary(&report);

    if let Some(output) = &args.output {
        write_reports(&report, output, &args.format)?;
    }

    Ok(())
}

fn write_reports(report: &SessionReport, output: &std::path::Path, format: &str) -> Result<()> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "markdown"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("quiz-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("quiz-{timestamp}.html"));
                write_html_report(report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("quiz-{timestamp}.md"));
                write_markdown_report(report, &path)?;
                eprintln!("Markdown report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }
    Ok(())
}

fn print_summary(report: &SessionReport) {
    use comfy_table::{Cell, Table};

    let s = &report.summary;
    let mut table = Table::new();
    table.set_header(vec![
        "Questions",
        "Mean",
        "Median",
        "Min",
        "Max",
        "Perfect",
        "Duration",
    ]);
    table.add_row(vec![
        Cell::new(s.count),
        Cell::new(format!("{:.1}", s.mean)),
        Cell::new(format!("{:.1}", s.median)),
        Cell::new(s.min),
        Cell::new(s.max),
        Cell::new(s.perfect),
        Cell::new(format!("{:.1}s", report.duration_ms as f64 / 1000.0)),
    ]);

    eprintln!("\n{table}");
}
