//! Quiz session orchestration.
//!
//! A [`QuizSession`] owns a read-only view of the corpus, picks the questions
//! for one run, asks them one at a time through an [`AnswerSource`], scores
//! every answer and aggregates the result. Sessions are single use:
//!
//! ```text
//! Initialized -> Running -> Completed
//! ```
//!
//! Construction fails instead of producing an uninitialized session.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::input::AnswerSource;
use crate::model::Item;
use crate::scoring::ScoringMetric;
use crate::statistics;

/// How questions are drawn from the corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingPolicy {
    /// Uniformly random order, without replacement.
    #[default]
    Random,
    /// Corpus order, starting from the first item.
    Sequential,
}

impl fmt::Display for SamplingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingPolicy::Random => write!(f, "random"),
            SamplingPolicy::Sequential => write!(f, "sequential"),
        }
    }
}

impl FromStr for SamplingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(SamplingPolicy::Random),
            "sequential" | "in-order" => Ok(SamplingPolicy::Sequential),
            other => Err(format!("unknown sampling policy: {other}")),
        }
    }
}

/// Settings for one quiz run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Number of questions requested.
    pub size: usize,
    /// How questions are picked.
    #[serde(default)]
    pub sampling: SamplingPolicy,
    /// How answers are scored.
    #[serde(default)]
    pub metric: ScoringMetric,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            size: 5,
            sampling: SamplingPolicy::Random,
            metric: ScoringMetric::Levenshtein,
        }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initialized,
    Running,
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Initialized => write!(f, "initialized"),
            SessionState::Running => write!(f, "running"),
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    /// The question that was asked.
    pub item: Item,
    /// What the user typed.
    pub candidate: String,
    /// Score of `candidate` against `item.back`.
    pub score: i64,
}

impl ScoredAnswer {
    /// The answer matches the expected text exactly.
    ///
    /// A `score` of 100 alone is not enough: empty answers score the raw
    /// length of the expected text.
    pub fn is_perfect(&self) -> bool {
        self.candidate == self.item.back
    }
}

/// Answers of a finished session, in the order they were asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub answers: Vec<ScoredAnswer>,
    /// Arithmetic mean of all scores.
    pub mean: f64,
}

impl SessionResult {
    /// Aggregate answers. At least one answer is required.
    pub fn from_answers(answers: Vec<ScoredAnswer>) -> Result<Self, QuizError> {
        let scores: Vec<i64> = answers.iter().map(|a| a.score).collect();
        let mean = statistics::mean(&scores).ok_or(QuizError::NoAnswers)?;
        Ok(Self { answers, mean })
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Progress callbacks for a running session.
pub trait QuizObserver {
    fn on_question(&self, number: usize, total: usize, item: &Item);
    fn on_answer(&self, number: usize, answer: &ScoredAnswer);
    fn on_complete(&self, result: &SessionResult);
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl QuizObserver for NoopObserver {
    fn on_question(&self, _: usize, _: usize, _: &Item) {}
    fn on_answer(&self, _: usize, _: &ScoredAnswer) {}
    fn on_complete(&self, _: &SessionResult) {}
}

/// A single quiz run over a borrowed corpus.
#[derive(Debug)]
pub struct QuizSession<'a> {
    corpus: &'a [Item],
    config: QuizConfig,
    effective_size: usize,
    state: SessionState,
}

impl<'a> QuizSession<'a> {
    /// Set up a session. Fails if nothing could ever be asked.
    pub fn new(corpus: &'a [Item], config: QuizConfig) -> Result<Self, QuizError> {
        if corpus.is_empty() {
            return Err(QuizError::EmptyCorpus);
        }
        if config.size == 0 {
            return Err(QuizError::ZeroQuizSize);
        }

        let effective_size = config.size.min(corpus.len());
        if effective_size < config.size {
            tracing::debug!(
                requested = config.size,
                available = corpus.len(),
                "quiz size capped at corpus size"
            );
        }

        Ok(Self {
            corpus,
            config,
            effective_size,
            state: SessionState::Initialized,
        })
    }

    /// Number of questions this session asks.
    pub fn effective_size(&self) -> usize {
        self.effective_size
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Pick the questions for this run according to the sampling policy.
    pub fn select_questions<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&'a Item> {
        let mut picked: Vec<&'a Item> = self.corpus.iter().collect();
        if self.config.sampling == SamplingPolicy::Random {
            picked.shuffle(rng);
        }
        picked.truncate(self.effective_size);
        picked
    }

    /// Ask every selected question, score the answers and aggregate them.
    ///
    /// Answer input errors are returned as-is; the session is then left
    /// `Running` and cannot be run again.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        answers: &mut dyn AnswerSource,
        observer: &dyn QuizObserver,
    ) -> Result<SessionResult, QuizError> {
        if self.state != SessionState::Initialized {
            return Err(QuizError::InvalidState(self.state));
        }
        self.state = SessionState::Running;

        let questions = self.select_questions(rng);
        let total = questions.len();
        tracing::info!(
            questions = total,
            sampling = %self.config.sampling,
            metric = %self.config.metric,
            "quiz started"
        );

        let mut scored = Vec::with_capacity(total);
        for (idx, item) in questions.into_iter().enumerate() {
            let number = idx + 1;
            observer.on_question(number, total, item);

            let candidate = answers.prompt_and_read(&item.front)?;
            let score = self.config.metric.score(&candidate, &item.back);
            tracing::debug!(number, score, "answer scored");

            let answer = ScoredAnswer {
                item: item.clone(),
                candidate,
                score,
            };
            observer.on_answer(number, &answer);
            scored.push(answer);
        }

        let result = SessionResult::from_answers(scored)?;
        self.state = SessionState::Completed;
        tracing::info!(mean = result.mean, "quiz finished");
        observer.on_complete(&result);

        Ok(result)
    }
}
