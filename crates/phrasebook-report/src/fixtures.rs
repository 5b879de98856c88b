use phrasebook_core::model::{Item, QuizDirection};
use phrasebook_core::report::{RunInfo, SessionReport};
use phrasebook_core::session::{QuizConfig, ScoredAnswer, SessionResult};

pub fn make_test_report() -> SessionReport {
    let result = SessionResult::from_answers(vec![
        ScoredAnswer {
            item: Item::new("我们提出一种方法。", "We propose a method."),
            candidate: "We propose a method.".into(),
            score: 100,
        },
        ScoredAnswer {
            item: Item::new("<缺陷>", "flaw"),
            candidate: "lawn".into(),
            score: 75,
        },
        ScoredAnswer {
            item: Item::new("小猫", "kitten"),
            candidate: "".into(),
            score: 6,
        },
    ])
    .unwrap();

    SessionReport::new(
        RunInfo {
            library: "./library/snippets".into(),
            direction: QuizDirection::Translate,
            config: QuizConfig {
                size: 3,
                ..Default::default()
            },
            tags: vec!["Method".into()],
            corpus_size: 8,
            duration_ms: 61_500,
        },
        result,
    )
    .unwrap()
}
