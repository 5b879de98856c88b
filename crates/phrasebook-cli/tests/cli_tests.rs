//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs in `dir` with `HOME` pointed there too, so no user config leaks in.
fn phrasebook(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("phrasebook").unwrap();
    cmd.current_dir(dir).env("HOME", dir).env_remove("PHRASEBOOK_LIBRARY");
    cmd
}

fn write_library(dir: &Path, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.join("snippets");
    let mut content = String::new();
    for line in lines {
        content.push('\n');
        content.push_str(line);
    }
    std::fs::write(&path, content).unwrap();
    path
}

fn snippet_line(sentence: &str, translation: &str, tag: &str) -> String {
    serde_json::json!({
        "sentence": sentence,
        "translation": [[translation, sentence]],
        "tag": tag,
        "time": "2020-05-28"
    })
    .to_string()
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    phrasebook(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("record"))
        .stdout(predicate::str::contains("quiz"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    phrasebook(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("phrasebook"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    phrasebook(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created phrasebook.toml"))
        .stdout(predicate::str::contains("Created ./library/snippets"));

    assert!(dir.path().join("phrasebook.toml").exists());
    assert!(dir.path().join("library/snippets").exists());
}

#[test]
fn init_skips_existing_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("phrasebook.toml"), "quiz_size = 3\n").unwrap();

    phrasebook(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("phrasebook.toml already exists"));

    let content = std::fs::read_to_string(dir.path().join("phrasebook.toml")).unwrap();
    assert_eq!(content, "quiz_size = 3\n");
}

#[test]
fn init_config_is_loadable() {
    let dir = TempDir::new().unwrap();
    phrasebook(dir.path()).arg("init").assert().success();

    phrasebook(dir.path())
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("7: Other"));
}

#[test]
fn validate_valid_library() {
    let dir = TempDir::new().unwrap();
    let library = write_library(
        dir.path(),
        &[
            &snippet_line("good morning", "早上好", "Other"),
            &snippet_line("thank you", "谢谢", "Method"),
        ],
    );

    phrasebook(dir.path())
        .arg("validate")
        .arg("--library")
        .arg(&library)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 snippets"))
        .stdout(predicate::str::contains("Library valid"));
}

#[test]
fn validate_reports_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let library = write_library(
        dir.path(),
        &[&snippet_line("good morning", "早上好", "Other"), "{not json"],
    );

    phrasebook(dir.path())
        .arg("validate")
        .arg("--library")
        .arg(&library)
        .assert()
        .failure()
        .stdout(predicate::str::contains("line 3: ERROR"))
        .stderr(predicate::str::contains("1 malformed line(s)"));
}

#[test]
fn validate_warns_on_duplicates_without_failing() {
    let dir = TempDir::new().unwrap();
    let line = snippet_line("good morning", "早上好", "Other");
    let library = write_library(dir.path(), &[&line, &line]);

    phrasebook(dir.path())
        .arg("validate")
        .arg("--library")
        .arg(&library)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING: duplicate sentence"));
}

#[test]
fn validate_nonexistent_library() {
    let dir = TempDir::new().unwrap();
    phrasebook(dir.path())
        .arg("validate")
        .arg("--library")
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn tags_lists_defaults() {
    let dir = TempDir::new().unwrap();
    phrasebook(dir.path())
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("1: Abstract"))
        .stdout(predicate::str::contains("7: Other"));
}

#[test]
fn tags_from_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "tags = [\"Verbs\", \"Nouns\"]\n").unwrap();

    phrasebook(dir.path())
        .arg("tags")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("1: Verbs"))
        .stdout(predicate::str::contains("2: Nouns"))
        .stdout(predicate::str::contains("Abstract").not());
}

#[test]
fn quiz_scores_piped_answers() {
    let dir = TempDir::new().unwrap();
    let library = write_library(
        dir.path(),
        &[
            &snippet_line("good morning", "早上好", "Other"),
            &snippet_line("flaw", "缺陷", "Method"),
        ],
    );

    phrasebook(dir.path())
        .args(["quiz", "--sampling", "sequential", "--size", "5"])
        .arg("--library")
        .arg(&library)
        .write_stdin("good morning\nlawn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/2]"))
        .stdout(predicate::str::contains("早上好"))
        .stdout(predicate::str::contains("score: 100"))
        .stdout(predicate::str::contains("score: 75"))
        .stdout(predicate::str::contains("expected: flaw"))
        .stdout(predicate::str::contains("average score: 87.5"))
        .stderr(predicate::str::contains("Mean"));
}

#[test]
fn quiz_reverse_direction_with_tag_filter() {
    let dir = TempDir::new().unwrap();
    let library = write_library(
        dir.path(),
        &[
            &snippet_line("good morning", "早上好", "Other"),
            &snippet_line("flaw", "缺陷", "Method"),
        ],
    );

    phrasebook(dir.path())
        .args(["quiz", "--direction", "reverse", "--tag", "method"])
        .arg("--library")
        .arg(&library)
        .write_stdin("缺陷\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/1]"))
        .stdout(predicate::str::contains("score: 100"));
}

#[test]
fn quiz_writes_reports() {
    let dir = TempDir::new().unwrap();
    let library = write_library(dir.path(), &[&snippet_line("good morning", "早上好", "Other")]);
    let output = dir.path().join("results");

    phrasebook(dir.path())
        .args(["quiz", "--seed", "42", "--format", "all"])
        .arg("--library")
        .arg(&library)
        .arg("--output")
        .arg(&output)
        .write_stdin("good mourning\n")
        .assert()
        .success();

    let mut extensions: Vec<String> = std::fs::read_dir(&output)
        .unwrap()
        .map(|e| {
            e.unwrap()
                .path()
                .extension()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    extensions.sort();
    assert_eq!(extensions, vec!["html", "json", "md"]);
}

#[test]
fn quiz_on_empty_library_fails() {
    let dir = TempDir::new().unwrap();
    let library = write_library(dir.path(), &[]);

    phrasebook(dir.path())
        .arg("quiz")
        .arg("--library")
        .arg(&library)
        .assert()
        .failure()
        .stderr(predicate::str::contains("corpus is empty"));
}

#[test]
fn quiz_rejects_zero_size() {
    let dir = TempDir::new().unwrap();
    let library = write_library(dir.path(), &[&snippet_line("good morning", "早上好", "Other")]);

    phrasebook(dir.path())
        .args(["quiz", "--size", "0"])
        .arg("--library")
        .arg(&library)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn quiz_rejects_unknown_direction() {
    let dir = TempDir::new().unwrap();
    let library = write_library(dir.path(), &[&snippet_line("good morning", "早上好", "Other")]);

    phrasebook(dir.path())
        .args(["quiz", "--direction", "sideways"])
        .arg("--library")
        .arg(&library)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown quiz direction"));
}

#[test]
fn quiz_fails_when_input_ends_early() {
    let dir = TempDir::new().unwrap();
    let library = write_library(
        dir.path(),
        &[
            &snippet_line("good morning", "早上好", "Other"),
            &snippet_line("flaw", "缺陷", "Method"),
        ],
    );

    phrasebook(dir.path())
        .args(["quiz", "--sampling", "sequential"])
        .arg("--library")
        .arg(&library)
        .write_stdin("good morning\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input closed"));
}

#[test]
fn rust_log_enables_core_debug_logs() {
    let dir = TempDir::new().unwrap();
    let library = write_library(dir.path(), &[&snippet_line("good morning", "早上好", "Other")]);

    phrasebook(dir.path())
        .arg("quiz")
        .arg("--library")
        .arg(&library)
        .env("RUST_LOG", "phrasebook_core=debug")
        .write_stdin("good morning\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("answer scored"));
}

#[test]
fn default_logging_is_info() {
    let dir = TempDir::new().unwrap();
    let library = write_library(dir.path(), &[&snippet_line("good morning", "早上好", "Other")]);

    phrasebook(dir.path())
        .arg("quiz")
        .arg("--library")
        .arg(&library)
        .env_remove("RUST_LOG")
        .write_stdin("good morning\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("quiz started"))
        .stderr(predicate::str::contains("answer scored").not());
}

#[test]
fn record_with_mock_translator() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("phrasebook.toml"),
        r#"default_translator = "mock"

[translators.mock]
type = "mock"
response = "“早上好”"
"#,
    )
    .unwrap();
    let library = dir.path().join("library").join("snippets");

    phrasebook(dir.path())
        .arg("record")
        .arg("--library")
        .arg(&library)
        .write_stdin("good morning\n\n4\n\nthank you\n感谢\n9\n#\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("suggested translation:\n早上好"))
        .stderr(predicate::str::contains("2 snippet(s) written"));

    let content = std::fs::read_to_string(&library).unwrap();
    let snippets: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(snippets.len(), 2);
    assert_eq!(snippets[0]["sentence"], "good morning");
    assert_eq!(snippets[0]["translation"], "早上好");
    assert_eq!(snippets[0]["tag"], "Method");
    assert_eq!(snippets[1]["translation"], "感谢");
    assert_eq!(snippets[1]["tag"], "Other");
}

#[test]
fn record_without_translator_asks_for_translation() {
    let dir = TempDir::new().unwrap();
    let library = dir.path().join("snippets");

    phrasebook(dir.path())
        .arg("record")
        .arg("--library")
        .arg(&library)
        .write_stdin("good morning\n早上好\n1\n#\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("please input the translation:"));

    let content = std::fs::read_to_string(&library).unwrap();
    assert!(content.contains("\"tag\":\"Abstract\""));
}

#[test]
fn record_appends_to_legacy_library() {
    let dir = TempDir::new().unwrap();
    let library = write_library(dir.path(), &[&snippet_line("good morning", "早上好", "Other")]);

    phrasebook(dir.path())
        .arg("record")
        .arg("--library")
        .arg(&library)
        .write_stdin("thank you\n谢谢\n4\n#\n")
        .assert()
        .success();

    phrasebook(dir.path())
        .arg("validate")
        .arg("--library")
        .arg(&library)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 snippets"));

    phrasebook(dir.path())
        .args(["quiz", "--sampling", "sequential"])
        .arg("--library")
        .arg(&library)
        .write_stdin("good morning\nthank you\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("average score: 100.0"));
}

#[test]
fn record_unknown_translator_fails() {
    let dir = TempDir::new().unwrap();
    phrasebook(dir.path())
        .args(["record", "--translator", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("translator 'nope' not found"));
}
