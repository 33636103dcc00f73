//! Integration tests driving the command line layer.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use retort::cli::args::RetortArgs;
use retort::cli::commands::execute_command;
use retort::error::{Result, RetortError};
use retort::ml::artifact::{CLASSIFIER_FILE, VECTORIZER_FILE};
use retort::pipeline::training::DISTRIBUTION_CHART_TITLE;
use tempfile::TempDir;

fn dataset_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/comments_labeled.csv")
}

fn run(args: &[&str]) -> Result<()> {
    let mut argv = vec!["retort", "--quiet"];
    argv.extend_from_slice(args);
    execute_command(RetortArgs::try_parse_from(argv).unwrap())
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// Train into `dir/models` and return that directory.
fn train_into(dir: &Path) -> Result<PathBuf> {
    let models_dir = dir.join("models");
    let chart = dir.join("label_distribution.txt");
    run(&[
        "train",
        "--data",
        path_str(&dataset_path()),
        "--models-dir",
        path_str(&models_dir),
        "--distribution-output",
        path_str(&chart),
    ])?;
    Ok(models_dir)
}

fn read_header(path: &Path) -> Vec<String> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.headers().unwrap().iter().map(String::from).collect()
}

#[test]
fn test_train_writes_artifacts_and_distribution() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let models_dir = train_into(temp_dir.path())?;

    assert!(models_dir.join(VECTORIZER_FILE).exists());
    assert!(models_dir.join(CLASSIFIER_FILE).exists());

    let chart = fs::read_to_string(temp_dir.path().join("label_distribution.txt"))?;
    let lines: Vec<&str> = chart.lines().collect();
    assert_eq!(lines[0], DISTRIBUTION_CHART_TITLE);
    assert_eq!(lines.len(), 2 + 8);
    assert!(lines[2].starts_with("constructive_criticism | "));
    assert!(lines[2].ends_with(" 8"));

    Ok(())
}

#[test]
fn test_train_with_unwritable_distribution_keeps_models_dir_empty() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("file");
    fs::write(&blocker, "").unwrap();
    let models_dir = temp_dir.path().join("models");

    let result = run(&[
        "train",
        "--data",
        path_str(&dataset_path()),
        "--models-dir",
        path_str(&models_dir),
        "--distribution-output",
        path_str(&blocker.join("x.txt")),
    ]);

    assert!(result.is_err());
    assert!(!models_dir.join(VECTORIZER_FILE).exists());
    assert!(!models_dir.join(CLASSIFIER_FILE).exists());
}

#[test]
fn test_batch_with_and_without_replies() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let models_dir = train_into(temp_dir.path())?;
    let input = temp_dir.path().join("new_comments.csv");
    fs::write(
        &input,
        "comment\n\"Amazing video, great job\"\nHow do I install this on Linux?\n",
    )?;

    let with_replies = temp_dir.path().join("with_replies.csv");
    run(&[
        "batch",
        "--input",
        path_str(&input),
        "--output",
        path_str(&with_replies),
        "--models-dir",
        path_str(&models_dir),
    ])?;
    assert_eq!(
        read_header(&with_replies),
        vec![
            "original_comment",
            "cleaned_comment",
            "predicted_label",
            "suggested_reply"
        ]
    );

    let without_replies = temp_dir.path().join("without_replies.csv");
    run(&[
        "batch",
        "--input",
        path_str(&input),
        "--output",
        path_str(&without_replies),
        "--models-dir",
        path_str(&models_dir),
        "--no-replies",
    ])?;
    assert_eq!(
        read_header(&without_replies),
        vec!["original_comment", "cleaned_comment", "predicted_label"]
    );

    Ok(())
}

#[test]
fn test_batch_without_comment_column_fails() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let models_dir = train_into(temp_dir.path())?;
    let input = temp_dir.path().join("bad.csv");
    let output = temp_dir.path().join("out.csv");
    fs::write(&input, "text\nhello there\n")?;

    let result = run(&[
        "batch",
        "--input",
        path_str(&input),
        "--output",
        path_str(&output),
        "--models-dir",
        path_str(&models_dir),
    ]);
    assert!(matches!(result, Err(RetortError::MissingColumn { .. })));
    assert!(!output.exists());

    let status = process::Command::new(env!("CARGO_BIN_EXE_retort"))
        .args([
            "--quiet",
            "batch",
            "--input",
            path_str(&input),
            "--output",
            path_str(&output),
            "--models-dir",
            path_str(&models_dir),
        ])
        .output()?;
    assert_eq!(status.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&status.stderr).contains("Error: "));
    assert!(!output.exists());

    Ok(())
}
