//! CSV dataset reading and writing.
//!
//! Training data needs `comment` and `label` columns; batch input needs a
//! `comment` column. Other columns are ignored. Empty or missing cells in
//! the `comment` column read as the empty string.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Writer};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RetortError};
use crate::label::Label;
use crate::pipeline::inference::Classification;

/// Name of the free-text column.
pub const COMMENT_COLUMN: &str = "comment";

/// Name of the category column in training data.
pub const LABEL_COLUMN: &str = "label";

/// One training row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledComment {
    pub comment: String,
    pub label: Label,
}

impl LabeledComment {
    pub fn new<S: Into<String>>(comment: S, label: Label) -> Self {
        Self {
            comment: comment.into(),
            label,
        }
    }
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| RetortError::missing_column(column))
}

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    Ok(ReaderBuilder::new().flexible(true).from_path(path)?)
}

/// Read labeled training comments from a CSV file.
pub fn read_labeled_comments<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledComment>> {
    let path = path.as_ref();
    let mut reader = open_reader(path)?;
    let headers = reader.headers()?.clone();
    let comment_idx = column_index(&headers, COMMENT_COLUMN)?;
    let label_idx = column_index(&headers, LABEL_COLUMN)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(i as u64 + 2, |p| p.line()) as usize;
        let raw_label = record.get(label_idx).unwrap_or("");
        let label = raw_label
            .parse::<Label>()
            .map_err(|_| RetortError::invalid_label(raw_label, line))?;

        rows.push(LabeledComment {
            comment: record.get(comment_idx).unwrap_or("").to_string(),
            label,
        });
    }

    debug!("Read {} labeled comments from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read the `comment` column of a CSV file.
pub fn read_comments<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut reader = open_reader(path)?;
    let headers = reader.headers()?.clone();
    let comment_idx = column_index(&headers, COMMENT_COLUMN)?;

    let mut comments = Vec::new();
    for record in reader.records() {
        let record = record?;
        comments.push(record.get(comment_idx).unwrap_or("").to_string());
    }

    debug!("Read {} comments from {}", comments.len(), path.display());
    Ok(comments)
}

/// Write classification results as CSV.
///
/// Columns are `original_comment`, `cleaned_comment`, `predicted_label`,
/// plus `suggested_reply` when `include_replies` is set.
pub fn write_classifications<P: AsRef<Path>>(
    path: P,
    results: &[Classification],
    include_replies: bool,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = Writer::from_path(path)?;
    let mut header = vec!["original_comment", "cleaned_comment", "predicted_label"];
    if include_replies {
        header.push("suggested_reply");
    }
    writer.write_record(&header)?;

    for result in results {
        let mut record = vec![
            result.original_comment.as_str(),
            result.cleaned_comment.as_str(),
            result.predicted_label.as_str(),
        ];
        if include_replies {
            record.push(result.suggested_reply.unwrap_or_else(|| result.predicted_label.reply()));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    debug!("Wrote {} classifications to {}", results.len(), path.display());
    Ok(())
}
