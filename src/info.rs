// Dataset summary — row count, column overview, distinct categories.
//
// The `info` command prints this before any analysis so a bad export (wrong
// file, missing question types, all-zero times) is obvious up front.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::dataset::models::AnswerRecord;
use crate::dataset::REQUIRED_COLUMNS;

#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
    pub subjects: Vec<String>,
    pub topic_count: usize,
    pub question_types: Vec<String>,
    pub time_min: f64,
    pub time_mean: f64,
    pub time_max: f64,
}

impl DatasetInfo {
    pub fn from_records(records: &[AnswerRecord]) -> Self {
        let rows = records.len();
        let columns = REQUIRED_COLUMNS
            .iter()
            .map(|&name| ColumnInfo {
                name: name.to_string(),
                // Loading rejects empty cells, so every parsed value is present.
                non_null: rows,
                kind: match name {
                    "correct" => "bool",
                    "time_taken" => "float",
                    _ => "category",
                }
                .to_string(),
            })
            .collect();

        let subjects: BTreeSet<&str> = records.iter().map(|r| r.subject.as_str()).collect();
        let topics: BTreeSet<(&str, &str)> = records
            .iter()
            .map(|r| (r.subject.as_str(), r.topic.as_str()))
            .collect();
        let question_types: BTreeSet<&str> =
            records.iter().map(|r| r.question_type.as_str()).collect();

        let (time_min, time_max, time_sum) = records.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, sum), r| (lo.min(r.time_taken), hi.max(r.time_taken), sum + r.time_taken),
        );
        let (time_min, time_max, time_mean) = if rows == 0 {
            (0.0, 0.0, 0.0)
        } else {
            (time_min, time_max, time_sum / rows as f64)
        };

        Self {
            rows,
            columns,
            subjects: subjects.into_iter().map(String::from).collect(),
            topic_count: topics.len(),
            question_types: question_types.into_iter().map(String::from).collect(),
            time_min,
            time_mean,
            time_max,
        }
    }
}

/// Display the dataset file line and the summary.
pub fn show(path: &str, records: &[AnswerRecord]) -> Result<()> {
    let file_size = std::fs::metadata(Path::new(path))
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Dataset: {} ({})", path, file_size);

    let info = DatasetInfo::from_records(records);
    crate::output::terminal::display_info(&info);

    if !info.question_types.iter().any(|t| t == "Direct")
        || !info.question_types.iter().any(|t| t == "Twisted")
    {
        println!(
            "\nNote: gap detection needs both Direct and Twisted questions; \
             the gap table will be empty."
        );
    }
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(subject: &str, topic: &str, qt: &str, time: f64) -> AnswerRecord {
        AnswerRecord {
            subject: subject.to_string(),
            topic: topic.to_string(),
            question_type: qt.to_string(),
            correct: true,
            time_taken: time,
        }
    }

    #[test]
    fn test_from_records() {
        let info = DatasetInfo::from_records(&[
            rec("Math", "Algebra", "Direct", 10.0),
            rec("Math", "Geometry", "Twisted", 30.0),
            rec("Physics", "Algebra", "Direct", 20.0),
        ]);
        assert_eq!(info.rows, 3);
        assert_eq!(info.subjects, ["Math", "Physics"]);
        assert_eq!(info.topic_count, 3);
        assert_eq!(info.question_types, ["Direct", "Twisted"]);
        assert_eq!(info.time_min, 10.0);
        assert_eq!(info.time_max, 30.0);
        assert!((info.time_mean - 20.0).abs() < 1e-9);
        assert_eq!(info.columns.len(), 5);
    }

    #[test]
    fn test_from_records_empty() {
        let info = DatasetInfo::from_records(&[]);
        assert_eq!(info.rows, 0);
        assert_eq!(info.time_min, 0.0);
        assert!(info.subjects.is_empty());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
