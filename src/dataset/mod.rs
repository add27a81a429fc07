// Dataset layer — loading answer records from a delimited file.
//
// The file must have a header row containing at least the columns in
// REQUIRED_COLUMNS. Extra columns are ignored. Rows are kept in file order;
// nothing downstream relies on that order except the raw data preview.

pub mod models;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use models::AnswerRecord;

/// Columns every dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "subject",
    "topic",
    "question_type",
    "correct",
    "time_taken",
];

/// Raw CSV row before the `correct` column is interpreted.
#[derive(Debug, Deserialize)]
struct RawRow {
    subject: String,
    topic: String,
    question_type: String,
    correct: String,
    time_taken: f64,
}

/// Load answer records from a CSV file on disk.
pub fn load(path: &str) -> Result<Vec<AnswerRecord>> {
    if !Path::new(path).exists() {
        anyhow::bail!(
            "Dataset not found at {}. Set GAPSCAN_DATA_PATH or pass --data.",
            path
        );
    }

    let file =
        std::fs::File::open(path).with_context(|| format!("Failed to open dataset at {}", path))?;
    let records =
        from_reader(file).with_context(|| format!("Failed to read dataset at {}", path))?;

    info!(path, rows = records.len(), "Loaded answer records");
    Ok(records)
}

/// Parse answer records from any reader producing CSV text.
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<AnswerRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        anyhow::bail!("Dataset is missing required columns: {}", missing.join(", "));
    }

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<RawRow>().enumerate() {
        // +2: one for the header, one for 1-based numbering
        let line = i + 2;
        let row = row.with_context(|| format!("Malformed row at line {line}"))?;
        let correct = parse_correct(&row.correct)
            .with_context(|| format!("Invalid `correct` value at line {line}"))?;
        records.push(AnswerRecord {
            subject: row.subject,
            topic: row.topic,
            question_type: row.question_type,
            correct,
            time_taken: row.time_taken,
        });
    }

    Ok(records)
}

/// Interpret a `correct` cell. Accepts 0/1 (also as floats) and true/false.
pub fn parse_correct(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" => Ok(true),
        "0" | "0.0" | "false" => Ok(false),
        other => anyhow::bail!("expected 0/1 or true/false, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_correct_variants() {
        assert!(parse_correct("1").unwrap());
        assert!(parse_correct("True").unwrap());
        assert!(parse_correct(" 1.0 ").unwrap());
        assert!(!parse_correct("0").unwrap());
        assert!(!parse_correct("FALSE").unwrap());
        assert!(parse_correct("yes").is_err());
        assert!(parse_correct("").is_err());
    }

    #[test]
    fn test_from_reader_ignores_extra_columns() {
        let csv = "student,subject,topic,question_type,correct,time_taken\n\
                   s1,Math,Algebra,Direct,1,30\n\
                   s2,Math,Algebra,Twisted,0,55.5\n";
        let records = from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].subject, "Math");
        assert!(records[0].correct);
        assert!(!records[1].correct);
        assert!((records[1].time_taken - 55.5).abs() < 1e-9);
    }

    #[test]
    fn test_from_reader_trims_fields_but_keeps_case() {
        let csv = "subject , topic,question_type,correct,time_taken\n\
                   Math , Algebra, Direct , 1 , 30\n\
                   Math,Algebra,direct,0,40\n";
        let records = from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records[0].subject, "Math");
        assert_eq!(records[0].topic, "Algebra");
        assert_eq!(records[0].question_type, "Direct");
        assert!((records[0].time_taken - 30.0).abs() < 1e-9);
        // Trimming is the only normalisation applied.
        assert_eq!(records[1].question_type, "direct");
    }

    #[test]
    fn test_from_reader_reports_missing_columns() {
        let csv = "subject,topic,correct\nMath,Algebra,1\n";
        let err = from_reader(csv.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("question_type"), "got: {err}");
        assert!(err.contains("time_taken"), "got: {err}");
    }

    #[test]
    fn test_from_reader_reports_bad_line() {
        let csv = "subject,topic,question_type,correct,time_taken\n\
                   Math,Algebra,Direct,1,30\n\
                   Math,Algebra,Direct,maybe,30\n";
        let err = format!("{:#}", from_reader(csv.as_bytes()).unwrap_err());
        assert!(err.contains("line 3"), "got: {err}");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/definitely/not/here.csv").unwrap_err().to_string();
        assert!(err.contains("Dataset not found"));
    }
}
