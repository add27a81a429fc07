// The full analysis report for one dataset snapshot.
//
// Built once per console run and once per dashboard request. Every table is
// derived from the same record slice; nothing here is cached between runs.

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::analysis::aggregate::{subject_report, topic_report, type_report};
use crate::analysis::gap::{detect_gaps, GapThreshold};
use crate::dataset::models::{AnswerRecord, GapRow, SubjectStats, TopicStats, TypeStats};

/// Rows shown in the raw data preview.
pub const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// RFC 3339 timestamp of when this report was computed
    pub generated_at: String,
    pub record_count: usize,
    pub gap_threshold: f64,
    pub preview: Vec<AnswerRecord>,
    pub subjects: Vec<SubjectStats>,
    pub topics: Vec<TopicStats>,
    pub types: Vec<TypeStats>,
    pub gaps: Vec<GapRow>,
}

impl Report {
    /// Application-weak topics, in gap table order.
    pub fn weak_topics(&self) -> Vec<&GapRow> {
        crate::analysis::gap::weak_topics(&self.gaps)
    }
}

/// Run the aggregation and gap stages over `records`.
pub fn build(records: &[AnswerRecord], threshold: &GapThreshold) -> Report {
    let subjects = subject_report(records);
    let topics = topic_report(records);
    let types = type_report(records);
    let gaps = detect_gaps(&types, threshold);

    info!(
        records = records.len(),
        subjects = subjects.len(),
        topics = topics.len(),
        type_groups = types.len(),
        gap_rows = gaps.len(),
        "Report built"
    );

    Report {
        generated_at: Utc::now().to_rfc3339(),
        record_count: records.len(),
        gap_threshold: threshold.max_gap,
        preview: records.iter().take(PREVIEW_ROWS).cloned().collect(),
        subjects,
        topics,
        types,
        gaps,
    }
}

/// Keep only the records for one subject (exact match).
pub fn filter_subject(records: &[AnswerRecord], subject: &str) -> Vec<AnswerRecord> {
    records
        .iter()
        .filter(|r| r.subject == subject)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(subject: &str, topic: &str, qt: &str, correct: bool) -> AnswerRecord {
        AnswerRecord {
            subject: subject.to_string(),
            topic: topic.to_string(),
            question_type: qt.to_string(),
            correct,
            time_taken: 12.0,
        }
    }

    #[test]
    fn test_build_wires_every_stage() {
        let records = vec![
            rec("Math", "Algebra", "Direct", true),
            rec("Math", "Algebra", "Twisted", false),
            rec("Science", "Optics", "Direct", true),
            rec("Science", "Optics", "Direct", true),
            rec("Science", "Optics", "Direct", false),
            rec("Science", "Optics", "Twisted", true),
        ];
        let report = build(&records, &GapThreshold::default());
        assert_eq!(report.record_count, 6);
        assert_eq!(report.preview.len(), PREVIEW_ROWS);
        assert_eq!(report.subjects.len(), 2);
        assert_eq!(report.topics.len(), 2);
        assert_eq!(report.types.len(), 4);
        assert_eq!(report.gaps.len(), 2);
        assert_eq!(report.gap_threshold, 50.0);

        let weak = report.weak_topics();
        assert_eq!(weak.len(), 1);
        assert_eq!(weak[0].topic, "Algebra");
    }

    #[test]
    fn test_filter_subject() {
        let records = vec![
            rec("Math", "Algebra", "Direct", true),
            rec("Science", "Optics", "Direct", true),
        ];
        let math = filter_subject(&records, "Math");
        assert_eq!(math.len(), 1);
        assert!(filter_subject(&records, "math").is_empty());
    }
}
