// Group-by aggregation over answer records.
//
// Three grouping levels: subject, (subject, topic) and
// (subject, topic, question_type). Each group tracks a count, a correct
// count and a running time sum. Groups are collected in a BTreeMap so the
// output comes back sorted by key, which keeps reports reproducible.

use std::collections::BTreeMap;

use crate::dataset::models::{AnswerRecord, SubjectStats, TopicStats, TypeStats};

/// Running totals for one group.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    total: u32,
    correct: u32,
    time_sum: f64,
}

impl Tally {
    fn add(&mut self, record: &AnswerRecord) {
        self.total += 1;
        if record.correct {
            self.correct += 1;
        }
        self.time_sum += record.time_taken;
    }

    fn avg_time(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.time_sum / self.total as f64
    }
}

/// Percentage of correct answers.
///
/// Only meaningful for `total > 0`. Every group built here has at least one
/// row, so callers never hit the zero case; it returns 0.0 rather than NaN.
pub fn accuracy_pct(correct: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64 * 100.0
}

fn tally_by<K: Ord>(
    records: &[AnswerRecord],
    key: impl Fn(&AnswerRecord) -> K,
) -> BTreeMap<K, Tally> {
    let mut groups: BTreeMap<K, Tally> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().add(record);
    }
    groups
}

/// Subject-wise report.
pub fn subject_report(records: &[AnswerRecord]) -> Vec<SubjectStats> {
    tally_by(records, |r| r.subject.clone())
        .into_iter()
        .map(|(subject, t)| SubjectStats {
            subject,
            total_questions: t.total,
            total_correct: t.correct,
            avg_time: t.avg_time(),
            accuracy: accuracy_pct(t.correct, t.total),
        })
        .collect()
}

/// Topic-wise report inside each subject.
pub fn topic_report(records: &[AnswerRecord]) -> Vec<TopicStats> {
    tally_by(records, |r| (r.subject.clone(), r.topic.clone()))
        .into_iter()
        .map(|((subject, topic), t)| TopicStats {
            subject,
            topic,
            total_questions: t.total,
            total_correct: t.correct,
            avg_time: t.avg_time(),
            accuracy: accuracy_pct(t.correct, t.total),
        })
        .collect()
}

/// Question-type-wise report inside each topic.
pub fn type_report(records: &[AnswerRecord]) -> Vec<TypeStats> {
    tally_by(records, |r| {
        (r.subject.clone(), r.topic.clone(), r.question_type.clone())
    })
    .into_iter()
    .map(|((subject, topic, question_type), t)| TypeStats {
        subject,
        topic,
        question_type,
        total_questions: t.total,
        total_correct: t.correct,
        accuracy: accuracy_pct(t.correct, t.total),
    })
    .collect()
}
