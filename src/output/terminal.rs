// Colored terminal output for the report tables.
//
// Tables are printed in pipeline order by the `report` command. Column
// widths are fixed; long subject/topic names are truncated so rows stay
// aligned.

use colored::Colorize;

use crate::dataset::models::{AnswerRecord, GapRow, SubjectStats, TopicStats, TypeStats};
use crate::info::DatasetInfo;
use crate::model::dataset::{MlDataset, FEATURE_NAMES};
use crate::model::Evaluation;

use super::recommend::{self, Recommendation};
use super::{percent_bar, truncate_chars};

const NAME_WIDTH: usize = 18;

fn name(text: &str) -> String {
    truncate_chars(text, NAME_WIDTH - 3)
}

fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").bold());
    println!();
}

/// First rows of the raw dataset.
pub fn display_preview(records: &[AnswerRecord]) {
    section(&format!("First {} rows of data", records.len()));
    println!(
        "  {:<18} {:<18} {:<10} {:>7} {:>10}",
        "subject".dimmed(),
        "topic".dimmed(),
        "type".dimmed(),
        "correct".dimmed(),
        "time_taken".dimmed(),
    );
    for r in records {
        println!(
            "  {:<18} {:<18} {:<10} {:>7} {:>10.1}",
            name(&r.subject),
            name(&r.topic),
            r.question_type,
            u8::from(r.correct),
            r.time_taken,
        );
    }
}

/// Dataset summary, the terminal side of `info`.
pub fn display_info(info: &DatasetInfo) {
    section("Dataset Info");
    println!("  Rows: {}", info.rows);
    println!("  Columns:");
    for col in &info.columns {
        println!(
            "    {:<14} {:>6} non-null  {}",
            col.name, col.non_null, col.kind.dimmed()
        );
    }
    println!(
        "  Subjects: {}  Topics: {}",
        info.subjects.len(),
        info.topic_count
    );
    println!("  Question types: {}", info.question_types.join(", "));
    println!(
        "  Time taken: min {:.1}  mean {:.1}  max {:.1}",
        info.time_min, info.time_mean, info.time_max
    );
}

/// Subject-wise report.
pub fn display_subject_report(subjects: &[SubjectStats]) {
    section("Subject-wise Report");
    println!(
        "  {:<18} {:>9} {:>9} {:>9} {:>9}",
        "subject".dimmed(),
        "questions".dimmed(),
        "correct".dimmed(),
        "avg_time".dimmed(),
        "accuracy".dimmed(),
    );
    for s in subjects {
        println!(
            "  {:<18} {:>9} {:>9} {:>9.2} {:>9}",
            name(&s.subject),
            s.total_questions,
            s.total_correct,
            s.avg_time,
            colorize_accuracy(s.accuracy),
        );
    }
}

/// Subject accuracy as horizontal bars.
pub fn display_subject_chart(subjects: &[SubjectStats]) {
    section("Subject Accuracy");
    for s in subjects {
        let bar = percent_bar(s.accuracy, 20);
        let colored_bar = if s.accuracy >= 75.0 {
            bar.bright_green()
        } else if s.accuracy >= 50.0 {
            bar.bright_yellow()
        } else {
            bar.bright_red()
        };
        println!("  {:<18} {} {:>6.1}%", name(&s.subject), colored_bar, s.accuracy);
    }
}

/// Topic-wise report inside each subject.
pub fn display_topic_report(topics: &[TopicStats]) {
    section("Topic-wise Report (Inside Each Subject)");
    println!(
        "  {:<18} {:<18} {:>9} {:>9} {:>9} {:>9}",
        "subject".dimmed(),
        "topic".dimmed(),
        "questions".dimmed(),
        "correct".dimmed(),
        "avg_time".dimmed(),
        "accuracy".dimmed(),
    );
    for t in topics {
        println!(
            "  {:<18} {:<18} {:>9} {:>9} {:>9.2} {:>9}",
            name(&t.subject),
            name(&t.topic),
            t.total_questions,
            t.total_correct,
            t.avg_time,
            colorize_accuracy(t.accuracy),
        );
    }
}

/// Question type-wise accuracy.
pub fn display_type_report(types: &[TypeStats]) {
    section("Question Type-wise Accuracy");
    println!(
        "  {:<18} {:<18} {:<10} {:>9} {:>9} {:>9}",
        "subject".dimmed(),
        "topic".dimmed(),
        "type".dimmed(),
        "questions".dimmed(),
        "correct".dimmed(),
        "accuracy".dimmed(),
    );
    for t in types {
        println!(
            "  {:<18} {:<18} {:<10} {:>9} {:>9} {:>9}",
            name(&t.subject),
            name(&t.topic),
            t.question_type,
            t.total_questions,
            t.total_correct,
            colorize_accuracy(t.accuracy),
        );
    }
}

/// The Direct/Twisted gap table.
/// Which rows of the gap table to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapView {
    All,
    WeakOnly,
}

impl GapView {
    pub fn rows<'a>(&self, gaps: &'a [GapRow]) -> Vec<&'a GapRow> {
        match self {
            GapView::All => gaps.iter().collect(),
            GapView::WeakOnly => gaps.iter().filter(|g| g.application_weak).collect(),
        }
    }

    /// Shown instead of the table when `rows` comes back empty.
    pub fn empty_message(&self) -> &'static str {
        match self {
            GapView::All => "No topics have both Direct and Twisted questions.",
            GapView::WeakOnly => "No application-weak topics.",
        }
    }
}

pub fn display_gap_report(gaps: &[GapRow], view: GapView, threshold: f64) {
    section("Concept vs Application Gap Detection");
    let rows = view.rows(gaps);
    if rows.is_empty() {
        println!("  {}", view.empty_message().dimmed());
        return;
    }
    println!(
        "  {:<18} {:<18} {:>8} {:>8} {:>8}  {}",
        "subject".dimmed(),
        "topic".dimmed(),
        "direct".dimmed(),
        "twisted".dimmed(),
        "gap".dimmed(),
        "weak".dimmed(),
    );
    for g in rows {
        let weak = if g.application_weak {
            "yes".red().bold()
        } else {
            "no".green()
        };
        println!(
            "  {:<18} {:<18} {:>8.1} {:>8.1} {:>8.1}  {}",
            name(&g.subject),
            name(&g.topic),
            g.accuracy_direct,
            g.accuracy_twisted,
            g.accuracy_gap,
            weak,
        );
    }
    println!(
        "\n  {}",
        format!("Weak means gap > {threshold} percentage points.").dimmed()
    );
}

/// Alert block plus an action plan per weak topic.
pub fn display_recommendations(recs: &[Recommendation]) {
    section("Recommended Action Plan");
    if recs.is_empty() {
        println!("  {}", recommend::NO_GAPS_MESSAGE.green());
        println!("  {}", recommend::MAINTAIN_MESSAGE.green());
        return;
    }

    println!("  {} {}", "!!".red().bold(), recommend::WEAK_ALERT.red().bold());
    for rec in recs {
        println!(
            "\n  {} {}",
            rec.heading().bold(),
            format!("(gap {:.1})", rec.accuracy_gap).dimmed()
        );
        for step in &rec.steps {
            println!("    - {step}");
        }
    }
}

/// Head of the classifier dataset.
pub fn display_ml_head(dataset: &MlDataset, rows: usize) {
    section("ML Dataset");
    println!(
        "  {:>16} {:>16} {:>16}  {}",
        FEATURE_NAMES[0].dimmed(),
        FEATURE_NAMES[1].dimmed(),
        FEATURE_NAMES[2].dimmed(),
        "target".dimmed(),
    );
    for (features, label) in dataset.features.iter().zip(&dataset.labels).take(rows) {
        println!(
            "  {:>16.2} {:>16.2} {:>16.2}  {}",
            features[0], features[1], features[2], label
        );
    }
    if dataset.len() > rows {
        println!("  {}", format!("... {} more rows", dataset.len() - rows).dimmed());
    }
}

/// Held-out accuracy of the classifier.
pub fn display_evaluation(eval: &Evaluation) {
    section("Model Accuracy");
    println!(
        "  Train/test: {}/{} topics",
        eval.train_size, eval.test_size
    );
    println!("  {}", format!("{:.4}", eval.accuracy).bold());
}

/// Accuracy colored by band: green >= 75, yellow >= 50, red below.
fn colorize_accuracy(accuracy: f64) -> colored::ColoredString {
    let text = format!("{accuracy:.1}");
    if accuracy >= 75.0 {
        text.green()
    } else if accuracy >= 50.0 {
        text.yellow()
    } else {
        text.red()
    }
}
