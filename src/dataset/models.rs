// Data models — the input row type and the derived report tables.
//
// Every derived table is a read-only projection of the loaded records. They
// live here rather than next to the aggregation code so the output and web
// layers can use them without pulling in the analysis functions.

use serde::{Deserialize, Serialize};

/// Question type label for straightforward concept-recall questions.
pub const DIRECT: &str = "Direct";

/// Question type label for application / word-problem variants.
pub const TWISTED: &str = "Twisted";

/// One answered question from the input dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub subject: String,
    pub topic: String,
    /// "Direct", "Twisted", or any other label (kept, but ignored by the gap join)
    pub question_type: String,
    pub correct: bool,
    /// Seconds spent on the question
    pub time_taken: f64,
}

/// Per-subject totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectStats {
    pub subject: String,
    pub total_questions: u32,
    pub total_correct: u32,
    pub avg_time: f64,
    /// Percentage (0-100)
    pub accuracy: f64,
}

/// Per-(subject, topic) totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicStats {
    pub subject: String,
    pub topic: String,
    pub total_questions: u32,
    pub total_correct: u32,
    pub avg_time: f64,
    pub accuracy: f64,
}

/// Per-(subject, topic, question_type) totals. No timing at this level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeStats {
    pub subject: String,
    pub topic: String,
    pub question_type: String,
    pub total_questions: u32,
    pub total_correct: u32,
    pub accuracy: f64,
}

/// One topic with both Direct and Twisted answers, aligned side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapRow {
    pub subject: String,
    pub topic: String,
    pub accuracy_direct: f64,
    pub accuracy_twisted: f64,
    /// Signed: direct minus twisted. Negative when twisted questions go better.
    pub accuracy_gap: f64,
    pub application_weak: bool,
}

impl GapRow {
    /// "Subject - Topic", the label used in alerts and recommendations.
    pub fn label(&self) -> String {
        format!("{} - {}", self.subject, self.topic)
    }
}
