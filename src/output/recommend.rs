// Recommendation text for application-weak topics.
//
// The same templates feed the terminal report, the markdown export and the
// dashboard, so the wording lives in one place.

use serde::Serialize;

use crate::dataset::models::GapRow;

/// Shown when at least one topic is weak.
pub const WEAK_ALERT: &str = "Application Weak Detected in These Topics:";

/// Shown when no topic is weak.
pub const NO_GAPS_MESSAGE: &str = "No major concept-application gaps detected.";

/// Action plan fallback when no topic is weak.
pub const MAINTAIN_MESSAGE: &str = "Great job! Maintain revision consistency.";

/// Practice steps suggested for every weak topic.
pub const ACTION_STEPS: [&str; 3] = [
    "Practice 20 twisted/application-based questions",
    "Focus on translating word problems carefully",
    "Attempt timed mini-mock",
];

/// An action plan for one weak topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub subject: String,
    pub topic: String,
    pub accuracy_gap: f64,
    pub steps: Vec<String>,
}

impl Recommendation {
    pub fn for_gap(gap: &GapRow) -> Self {
        Self {
            subject: gap.subject.clone(),
            topic: gap.topic.clone(),
            accuracy_gap: gap.accuracy_gap,
            steps: ACTION_STEPS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// "Subject - Topic" heading.
    pub fn heading(&self) -> String {
        format!("{} - {}", self.subject, self.topic)
    }
}

/// One recommendation per weak row; rows that are not weak are skipped.
pub fn recommendations(gaps: &[GapRow]) -> Vec<Recommendation> {
    gaps.iter()
        .filter(|g| g.application_weak)
        .map(Recommendation::for_gap)
        .collect()
}
