// Concept vs application gap detection.
//
// Splits the question-type table into its Direct and Twisted rows, aligns
// them per (subject, topic) with an inner join, and flags topics where
// accuracy drops sharply once the same concept is asked as an application
// problem.
//
// Topics that only have one of the two question types are dropped by the
// join. They never appear in the gap table, weak or not.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::dataset::models::{GapRow, TypeStats, DIRECT, TWISTED};

/// Threshold configuration for the weakness label.
///
/// A topic is application-weak when `accuracy_gap > max_gap`. The comparison
/// is strict: a gap of exactly `max_gap` is not weak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapThreshold {
    /// Percentage points (default 50.0). An older note described this as 30;
    /// 50 is what the reports have always used.
    pub max_gap: f64,
}

impl Default for GapThreshold {
    fn default() -> Self {
        Self { max_gap: 50.0 }
    }
}

/// Whether a signed accuracy gap marks the topic as application-weak.
pub fn is_application_weak(accuracy_gap: f64, threshold: &GapThreshold) -> bool {
    accuracy_gap > threshold.max_gap
}

/// Join Direct and Twisted rows per topic and compute the gap.
///
/// Output order follows the Direct rows, which are already sorted by
/// (subject, topic) when they come from `type_report`.
pub fn detect_gaps(type_stats: &[TypeStats], threshold: &GapThreshold) -> Vec<GapRow> {
    let twisted: HashMap<(&str, &str), &TypeStats> = type_stats
        .iter()
        .filter(|t| t.question_type == TWISTED)
        .map(|t| ((t.subject.as_str(), t.topic.as_str()), t))
        .collect();

    let mut gaps = Vec::new();
    for direct in type_stats.iter().filter(|t| t.question_type == DIRECT) {
        let Some(tw) = twisted.get(&(direct.subject.as_str(), direct.topic.as_str())) else {
            debug!(
                subject = %direct.subject,
                topic = %direct.topic,
                "No Twisted rows for topic, skipping"
            );
            continue;
        };

        let accuracy_gap = direct.accuracy - tw.accuracy;
        gaps.push(GapRow {
            subject: direct.subject.clone(),
            topic: direct.topic.clone(),
            accuracy_direct: direct.accuracy,
            accuracy_twisted: tw.accuracy,
            accuracy_gap,
            application_weak: is_application_weak(accuracy_gap, threshold),
        });
    }

    info!(
        topics = gaps.len(),
        weak = gaps.iter().filter(|g| g.application_weak).count(),
        "Gap detection complete"
    );
    gaps
}

/// The application-weak rows, in report order.
pub fn weak_topics(gaps: &[GapRow]) -> Vec<&GapRow> {
    gaps.iter().filter(|g| g.application_weak).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(subject: &str, topic: &str, qt: &str, total: u32, correct: u32) -> TypeStats {
        TypeStats {
            subject: subject.to_string(),
            topic: topic.to_string(),
            question_type: qt.to_string(),
            total_questions: total,
            total_correct: correct,
            accuracy: crate::analysis::aggregate::accuracy_pct(correct, total),
        }
    }

    #[test]
    fn test_default_threshold_is_fifty() {
        // Do not change without settling whether the intended cutoff is 30 or 50.
        assert_eq!(GapThreshold::default().max_gap, 50.0);
    }

    #[test]
    fn test_weak_boundary_is_strict() {
        let t = GapThreshold::default();
        assert!(!is_application_weak(50.0, &t));
        assert!(is_application_weak(50.0001, &t));
        assert!(!is_application_weak(-80.0, &t));
    }

    #[test]
    fn test_join_drops_one_sided_topics() {
        let stats = vec![
            ts("Math", "Algebra", DIRECT, 10, 8),
            ts("Math", "Algebra", TWISTED, 10, 2),
            ts("Math", "Calculus", DIRECT, 5, 5),
            ts("Math", "Geometry", TWISTED, 4, 1),
            ts("Math", "Geometry", "Mixed", 4, 4),
        ];
        let gaps = detect_gaps(&stats, &GapThreshold::default());
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].topic, "Algebra");
    }

    #[test]
    fn test_question_type_match_is_exact() {
        let stats = vec![
            ts("Math", "Algebra", "direct", 10, 8),
            ts("Math", "Algebra", TWISTED, 10, 2),
        ];
        assert!(detect_gaps(&stats, &GapThreshold::default()).is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        let stats = vec![
            ts("Math", "Algebra", DIRECT, 10, 7),
            ts("Math", "Algebra", TWISTED, 10, 3),
        ];
        let strict = GapThreshold { max_gap: 30.0 };
        let gaps = detect_gaps(&stats, &strict);
        assert!(gaps[0].application_weak);
        let default = detect_gaps(&stats, &GapThreshold::default());
        assert!(!default[0].application_weak);
    }

    #[test]
    fn test_weak_topics_filter() {
        let stats = vec![
            ts("Math", "Algebra", DIRECT, 10, 9),
            ts("Math", "Algebra", TWISTED, 10, 1),
            ts("Science", "Optics", DIRECT, 10, 6),
            ts("Science", "Optics", TWISTED, 10, 5),
        ];
        let gaps = detect_gaps(&stats, &GapThreshold::default());
        let weak = weak_topics(&gaps);
        assert_eq!(weak.len(), 1);
        assert_eq!(weak[0].label(), "Math - Algebra");
    }
}
