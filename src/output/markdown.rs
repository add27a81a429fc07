// Markdown report export.
//
// Writes the same tables as the terminal report to a .md file so a run can
// be shared or diffed. The classifier result is included when present.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::Evaluation;
use crate::pipeline::report::Report;

use super::recommend;

/// Render a report as markdown text.
pub fn render(report: &Report, evaluation: Option<&Evaluation>) -> String {
    let mut md = String::new();

    // Writing to a String cannot fail; the results are ignored.
    let _ = writeln!(md, "# Concept vs Application Gap Report\n");
    let _ = writeln!(
        md,
        "Generated {} from {} answer records. Weak means gap > {}.\n",
        report.generated_at, report.record_count, report.gap_threshold
    );

    let _ = writeln!(md, "## Subject-wise Report\n");
    let _ = writeln!(md, "| Subject | Questions | Correct | Avg time | Accuracy |");
    let _ = writeln!(md, "|---|---:|---:|---:|---:|");
    for s in &report.subjects {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {:.2} | {:.1}% |",
            s.subject, s.total_questions, s.total_correct, s.avg_time, s.accuracy
        );
    }

    let _ = writeln!(md, "\n## Topic-wise Report\n");
    let _ = writeln!(md, "| Subject | Topic | Questions | Correct | Avg time | Accuracy |");
    let _ = writeln!(md, "|---|---|---:|---:|---:|---:|");
    for t in &report.topics {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} | {:.2} | {:.1}% |",
            t.subject, t.topic, t.total_questions, t.total_correct, t.avg_time, t.accuracy
        );
    }

    let _ = writeln!(md, "\n## Question Type-wise Accuracy\n");
    let _ = writeln!(md, "| Subject | Topic | Type | Questions | Correct | Accuracy |");
    let _ = writeln!(md, "|---|---|---|---:|---:|---:|");
    for t in &report.types {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} | {} | {:.1}% |",
            t.subject, t.topic, t.question_type, t.total_questions, t.total_correct, t.accuracy
        );
    }

    let _ = writeln!(md, "\n## Concept vs Application Gap\n");
    if report.gaps.is_empty() {
        let _ = writeln!(md, "_No topics have both Direct and Twisted questions._");
    } else {
        let _ = writeln!(md, "| Subject | Topic | Direct | Twisted | Gap | Weak |");
        let _ = writeln!(md, "|---|---|---:|---:|---:|:---:|");
        for g in &report.gaps {
            let _ = writeln!(
                md,
                "| {} | {} | {:.1} | {:.1} | {:.1} | {} |",
                g.subject,
                g.topic,
                g.accuracy_direct,
                g.accuracy_twisted,
                g.accuracy_gap,
                if g.application_weak { "**yes**" } else { "no" }
            );
        }
    }

    let _ = writeln!(md, "\n## Recommended Action Plan\n");
    let recs = recommend::recommendations(&report.gaps);
    if recs.is_empty() {
        let _ = writeln!(md, "{}\n", recommend::NO_GAPS_MESSAGE);
        let _ = writeln!(md, "{}", recommend::MAINTAIN_MESSAGE);
    } else {
        let _ = writeln!(md, "**{}**", recommend::WEAK_ALERT);
        for rec in &recs {
            let _ = writeln!(md, "\n### {}\n", rec.heading());
            for step in &rec.steps {
                let _ = writeln!(md, "- {step}");
            }
        }
    }

    if let Some(eval) = evaluation {
        let _ = writeln!(md, "\n## Model Accuracy\n");
        let _ = writeln!(
            md,
            "Logistic regression on {} ({} train / {} test): **{:.4}**",
            eval.features.join(", "),
            eval.train_size,
            eval.test_size,
            eval.accuracy
        );
    }

    md
}

/// Write the markdown report to `path`, creating parent directories.
/// Returns the path written.
pub fn generate_report(
    report: &Report,
    evaluation: Option<&Evaluation>,
    path: &str,
) -> Result<String> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for report: {}", path))?;
        }
    }

    std::fs::write(path, render(report, evaluation))
        .with_context(|| format!("Failed to write report to {}", path))?;

    Ok(path.to_string())
}
