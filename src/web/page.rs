// Server-rendered dashboard page.
//
// Plain HTML with inline CSS. The subject accuracy chart is a row of CSS
// bars; no JavaScript is needed. Every string coming from the dataset goes
// through `escape_html`.

use std::fmt::Write as _;

use crate::dataset::models::{AnswerRecord, GapRow, SubjectStats, TopicStats, TypeStats};
use crate::output::recommend;
use crate::pipeline::report::Report;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem auto;max-width:1100px;color:#222}\
h1{font-size:1.6rem}h2{margin-top:2rem;border-bottom:1px solid #ddd;padding-bottom:.3rem}\
table{border-collapse:collapse;width:100%;font-size:.9rem}\
th,td{padding:.3rem .6rem;border-bottom:1px solid #eee;text-align:left}\
td.num,th.num{text-align:right}\
.alert{padding:.8rem 1rem;border-radius:6px;margin:.8rem 0}\
.error{background:#fdecea;color:#8a1c14}.success{background:#e7f6ea;color:#1e5e2b}\
.warning{background:#fff6e0;color:#6b4b00}\
.weak{color:#b3261e;font-weight:600}\
.chart{display:flex;align-items:flex-end;gap:1rem;height:220px;padding:.5rem;border-left:1px solid #ccc;border-bottom:1px solid #ccc}\
.bar{display:flex;flex-direction:column;align-items:center;justify-content:flex-end;height:100%;min-width:60px}\
.bar div{background:#4a7bd0;width:40px}\
.bar span{font-size:.8rem;margin-top:.2rem}";

/// Escape text for an HTML body or attribute value.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the whole dashboard.
pub fn render_dashboard(report: &Report, all_subjects: &[String], filter: Option<&str>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!doctype html><html><head><meta charset=\"utf-8\">\
         <title>Performance Analytics Dashboard</title><style>{STYLE}</style></head><body>"
    );
    let _ = write!(
        html,
        "<h1>Performance Analytics Dashboard</h1>\
         <p>Concept vs application gap detection &middot; {} records &middot; generated {}</p>",
        report.record_count,
        escape_html(&report.generated_at)
    );

    render_filter(&mut html, all_subjects, filter);

    let _ = write!(html, "<h2>Raw Data</h2>");
    render_preview(&mut html, &report.preview);

    let _ = write!(html, "<h2>Subject-wise Report</h2>");
    render_subjects(&mut html, &report.subjects);

    let _ = write!(html, "<h2>Topic-wise Report</h2>");
    render_topics(&mut html, &report.topics);

    let _ = write!(html, "<h2>Question-Type Analysis</h2>");
    render_types(&mut html, &report.types);

    let _ = write!(html, "<h2>Concept vs Application Gap Detection</h2>");
    render_gaps(&mut html, &report.gaps, report.gap_threshold);

    let _ = write!(html, "<h2>Recommended Action Plan</h2>");
    render_recommendations(&mut html, &report.gaps);

    let _ = write!(html, "<h2>Subject Accuracy Visualization</h2>");
    render_chart(&mut html, &report.subjects);

    html.push_str("</body></html>");
    html
}

fn render_filter(html: &mut String, subjects: &[String], filter: Option<&str>) {
    let _ = write!(
        html,
        "<form method=\"get\" action=\"/\"><label>Subject: <select name=\"subject\" \
         onchange=\"this.form.submit()\"><option value=\"\">All subjects</option>"
    );
    for s in subjects {
        let selected = if Some(s.as_str()) == filter { " selected" } else { "" };
        let escaped = escape_html(s);
        let _ = write!(html, "<option value=\"{escaped}\"{selected}>{escaped}</option>");
    }
    html.push_str("</select></label> <noscript><button type=\"submit\">Apply</button></noscript></form>");
}

fn render_preview(html: &mut String, rows: &[AnswerRecord]) {
    html.push_str(
        "<table><tr><th>subject</th><th>topic</th><th>question_type</th>\
         <th class=\"num\">correct</th><th class=\"num\">time_taken</th></tr>",
    );
    for r in rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{:.1}</td></tr>",
            escape_html(&r.subject),
            escape_html(&r.topic),
            escape_html(&r.question_type),
            u8::from(r.correct),
            r.time_taken
        );
    }
    html.push_str("</table>");
}

fn render_subjects(html: &mut String, rows: &[SubjectStats]) {
    html.push_str(
        "<table><tr><th>subject</th><th class=\"num\">total_questions</th>\
         <th class=\"num\">total_correct</th><th class=\"num\">avg_time</th>\
         <th class=\"num\">accuracy</th></tr>",
    );
    for s in rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>\
             <td class=\"num\">{:.2}</td><td class=\"num\">{:.2}</td></tr>",
            escape_html(&s.subject),
            s.total_questions,
            s.total_correct,
            s.avg_time,
            s.accuracy
        );
    }
    html.push_str("</table>");
}

// The dashboard topic table has no timing column.
fn render_topics(html: &mut String, rows: &[TopicStats]) {
    html.push_str(
        "<table><tr><th>subject</th><th>topic</th><th class=\"num\">total_questions</th>\
         <th class=\"num\">total_correct</th><th class=\"num\">accuracy</th></tr>",
    );
    for t in rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>\
             <td class=\"num\">{:.2}</td></tr>",
            escape_html(&t.subject),
            escape_html(&t.topic),
            t.total_questions,
            t.total_correct,
            t.accuracy
        );
    }
    html.push_str("</table>");
}

fn render_types(html: &mut String, rows: &[TypeStats]) {
    html.push_str(
        "<table><tr><th>subject</th><th>topic</th><th>question_type</th>\
         <th class=\"num\">total_questions</th><th class=\"num\">total_correct</th>\
         <th class=\"num\">accuracy</th></tr>",
    );
    for t in rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{}</td>\
             <td class=\"num\">{}</td><td class=\"num\">{:.2}</td></tr>",
            escape_html(&t.subject),
            escape_html(&t.topic),
            escape_html(&t.question_type),
            t.total_questions,
            t.total_correct,
            t.accuracy
        );
    }
    html.push_str("</table>");
}

fn render_gaps(html: &mut String, gaps: &[GapRow], threshold: f64) {
    html.push_str(
        "<table><tr><th>subject</th><th>topic</th><th class=\"num\">accuracy_direct</th>\
         <th class=\"num\">accuracy_twisted</th><th class=\"num\">accuracy_gap</th>\
         <th>application_weak</th></tr>",
    );
    for g in gaps {
        let weak = if g.application_weak {
            "<span class=\"weak\">true</span>"
        } else {
            "false"
        };
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{:.2}</td><td class=\"num\">{:.2}</td>\
             <td class=\"num\">{:.2}</td><td>{weak}</td></tr>",
            escape_html(&g.subject),
            escape_html(&g.topic),
            g.accuracy_direct,
            g.accuracy_twisted,
            g.accuracy_gap
        );
    }
    html.push_str("</table>");
    let _ = write!(html, "<p><small>Weak means gap &gt; {threshold}.</small></p>");

    let weak: Vec<&GapRow> = gaps.iter().filter(|g| g.application_weak).collect();
    if weak.is_empty() {
        let _ = write!(
            html,
            "<div class=\"alert success\">{}</div>",
            recommend::NO_GAPS_MESSAGE
        );
    } else {
        let _ = write!(html, "<div class=\"alert error\">{}<ul>", recommend::WEAK_ALERT);
        for g in weak {
            let _ = write!(html, "<li>{}</li>", escape_html(&g.label()));
        }
        html.push_str("</ul></div>");
    }
}

fn render_recommendations(html: &mut String, gaps: &[GapRow]) {
    let recs = recommend::recommendations(gaps);
    if recs.is_empty() {
        let _ = write!(
            html,
            "<div class=\"alert success\">{}</div>",
            recommend::MAINTAIN_MESSAGE
        );
        return;
    }
    for rec in &recs {
        let _ = write!(
            html,
            "<div class=\"alert warning\"><strong>{}</strong><ul>",
            escape_html(&rec.heading())
        );
        for step in &rec.steps {
            let _ = write!(html, "<li>{}</li>", escape_html(step));
        }
        html.push_str("</ul></div>");
    }
}

fn render_chart(html: &mut String, subjects: &[SubjectStats]) {
    html.push_str("<div class=\"chart\">");
    for s in subjects {
        let height = s.accuracy.clamp(0.0, 100.0);
        let _ = write!(
            html,
            "<div class=\"bar\" title=\"{name}: {acc:.1}%\"><div style=\"height:{height:.1}%\"></div>\
             <span>{name}</span><span>{acc:.1}%</span></div>",
            name = escape_html(&s.subject),
            acc = s.accuracy,
        );
    }
    html.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::gap::GapThreshold;
    use crate::pipeline::report::build;

    fn rec(subject: &str, topic: &str, qt: &str, correct: bool) -> AnswerRecord {
        AnswerRecord {
            subject: subject.to_string(),
            topic: topic.to_string(),
            question_type: qt.to_string(),
            correct,
            time_taken: 20.0,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"R&D\"</b>"),
            "&lt;b&gt;&quot;R&amp;D&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_dashboard_shows_alert_and_plan_for_weak_topic() {
        let records = vec![
            rec("Math", "Algebra", "Direct", true),
            rec("Math", "Algebra", "Twisted", false),
        ];
        let report = build(&records, &GapThreshold::default());
        let html = render_dashboard(&report, &["Math".to_string()], None);
        assert!(html.contains(recommend::WEAK_ALERT));
        assert!(html.contains("Math - Algebra"));
        assert!(html.contains("Practice 20 twisted/application-based questions"));
        assert!(html.contains("Subject Accuracy Visualization"));
    }

    #[test]
    fn test_dashboard_success_when_no_gaps() {
        let records = vec![
            rec("Math", "Algebra", "Direct", true),
            rec("Math", "Algebra", "Twisted", true),
        ];
        let report = build(&records, &GapThreshold::default());
        let html = render_dashboard(&report, &["Math".to_string()], Some("Math"));
        assert!(html.contains(recommend::NO_GAPS_MESSAGE));
        assert!(html.contains(recommend::MAINTAIN_MESSAGE));
        assert!(html.contains("<option value=\"Math\" selected>"));
    }

    #[test]
    fn test_dataset_strings_are_escaped() {
        let records = vec![rec("<script>", "x", "Direct", true)];
        let report = build(&records, &GapThreshold::default());
        let html = render_dashboard(&report, &["<script>".to_string()], None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
