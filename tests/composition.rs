// Composition tests — the stages chained together from a CSV file.
//
//   CSV → records → report (subject/topic/type/gap) → classifier → markdown
//
// Fixtures are written to the system temp directory; the bundled sample
// dataset under data/ is used as a realistic end-to-end input.

use std::path::PathBuf;

use gapscan::analysis::gap::GapThreshold;
use gapscan::dataset;
use gapscan::model::dataset::SplitParams;
use gapscan::model::evaluate;
use gapscan::output::terminal::GapView;
use gapscan::output::{markdown, recommend};
use gapscan::pipeline::report::{build, filter_subject};

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("gapscan-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

fn sample_path() -> String {
    format!("{}/data/student_data.csv", env!("CARGO_MANIFEST_DIR"))
}

fn algebra_csv() -> String {
    let mut csv = String::from("subject,topic,question_type,correct,time_taken\n");
    for i in 0..10 {
        csv.push_str(&format!("Math,Algebra,Direct,{},30\n", u8::from(i < 8)));
        csv.push_str(&format!("Math,Algebra,Twisted,{},60\n", u8::from(i < 2)));
    }
    for i in 0..4 {
        csv.push_str(&format!("Math,Geometry,Direct,{},45\n", u8::from(i < 3)));
    }
    csv
}

// ============================================================
// CSV -> Report
// ============================================================

#[test]
fn csv_file_to_gap_report() {
    let path = write_fixture("algebra.csv", &algebra_csv());
    let records = dataset::load(path.to_str().unwrap()).unwrap();
    assert_eq!(records.len(), 24);

    let report = build(&records, &GapThreshold::default());
    assert_eq!(report.subjects.len(), 1);
    assert_eq!(report.subjects[0].total_questions, 24);
    // (10*30 + 10*60 + 4*45) / 24
    assert!((report.subjects[0].avg_time - 45.0).abs() < 1e-9);

    // Geometry has no Twisted rows and drops out of the gap table.
    assert_eq!(report.topics.len(), 2);
    assert_eq!(report.gaps.len(), 1);
    let g = &report.gaps[0];
    assert!((g.accuracy_gap - 60.0).abs() < 1e-9);
    assert!(g.application_weak);

    let recs = recommend::recommendations(&report.gaps);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].heading(), "Math - Algebra");

    let _ = std::fs::remove_file(path);
}

#[test]
fn malformed_csv_surfaces_context() {
    let path = write_fixture(
        "bad.csv",
        "subject,topic,question_type,correct,time_taken\nMath,Algebra,Direct,1,fast\n",
    );
    let err = dataset::load(path.to_str().unwrap()).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("line 2"), "got: {chain}");
    let _ = std::fs::remove_file(path);
}

// ============================================================
// Bundled sample dataset, end to end
// ============================================================

#[test]
fn sample_dataset_full_pipeline() {
    let records = dataset::load(&sample_path()).unwrap();
    let report = build(&records, &GapThreshold::default());

    assert_eq!(report.subjects.len(), 3);
    assert!(report
        .subjects
        .iter()
        .all(|s| (0.0..=100.0).contains(&s.accuracy)));

    // "Periodic Table" only has Direct questions.
    assert!(report.topics.iter().any(|t| t.topic == "Periodic Table"));
    assert!(!report.gaps.iter().any(|g| g.topic == "Periodic Table"));

    let weak: Vec<String> = report.weak_topics().iter().map(|g| g.label()).collect();
    assert_eq!(
        weak,
        [
            "Chemistry - Stoichiometry",
            "Math - Algebra",
            "Math - Probability",
            "Physics - Motion",
        ]
    );

    let params = SplitParams::default();
    let first = evaluate(&report.gaps, &params).unwrap();
    let second = evaluate(&report.gaps, &params).unwrap();
    assert!((0.0..=1.0).contains(&first.accuracy));
    assert_eq!(first.test_indices, second.test_indices);
    assert_eq!(first.accuracy, second.accuracy);
}

#[test]
fn subject_filter_reruns_pipeline_on_subset() {
    let records = dataset::load(&sample_path()).unwrap();
    let math = filter_subject(&records, "Math");
    let report = build(&math, &GapThreshold::default());
    assert_eq!(report.subjects.len(), 1);
    assert!(report.gaps.iter().all(|g| g.subject == "Math"));
    assert_eq!(report.weak_topics().len(), 2);
}

#[test]
fn weak_only_view_over_joined_but_healthy_topics() {
    let records = dataset::from_reader(
        "subject,topic,question_type,correct,time_taken\n\
         Math,Algebra,Direct,1,10\n\
         Math,Algebra,Twisted,1,20\n"
            .as_bytes(),
    )
    .unwrap();
    let report = build(&records, &GapThreshold::default());
    assert_eq!(report.gaps.len(), 1);

    assert_eq!(GapView::All.rows(&report.gaps).len(), 1);
    assert!(GapView::WeakOnly.rows(&report.gaps).is_empty());
    assert_eq!(GapView::WeakOnly.empty_message(), "No application-weak topics.");
}

// ============================================================
// Report -> Markdown
// ============================================================

#[test]
fn markdown_report_contains_every_section() {
    let records = dataset::load(&sample_path()).unwrap();
    let report = build(&records, &GapThreshold::default());
    let eval = evaluate(&report.gaps, &SplitParams::default()).unwrap();

    let path = std::env::temp_dir()
        .join(format!("gapscan-{}", std::process::id()))
        .join("report.md");
    let written =
        markdown::generate_report(&report, Some(&eval), path.to_str().unwrap()).unwrap();
    let md = std::fs::read_to_string(&written).unwrap();

    for heading in [
        "## Subject-wise Report",
        "## Topic-wise Report",
        "## Question Type-wise Accuracy",
        "## Concept vs Application Gap",
        "## Recommended Action Plan",
        "## Model Accuracy",
    ] {
        assert!(md.contains(heading), "missing {heading}");
    }
    assert!(md.contains("### Math - Algebra"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn markdown_without_weak_topics_says_so() {
    let records = dataset::from_reader(
        "subject,topic,question_type,correct,time_taken\n\
         Math,Algebra,Direct,1,10\n\
         Math,Algebra,Twisted,1,20\n"
            .as_bytes(),
    )
    .unwrap();
    let report = build(&records, &GapThreshold::default());
    let md = markdown::render(&report, None);
    assert!(md.contains(recommend::NO_GAPS_MESSAGE));
    assert!(!md.contains("## Model Accuracy"));
}
