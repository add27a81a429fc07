// Classifier stage — predicts the application-weak label from the three
// derived accuracy features.
//
// Flow: gap rows → MlDataset → stratified split → fit → score held-out rows.
// Nothing is persisted; every run refits from scratch.

pub mod dataset;
pub mod logistic;
pub mod metrics;
pub mod traits;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::dataset::models::GapRow;
use dataset::{SplitParams, FEATURE_NAMES};
use logistic::LogisticRegression;
use traits::Classifier;

/// Outcome of one train/evaluate run.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub features: Vec<String>,
    pub train_size: usize,
    pub test_size: usize,
    /// Held-out accuracy in [0, 1]
    pub accuracy: f64,
    pub test_indices: Vec<usize>,
    pub predictions: Vec<u8>,
    pub model: LogisticRegression,
}

/// Build the dataset from gap rows, split it, fit logistic regression and
/// score it on the held-out rows.
pub fn evaluate(gaps: &[GapRow], params: &SplitParams) -> Result<Evaluation> {
    let data = dataset::build(gaps);
    let split = dataset::train_test_split(&data, params)?;

    let mut model = LogisticRegression::default();
    model.fit(&split.train_features, &split.train_labels)?;

    let predictions = model.predict(&split.test_features);
    let accuracy = metrics::accuracy_score(&split.test_labels, &predictions)?;

    info!(
        train = split.train_labels.len(),
        test = split.test_labels.len(),
        accuracy,
        "Classifier evaluated"
    );

    Ok(Evaluation {
        features: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        train_size: split.train_labels.len(),
        test_size: split.test_labels.len(),
        accuracy,
        test_indices: split.test_indices,
        predictions,
        model,
    })
}
