// Classifier trait — the seam between the split/evaluate flow and the model.
//
// Logistic regression is the only implementation. Anything that can fit on
// the three gap features and emit 0/1 labels can stand in for it.

use anyhow::Result;

use super::dataset::FeatureRow;

/// A binary classifier over gap feature rows.
pub trait Classifier {
    /// Fit the model. `labels` are 0 or 1 and line up with `features`.
    fn fit(&mut self, features: &[FeatureRow], labels: &[u8]) -> Result<()>;

    /// Predict a 0/1 label for each row.
    fn predict(&self, features: &[FeatureRow]) -> Vec<u8>;
}
