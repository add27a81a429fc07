// Binary logistic regression trained with full-batch gradient descent.
//
// Features are standardized internally (mean/std from the training set) so
// a fixed learning rate converges on percentage-scale inputs. The loss is
// mean log-loss plus an L2 penalty on the weights scaled like an inverse
// regularization strength `c`: `||w||^2 / (2 * c * n)`. The bias is not
// penalized. Training is fully deterministic: zero init, fixed iterations.

use anyhow::Result;
use serde::Serialize;

use super::dataset::FeatureRow;
use super::traits::Classifier;

const N_FEATURES: usize = 3;

/// Hyperparameters. The defaults are never tuned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticParams {
    /// Inverse L2 regularization strength (default 1.0)
    pub c: f64,
    pub learning_rate: f64,
    pub max_iter: usize,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            learning_rate: 0.1,
            max_iter: 1000,
        }
    }
}

/// A fitted (or unfitted) logistic regression model.
#[derive(Debug, Clone, Serialize)]
pub struct LogisticRegression {
    #[serde(skip)]
    params: LogisticParams,
    /// Weights in standardized feature space
    pub weights: [f64; N_FEATURES],
    pub bias: f64,
    mean: [f64; N_FEATURES],
    scale: [f64; N_FEATURES],
    fitted: bool,
}

impl LogisticRegression {
    pub fn new(params: LogisticParams) -> Self {
        Self {
            params,
            weights: [0.0; N_FEATURES],
            bias: 0.0,
            mean: [0.0; N_FEATURES],
            scale: [1.0; N_FEATURES],
            fitted: false,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Probability of label 1 for each row.
    pub fn predict_proba(&self, features: &[FeatureRow]) -> Vec<f64> {
        features
            .iter()
            .map(|row| sigmoid(self.decision(&self.standardize(row))))
            .collect()
    }

    fn standardize(&self, row: &FeatureRow) -> FeatureRow {
        let mut z = [0.0; N_FEATURES];
        for j in 0..N_FEATURES {
            z[j] = (row[j] - self.mean[j]) / self.scale[j];
        }
        z
    }

    fn decision(&self, z: &FeatureRow) -> f64 {
        self.bias
            + self
                .weights
                .iter()
                .zip(z.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(LogisticParams::default())
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, features: &[FeatureRow], labels: &[u8]) -> Result<()> {
        if features.len() != labels.len() {
            anyhow::bail!(
                "Feature/label length mismatch: {} rows, {} labels",
                features.len(),
                labels.len()
            );
        }
        if features.is_empty() {
            anyhow::bail!("Cannot fit logistic regression on an empty training set");
        }
        if labels.iter().all(|&l| l == labels[0]) {
            anyhow::bail!(
                "Training set contains only class {}; logistic regression needs both classes",
                labels[0]
            );
        }

        let n = features.len() as f64;

        for j in 0..N_FEATURES {
            let mean = features.iter().map(|r| r[j]).sum::<f64>() / n;
            let var = features.iter().map(|r| (r[j] - mean).powi(2)).sum::<f64>() / n;
            self.mean[j] = mean;
            // Constant columns keep their raw offset and contribute nothing.
            self.scale[j] = if var > 0.0 { var.sqrt() } else { 1.0 };
        }

        let z: Vec<FeatureRow> = features.iter().map(|r| self.standardize(r)).collect();
        let y: Vec<f64> = labels.iter().map(|&l| f64::from(l)).collect();

        self.weights = [0.0; N_FEATURES];
        self.bias = 0.0;
        let penalty = 1.0 / (self.params.c * n);

        for _ in 0..self.params.max_iter {
            let mut grad_w = [0.0; N_FEATURES];
            let mut grad_b = 0.0;
            for (row, target) in z.iter().zip(&y) {
                let err = sigmoid(self.decision(row)) - target;
                for j in 0..N_FEATURES {
                    grad_w[j] += err * row[j];
                }
                grad_b += err;
            }
            for j in 0..N_FEATURES {
                let g = grad_w[j] / n + penalty * self.weights[j];
                self.weights[j] -= self.params.learning_rate * g;
            }
            self.bias -= self.params.learning_rate * grad_b / n;
        }

        self.fitted = true;
        Ok(())
    }

    fn predict(&self, features: &[FeatureRow]) -> Vec<u8> {
        self.predict_proba(features)
            .into_iter()
            .map(|p| u8::from(p > 0.5))
            .collect()
    }
}

/// Numerically stable logistic function.
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Vec<FeatureRow>, Vec<u8>) {
        let features = vec![
            [90.0, 20.0, 70.0],
            [80.0, 20.0, 60.0],
            [85.0, 25.0, 60.0],
            [95.0, 30.0, 65.0],
            [70.0, 60.0, 10.0],
            [60.0, 55.0, 5.0],
            [75.0, 50.0, 25.0],
            [50.0, 60.0, -10.0],
        ];
        let labels = vec![1, 1, 1, 1, 0, 0, 0, 0];
        (features, labels)
    }

    #[test]
    fn test_sigmoid_extremes() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(!sigmoid(-800.0).is_nan());
    }

    #[test]
    fn test_fits_separable_data() {
        let (x, y) = separable();
        let mut model = LogisticRegression::default();
        model.fit(&x, &y).unwrap();
        assert!(model.is_fitted());
        assert_eq!(model.predict(&x), y);
    }

    #[test]
    fn test_probabilities_in_unit_interval() {
        let (x, y) = separable();
        let mut model = LogisticRegression::default();
        model.fit(&x, &y).unwrap();
        for p in model.predict_proba(&x) {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_rejects_single_class() {
        let mut model = LogisticRegression::default();
        let err = model
            .fit(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], &[0, 0])
            .unwrap_err();
        assert!(err.to_string().contains("both classes"));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let mut model = LogisticRegression::default();
        assert!(model.fit(&[[1.0, 2.0, 3.0]], &[0, 1]).is_err());
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = separable();
        let mut a = LogisticRegression::default();
        let mut b = LogisticRegression::default();
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.bias, b.bias);
    }
}
