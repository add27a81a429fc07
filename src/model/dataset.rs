// ML dataset construction and the seeded, stratified train/test split.
//
// One sample per gap row. The label is `application_weak` as 0/1, which is
// a pure function of the third feature, so the problem is trivially
// separable. That is fine: the classifier is a demo, not a model.

use std::collections::BTreeMap;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::dataset::models::GapRow;

/// Feature column names, in row order.
pub const FEATURE_NAMES: [&str; 3] = ["accuracy_direct", "accuracy_twisted", "accuracy_gap"];

/// One feature vector: direct accuracy, twisted accuracy, gap.
pub type FeatureRow = [f64; 3];

/// Features and labels built from the gap table.
#[derive(Debug, Clone, Serialize)]
pub struct MlDataset {
    pub features: Vec<FeatureRow>,
    /// 1 = application weak
    pub labels: Vec<u8>,
}

impl MlDataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Build the classifier dataset from gap rows.
pub fn build(gaps: &[GapRow]) -> MlDataset {
    MlDataset {
        features: gaps
            .iter()
            .map(|g| [g.accuracy_direct, g.accuracy_twisted, g.accuracy_gap])
            .collect(),
        labels: gaps.iter().map(|g| u8::from(g.application_weak)).collect(),
    }
}

/// Parameters for `train_test_split`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitParams {
    /// Fraction held out for testing (default 0.3)
    pub test_size: f64,
    /// RNG seed (default 42)
    pub seed: u64,
    /// Keep label proportions equal on both sides (default true)
    pub stratify: bool,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            test_size: 0.3,
            seed: 42,
            stratify: true,
        }
    }
}

/// The two halves of a split, plus the source row indices for each side.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
    pub train_features: Vec<FeatureRow>,
    pub train_labels: Vec<u8>,
    pub test_features: Vec<FeatureRow>,
    pub test_labels: Vec<u8>,
}

/// Split a dataset into train and test sets.
///
/// The test side gets `ceil(test_size * n)` rows. With stratification each
/// class contributes to the test side in proportion to its size, and every
/// class keeps at least one row on each side. When rounding and that floor
/// pull against each other, the row count wins over exact proportions.
/// The same seed and input always give the same split.
pub fn train_test_split(dataset: &MlDataset, params: &SplitParams) -> Result<Split> {
    let n = dataset.len();
    if !(params.test_size > 0.0 && params.test_size < 1.0) {
        anyhow::bail!("test_size must be between 0 and 1, got {}", params.test_size);
    }

    let n_test = (params.test_size * n as f64).ceil() as usize;
    let n_train = n.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        anyhow::bail!(
            "Cannot split {n} samples with test_size={}: one side would be empty",
            params.test_size
        );
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut test_indices = Vec::with_capacity(n_test);

    if params.stratify {
        let mut by_class: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
        for (i, &label) in dataset.labels.iter().enumerate() {
            by_class.entry(label).or_default().push(i);
        }

        if let Some((label, members)) = by_class.iter().find(|(_, m)| m.len() < 2) {
            anyhow::bail!(
                "Cannot stratify: class {label} has only {} sample(s), need at least 2",
                members.len()
            );
        }
        if n_test < by_class.len() || n_train < by_class.len() {
            anyhow::bail!(
                "Cannot stratify {n} samples into {n_train} train / {n_test} test across {} classes",
                by_class.len()
            );
        }

        let counts: Vec<usize> = by_class.values().map(Vec::len).collect();
        let allocation = allocate_test_counts(&counts, n, n_test);

        for (members, take) in by_class.values_mut().zip(allocation) {
            members.shuffle(&mut rng);
            test_indices.extend_from_slice(&members[..take]);
        }
    } else {
        let mut all: Vec<usize> = (0..n).collect();
        all.shuffle(&mut rng);
        test_indices.extend_from_slice(&all[..n_test]);
    }

    test_indices.sort_unstable();
    let train_indices: Vec<usize> = (0..n).filter(|i| test_indices.binary_search(i).is_err()).collect();

    let pick = |idx: &[usize]| -> (Vec<FeatureRow>, Vec<u8>) {
        idx.iter()
            .map(|&i| (dataset.features[i], dataset.labels[i]))
            .unzip()
    };
    let (train_features, train_labels) = pick(&train_indices);
    let (test_features, test_labels) = pick(&test_indices);

    Ok(Split {
        train_indices,
        test_indices,
        train_features,
        train_labels,
        test_features,
        test_labels,
    })
}

/// Per-class test counts: proportional share of `n_test`, every class kept
/// within `[1, count - 1]`, and the total always exactly `n_test`.
///
/// Callers guarantee `classes <= n_test <= n - classes` and `count >= 2` per
/// class, so the bounds always admit a solution. Rows go to (or come from)
/// the class whose allocation is furthest below (or above) its share; ties
/// keep class order.
fn allocate_test_counts(counts: &[usize], n: usize, n_test: usize) -> Vec<usize> {
    let shares: Vec<f64> = counts
        .iter()
        .map(|&c| c as f64 * n_test as f64 / n as f64)
        .collect();
    let mut alloc: Vec<usize> = shares
        .iter()
        .zip(counts)
        .map(|(s, &c)| (s.floor() as usize).clamp(1, c - 1))
        .collect();
    let mut total: usize = alloc.iter().sum();

    while total < n_test {
        let next = (0..counts.len())
            .filter(|&i| alloc[i] < counts[i] - 1)
            .min_by(|&a, &b| {
                let da = shares[a] - alloc[a] as f64;
                let db = shares[b] - alloc[b] as f64;
                db.total_cmp(&da)
            });
        let Some(i) = next else { break };
        alloc[i] += 1;
        total += 1;
    }
    while total > n_test {
        let next = (0..counts.len())
            .filter(|&i| alloc[i] > 1)
            .min_by(|&a, &b| {
                let da = shares[a] - alloc[a] as f64;
                let db = shares[b] - alloc[b] as f64;
                da.total_cmp(&db)
            });
        let Some(i) = next else { break };
        alloc[i] -= 1;
        total -= 1;
    }
    alloc
}
