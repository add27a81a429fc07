use anyhow::Result;

/// Fraction of predictions that match the true labels, in [0, 1].
pub fn accuracy_score(truth: &[u8], predicted: &[u8]) -> Result<f64> {
    if truth.len() != predicted.len() {
        anyhow::bail!(
            "accuracy_score: {} true labels vs {} predictions",
            truth.len(),
            predicted.len()
        );
    }
    if truth.is_empty() {
        anyhow::bail!("accuracy_score: no samples to score");
    }
    let hits = truth.iter().zip(predicted).filter(|(t, p)| t == p).count();
    Ok(hits as f64 / truth.len() as f64)
}
