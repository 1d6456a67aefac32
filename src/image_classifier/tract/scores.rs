use crate::error::ClassifyError;
use crate::image_classifier::interface::Classification;

pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        exps.iter().map(|e| e / sum).collect()
    } else {
        exps
    }
}

/// Pairs scores with labels and keeps the `top_k` best, highest first.
pub fn rank(
    scores: &[f32],
    labels: &[String],
    top_k: usize,
) -> Result<Vec<Classification>, ClassifyError> {
    if scores.len() != labels.len() {
        return Err(ClassifyError::UnexpectedOutput {
            outputs: scores.len(),
            labels: labels.len(),
        });
    }

    let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(top_k);

    Ok(ranked
        .into_iter()
        .map(|(index, confidence)| Classification::new(labels[index].clone(), confidence))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probabilities = softmax(&[2.0, 1.0, 0.1, -3.0]);
        let sum: f32 = probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
        assert!(probabilities[0] > probabilities[1]);
    }

    #[test]
    fn test_softmax_handles_large_logits() {
        let probabilities = softmax(&[1000.0, 1000.0]);
        assert!((probabilities[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rank_orders_descending_and_truncates() {
        let result = rank(
            &[0.1, 0.7, 0.05, 0.15],
            &labels(&["apple", "pretzel", "salad", "cake"]),
            2,
        )
        .unwrap();

        assert_eq!(
            result,
            vec![
                Classification::new("pretzel", 0.7),
                Classification::new("cake", 0.15),
            ]
        );
    }

    #[test]
    fn test_rank_rejects_label_mismatch() {
        let result = rank(&[0.5, 0.5], &labels(&["apple"]), 5);
        assert_eq!(
            result,
            Err(ClassifyError::UnexpectedOutput {
                outputs: 2,
                labels: 1
            })
        );
    }

    #[test]
    fn test_rank_empty_output() {
        assert_eq!(rank(&[], &[], 5), Ok(vec![]));
    }
}
