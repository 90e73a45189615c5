use crate::models::{DimensionScore, FitLabel, ScoringWeights};

/// Subtracted from the combined score when the pattern is for another breed
pub const BREED_MISMATCH_PENALTY: f64 = 0.10;

/// Combine the three dimension scores into a final score (0-1) and label
///
/// Scoring formula:
/// score = (
///     neck * w_neck +
///     chest * w_chest +
///     length * w_length
/// ) / (w_neck + w_chest + w_length)
///     - 0.10 if the pattern is not for the dog's breed
///
/// then limited by any cap a dimension imposed (a roomy or snug neck keeps
/// the pattern below "Best Fit"), then clamped to [0, 1].
pub fn calculate_final_score(
    neck: &DimensionScore,
    chest: &DimensionScore,
    length: &DimensionScore,
    breed_match: bool,
    weights: &ScoringWeights,
) -> (f64, FitLabel) {
    let mut score = weighted_mean(neck.score, chest.score, length.score, weights);

    if !breed_match {
        score -= BREED_MISMATCH_PENALTY;
    }

    // Caps apply after the penalty so a capped, mismatched pattern still
    // loses the full penalty
    if let Some(cap) = [neck.cap, chest.cap, length.cap]
        .into_iter()
        .flatten()
        .reduce(f64::min)
    {
        score = score.min(cap);
    }

    let score = score.clamp(0.0, 1.0);
    (score, FitLabel::from_score(score))
}

#[inline]
fn weighted_mean(neck: f64, chest: f64, length: f64, weights: &ScoringWeights) -> f64 {
    let total = weights.total();
    if total <= 0.0 {
        return (neck + chest + length) / 3.0;
    }

    (neck * weights.neck + chest * weights.chest + length * weights.length) / total
}
