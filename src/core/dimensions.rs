use std::f64::consts::LN_2;

use crate::models::{DimensionScore, Range, TailType};

/// Lowest neck score for a measurement inside the acceptable range
pub const NECK_FLOOR: f64 = 0.5;

/// Ceiling on the combined score when the neck is roomy or snug
pub const NECK_NOTE_CAP: f64 = 0.79;

/// Lowest chest score for a measurement inside the acceptable range
pub const CHEST_FLOOR: f64 = 0.6;

/// Chest score at the acceptable minimum
pub const CHEST_LOW_EDGE_SCORE: f64 = 0.85;

/// Ideal chest sits this far above the acceptable minimum
pub const CHEST_IDEAL_OFFSET: f64 = 1.0;

/// Length scores below this disqualify the pattern
pub const LENGTH_THRESHOLD: f64 = 0.75;

const NECK_ROOMY_NOTE: &str = "The neck on this pattern may be slightly roomy for your pup.";
const NECK_SNUG_NOTE: &str =
    "The neck on this pattern may be slightly snug for your pup, but it is within the acceptable range.";
const CHEST_IDEAL_NOTE: &str = "The chest on this pattern is within the ideal range for your pup.";
const CHEST_ACCEPTABLE_NOTE: &str =
    "The chest fit on this pattern falls within the acceptable range for your pup's measurements.";
const LENGTH_TUCKED_NOTE: &str =
    "This pattern will provide some extra coverage for your pup without interfering with tail function.";
const LENGTH_STRAIGHT_NOTE: &str =
    "This pattern should land at just the right spot for your pup without impeding tail function or risk of soiling.";
const LENGTH_SHORT_TAIL_NOTE: &str =
    "This pattern should provide sufficient coverage for your pup without impeding tail function or risk of soiling.";
const LENGTH_GENERIC_NOTE: &str = "This pattern should provide adequate coverage for your pup.";

/// Score the neck against a pattern's acceptable and ideal bounds
///
/// Inside the acceptable range the score follows a two-piece Gaussian
/// centred between the innermost bounds, with each half scaled so the
/// curve is exactly 0.5 at its acceptable bound.
pub fn score_neck(measured: f64, acceptable: Range, ideal: Option<Range>) -> DimensionScore {
    if !acceptable.contains(measured) {
        return DimensionScore::disqualified();
    }

    let ideal = ideal.unwrap_or(acceptable);
    let mut bounds = [acceptable.min, ideal.min, ideal.max, acceptable.max];
    bounds.sort_by(f64::total_cmp);
    let center = (bounds[1] + bounds[2]) / 2.0;

    let score = asymmetric_gaussian(measured, center, acceptable.min, acceptable.max)
        .clamp(NECK_FLOOR, 1.0);

    if measured < ideal.min {
        DimensionScore::pass(score, Some(NECK_ROOMY_NOTE.to_string())).with_cap(NECK_NOTE_CAP)
    } else if measured > ideal.max {
        DimensionScore::pass(score, Some(NECK_SNUG_NOTE.to_string())).with_cap(NECK_NOTE_CAP)
    } else {
        DimensionScore::pass(score, None)
    }
}

/// Two-piece Gaussian with height 0.5 at `low` and at `high`
#[inline]
fn asymmetric_gaussian(x: f64, center: f64, low: f64, high: f64) -> f64 {
    let half_width = if x <= center { center - low } else { high - center };
    if half_width <= f64::EPSILON {
        return 1.0;
    }

    // exp(-w² / 2σ²) = 0.5  =>  σ = w / sqrt(2 ln 2)
    let sigma = half_width / (2.0 * LN_2).sqrt();
    let d = x - center;
    (-(d * d) / (2.0 * sigma * sigma)).exp()
}

/// Score the chest against a pattern's acceptable range
///
/// Piecewise linear: 0.85 at the minimum, 1.0 one unit above it, then
/// falling to 0.6 at the maximum.
pub fn score_chest(measured: f64, acceptable: Range) -> DimensionScore {
    if !acceptable.contains(measured) {
        return DimensionScore::disqualified();
    }

    let ideal = acceptable.min + CHEST_IDEAL_OFFSET;

    let score = if measured == ideal {
        1.0
    } else if measured < ideal {
        let position = (measured - acceptable.min) / (ideal - acceptable.min);
        CHEST_LOW_EDGE_SCORE + position * (1.0 - CHEST_LOW_EDGE_SCORE)
    } else {
        let position = (measured - ideal) / (acceptable.max - ideal);
        1.0 - position * (1.0 - CHEST_FLOOR)
    };

    let note = if (measured - ideal).abs() <= CHEST_IDEAL_OFFSET {
        CHEST_IDEAL_NOTE
    } else {
        CHEST_ACCEPTABLE_NOTE
    };

    DimensionScore::pass(score.clamp(CHEST_FLOOR, 1.0), Some(note.to_string()))
}

/// Acceptable band and ideal point for pattern-to-dog length ratios
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthCurve {
    pub low: f64,
    pub ideal: f64,
    pub high: f64,
}

impl LengthCurve {
    /// Curve for a tail posture; `None` for an unknown posture
    pub fn for_tail(tail: TailType) -> Option<Self> {
        match tail {
            TailType::DownTucked => Some(Self { low: 1.05, ideal: 1.15, high: 1.25 }),
            TailType::Straight => Some(Self { low: 0.90, ideal: 1.05, high: 1.10 }),
            TailType::BobbedDocked | TailType::UpOrCurly => {
                Some(Self { low: 0.90, ideal: 0.95, high: 1.05 })
            }
            TailType::Unknown => None,
        }
    }

    /// Five-zone piecewise linear score for a length ratio
    ///
    /// 0.75 at both band edges and 1.0 at the ideal point. Outside the band
    /// the score falls linearly to 0 at ratio 0 below, and at twice the
    /// upper edge above.
    pub fn score(&self, ratio: f64) -> f64 {
        if !ratio.is_finite() || ratio <= 0.0 {
            return 0.0;
        }

        let edge = LENGTH_THRESHOLD;
        if ratio < self.low {
            edge * ratio / self.low
        } else if ratio <= self.ideal {
            let span = self.ideal - self.low;
            if span <= f64::EPSILON {
                return 1.0;
            }
            edge + (ratio - self.low) / span * (1.0 - edge)
        } else if ratio <= self.high {
            1.0 - (ratio - self.ideal) / (self.high - self.ideal) * (1.0 - edge)
        } else {
            edge * (1.0 - (ratio - self.high) / self.high).max(0.0)
        }
    }
}

/// Score a garment length against the dog's back length
///
/// `pattern_length` must already be the figure appropriate to the tail
/// posture (see `PatternRecord` tucked-tail lengths).
pub fn score_length(back_length: f64, pattern_length: f64, tail: TailType) -> DimensionScore {
    let Some(curve) = LengthCurve::for_tail(tail) else {
        return DimensionScore::pass(LENGTH_THRESHOLD, Some(LENGTH_GENERIC_NOTE.to_string()));
    };

    let ratio = pattern_length / back_length;
    let score = curve.score(ratio).clamp(0.0, 1.0);

    let note = match tail {
        TailType::DownTucked => LENGTH_TUCKED_NOTE,
        TailType::Straight => LENGTH_STRAIGHT_NOTE,
        _ => LENGTH_SHORT_TAIL_NOTE,
    };

    DimensionScore {
        score,
        note: Some(note.to_string()),
        disqualified: score < LENGTH_THRESHOLD,
        cap: None,
    }
}
