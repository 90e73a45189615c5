use std::cmp::Ordering;

use crate::core::{
    breed::{is_tucked_tail_code, normalize_breed},
    dimensions::{score_chest, score_length, score_neck},
    filters::{is_breed_match, neck_within_pattern},
    scoring::calculate_final_score,
};
use crate::models::{
    CategorizedResults, DimensionScore, DisqualificationReason, FitResult, MeasurementInput,
    PatternRecord, ScoringWeights, TailType,
};

/// Number of patterns recommended when no limit is configured
pub const DEFAULT_RESULT_LIMIT: usize = 3;

const TUCKED_TAIL_NOTE: &str =
    "This pattern is cut with extra length to keep a tucked tail covered.";
const CHONDRODYSTROPHIC_NOTE: &str = "Our patterns will generally fit the body/torso of chondrodystrophic pups, but in some cases the raincoat skirting may be too long and cause movement restrictions. We encourage you to try on your new product and promptly initiate a return if it does not fit.";

/// Result of the selection process
#[derive(Debug)]
pub struct SelectionResult<'a> {
    pub categorized: CategorizedResults<'a>,
    /// Patterns that survived the neck pre-filter
    pub patterns_analyzed: usize,
    /// Patterns excluded by one of the dimension scorers
    pub disqualified: usize,
    pub breed_code: Option<&'static str>,
}

/// Pattern selection orchestrator
///
/// # Pipeline Stages
/// 1. Neck range pre-filter
/// 2. Neck, chest and length scoring (stops at the first disqualification)
/// 3. Aggregation into a final score and label
/// 4. Ranking, truncation and bucketing
#[derive(Debug, Clone)]
pub struct PatternSelector {
    weights: ScoringWeights,
    limit: usize,
}

impl PatternSelector {
    pub fn new(weights: ScoringWeights, limit: usize) -> Self {
        Self { weights, limit }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_RESULT_LIMIT)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Rank the catalog for one dog
    ///
    /// Never fails: unknown breeds lose the breed bonus, unknown tail
    /// postures get a neutral length score, and a dog that fits nothing
    /// gets empty buckets.
    pub fn find_patterns<'a>(
        &self,
        input: &MeasurementInput,
        catalog: &'a [PatternRecord],
    ) -> SelectionResult<'a> {
        let breed_code = normalize_breed(&input.breed);

        let candidates: Vec<&'a PatternRecord> = catalog
            .iter()
            .filter(|pattern| neck_within_pattern(pattern, input.neck_circumference))
            .collect();
        let patterns_analyzed = candidates.len();

        let evaluated: Vec<FitResult<'a>> = candidates
            .into_iter()
            .map(|pattern| self.evaluate_with_code(input, pattern, breed_code))
            .collect();

        let evaluated_count = evaluated.len();
        let mut qualified: Vec<FitResult<'a>> =
            evaluated.into_iter().filter(|result| !result.disqualified).collect();
        let disqualified = evaluated_count - qualified.len();

        rank_results(&mut qualified);
        qualified.truncate(self.limit);

        let categorized = CategorizedResults::from_ranked(qualified);

        tracing::info!(
            breed = %input.breed,
            breed_code = breed_code.unwrap_or("-"),
            patterns_analyzed,
            disqualified,
            best_fit = categorized.best_fit.len(),
            good_fit = categorized.good_fit.len(),
            might_fit = categorized.might_fit.len(),
            top = categorized.iter().next().map(|r| r.pattern.code.as_str()).unwrap_or("none"),
            "Pattern selection complete"
        );

        SelectionResult {
            categorized,
            patterns_analyzed,
            disqualified,
            breed_code,
        }
    }

    /// Score a single pattern for one dog
    pub fn evaluate<'a>(&self, input: &MeasurementInput, pattern: &'a PatternRecord) -> FitResult<'a> {
        self.evaluate_with_code(input, pattern, normalize_breed(&input.breed))
    }

    fn evaluate_with_code<'a>(
        &self,
        input: &MeasurementInput,
        pattern: &'a PatternRecord,
        breed_code: Option<&str>,
    ) -> FitResult<'a> {
        let breed_match = is_breed_match(pattern, breed_code);

        let neck = score_neck(input.neck_circumference, pattern.neck, pattern.ideal_neck);
        if neck.disqualified {
            return excluded(pattern, breed_match, DisqualificationReason::Neck, neck, None, None);
        }

        let chest = score_chest(input.chest_circumference, pattern.chest);
        if chest.disqualified {
            return excluded(pattern, breed_match, DisqualificationReason::Chest, neck, Some(chest), None);
        }

        let garment_length = pattern_length_for(pattern, input.tail_type);
        let length = score_length(input.back_length, garment_length, input.tail_type);
        if length.disqualified {
            tracing::debug!(
                pattern = %pattern.code,
                ratio = garment_length / input.back_length,
                length_score = length.score,
                "Pattern disqualified: {}",
                DisqualificationReason::Length
            );
            return FitResult::excluded(
                pattern,
                breed_match,
                DisqualificationReason::Length,
                neck,
                chest,
                length,
            );
        }

        let (final_score, fit_label) =
            calculate_final_score(&neck, &chest, &length, breed_match, &self.weights);

        let mut notes: Vec<String> = [&neck, &chest, &length]
            .into_iter()
            .filter_map(|dimension| dimension.note.clone())
            .collect();
        if uses_tucked_length(pattern, input.tail_type) {
            notes.push(TUCKED_TAIL_NOTE.to_string());
        }
        if input.chondrodystrophic {
            notes.push(CHONDRODYSTROPHIC_NOTE.to_string());
        }

        tracing::debug!(
            pattern = %pattern.code,
            neck = neck.score,
            chest = chest.score,
            length = length.score,
            ratio = garment_length / input.back_length,
            breed_match,
            final_score,
            label = %fit_label,
            "Pattern scored"
        );

        FitResult {
            pattern,
            neck,
            chest,
            length,
            final_score,
            fit_label,
            breed_match,
            notes,
            disqualified: false,
            disqualification_reason: None,
        }
    }
}

impl Default for PatternSelector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn excluded<'a>(
    pattern: &'a PatternRecord,
    breed_match: bool,
    reason: DisqualificationReason,
    neck: DimensionScore,
    chest: Option<DimensionScore>,
    length: Option<DimensionScore>,
) -> FitResult<'a> {
    tracing::debug!(pattern = %pattern.code, "Pattern disqualified: {}", reason);
    FitResult::excluded(
        pattern,
        breed_match,
        reason,
        neck,
        chest.unwrap_or_else(DimensionScore::not_evaluated),
        length.unwrap_or_else(DimensionScore::not_evaluated),
    )
}

#[inline]
fn uses_tucked_length(pattern: &PatternRecord, tail: TailType) -> bool {
    tail == TailType::DownTucked && is_tucked_tail_code(pattern.breed_code())
}

/// Garment length to score against for a tail posture
pub fn pattern_length_for(pattern: &PatternRecord, tail: TailType) -> f64 {
    if uses_tucked_length(pattern, tail) {
        pattern.tucked_length.unwrap_or(pattern.length)
    } else {
        pattern.length
    }
}

/// Sort by final score (descending), then neck score, then chest score
///
/// The sort is stable so full ties keep catalog order.
pub fn rank_results(results: &mut [FitResult<'_>]) {
    results.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.neck_score()
                    .partial_cmp(&a.neck_score())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| {
                b.chest_score()
                    .partial_cmp(&a.chest_score())
                    .unwrap_or(Ordering::Equal)
            })
    });
}
