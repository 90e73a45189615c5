use serde::{Deserialize, Serialize};
use std::fmt;

/// Tail carriage of the dog being fitted
///
/// Only used to pick the length-scoring curve and, for tucked-tail
/// patterns, the alternate garment length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TailType {
    #[serde(rename = "down/tucked")]
    DownTucked,
    #[serde(rename = "bobbed/docked")]
    BobbedDocked,
    #[serde(rename = "straight")]
    Straight,
    #[serde(rename = "up or curly")]
    UpOrCurly,
    /// Anything the form did not send as one of the four postures
    #[serde(rename = "unknown")]
    #[serde(other)]
    Unknown,
}

impl TailType {
    /// The four postures offered by the form, in display order
    pub fn all() -> [TailType; 4] {
        [
            TailType::DownTucked,
            TailType::BobbedDocked,
            TailType::Straight,
            TailType::UpOrCurly,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TailType::DownTucked => "down/tucked",
            TailType::BobbedDocked => "bobbed/docked",
            TailType::Straight => "straight",
            TailType::UpOrCurly => "up or curly",
            TailType::Unknown => "unknown",
        }
    }

    /// Case-insensitive parse of a form label; anything else is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "down/tucked" => TailType::DownTucked,
            "bobbed/docked" => TailType::BobbedDocked,
            "straight" => TailType::Straight,
            "up or curly" => TailType::UpOrCurly,
            _ => TailType::Unknown,
        }
    }
}

impl fmt::Display for TailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The dog being fitted
///
/// Measurements share one linear unit (inches in the shipped catalog) and
/// are validated as positive before they reach the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementInput {
    pub breed: String,
    #[serde(rename = "neckCircumference")]
    pub neck_circumference: f64,
    #[serde(rename = "chestCircumference")]
    pub chest_circumference: f64,
    #[serde(rename = "backLength")]
    pub back_length: f64,
    #[serde(rename = "tailType")]
    pub tail_type: TailType,
    #[serde(default)]
    pub chondrodystrophic: bool,
}

/// Closed measurement interval [min, max]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    pub fn contains_range(&self, other: &Range) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.min < self.max)
    }
}

/// A garment cutting template for one breed/size combination
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecord {
    /// Breed/size code, e.g. `VS-XS`
    pub code: String,
    pub name: String,
    pub category: String,
    pub size: String,
    pub neck: Range,
    #[serde(default)]
    pub ideal_neck: Option<Range>,
    pub chest: Range,
    /// Standard garment length
    pub length: f64,
    /// Longer variant used for tucked-tail breeds
    #[serde(default)]
    pub tucked_length: Option<f64>,
    pub legacy_length: Range,
    pub tail_size: Range,
}

impl PatternRecord {
    /// Breed part of the code (`VS` for `VS-XS`)
    pub fn breed_code(&self) -> &str {
        self.code.split('-').next().unwrap_or(&self.code)
    }

    /// Size part of the code (`XS` for `VS-XS`)
    pub fn size_code(&self) -> &str {
        self.code
            .split_once('-')
            .map(|(_, size)| size)
            .unwrap_or(&self.size)
    }
}

/// Score for one (dog, pattern, dimension) triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub score: f64,
    pub note: Option<String>,
    pub disqualified: bool,
    /// Ceiling the aggregator must apply to the combined score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap: Option<f64>,
}

impl DimensionScore {
    pub fn pass(score: f64, note: Option<String>) -> Self {
        Self {
            score,
            note,
            disqualified: false,
            cap: None,
        }
    }

    pub fn disqualified() -> Self {
        Self {
            score: 0.0,
            note: None,
            disqualified: true,
            cap: None,
        }
    }

    /// Placeholder for a dimension skipped after an earlier disqualification
    pub fn not_evaluated() -> Self {
        Self {
            score: 0.0,
            note: None,
            disqualified: false,
            cap: None,
        }
    }

    pub fn with_cap(mut self, cap: f64) -> Self {
        self.cap = Some(cap);
        self
    }
}

/// Discrete fit category derived from the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitLabel {
    #[serde(rename = "Best Fit")]
    BestFit,
    #[serde(rename = "Good Fit")]
    GoodFit,
    #[serde(rename = "Might Fit")]
    MightFit,
    #[serde(rename = "Poor Fit")]
    PoorFit,
}

impl FitLabel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            FitLabel::BestFit
        } else if score >= 0.65 {
            FitLabel::GoodFit
        } else if score >= 0.50 {
            FitLabel::MightFit
        } else {
            FitLabel::PoorFit
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FitLabel::BestFit => "Best Fit",
            FitLabel::GoodFit => "Good Fit",
            FitLabel::MightFit => "Might Fit",
            FitLabel::PoorFit => "Poor Fit",
        }
    }
}

impl fmt::Display for FitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a pattern was excluded for a dog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisqualificationReason {
    Neck,
    Chest,
    Length,
}

impl fmt::Display for DisqualificationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisqualificationReason::Neck => f.write_str("Neck measurement outside acceptable range"),
            DisqualificationReason::Chest => f.write_str("Chest measurement outside acceptable range"),
            DisqualificationReason::Length => f.write_str("Length score below minimum threshold"),
        }
    }
}

/// Fit of one pattern for one dog
#[derive(Debug, Clone)]
pub struct FitResult<'a> {
    pub pattern: &'a PatternRecord,
    pub neck: DimensionScore,
    pub chest: DimensionScore,
    pub length: DimensionScore,
    pub final_score: f64,
    pub fit_label: FitLabel,
    pub breed_match: bool,
    pub notes: Vec<String>,
    pub disqualified: bool,
    pub disqualification_reason: Option<DisqualificationReason>,
}

impl<'a> FitResult<'a> {
    /// Result for a pattern excluded by one of the dimension checks
    pub fn excluded(
        pattern: &'a PatternRecord,
        breed_match: bool,
        reason: DisqualificationReason,
        neck: DimensionScore,
        chest: DimensionScore,
        length: DimensionScore,
    ) -> Self {
        Self {
            pattern,
            neck,
            chest,
            length,
            final_score: 0.0,
            fit_label: FitLabel::PoorFit,
            breed_match,
            notes: Vec::new(),
            disqualified: true,
            disqualification_reason: Some(reason),
        }
    }

    #[inline]
    pub fn neck_score(&self) -> f64 {
        self.neck.score
    }

    #[inline]
    pub fn chest_score(&self) -> f64 {
        self.chest.score
    }

    #[inline]
    pub fn length_score(&self) -> f64 {
        self.length.score
    }
}

/// Top results partitioned by fit label
#[derive(Debug, Clone, Default)]
pub struct CategorizedResults<'a> {
    pub best_fit: Vec<FitResult<'a>>,
    pub good_fit: Vec<FitResult<'a>>,
    pub might_fit: Vec<FitResult<'a>>,
    /// Kept for completeness; not shown to shoppers
    pub poor_fit: Vec<FitResult<'a>>,
}

impl<'a> CategorizedResults<'a> {
    pub fn from_ranked(ranked: Vec<FitResult<'a>>) -> Self {
        let mut categorized = Self::default();
        for result in ranked {
            match result.fit_label {
                FitLabel::BestFit => categorized.best_fit.push(result),
                FitLabel::GoodFit => categorized.good_fit.push(result),
                FitLabel::MightFit => categorized.might_fit.push(result),
                FitLabel::PoorFit => categorized.poor_fit.push(result),
            }
        }
        categorized
    }

    /// Number of displayable results (best + good + might)
    pub fn total(&self) -> usize {
        self.best_fit.len() + self.good_fit.len() + self.might_fit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Displayable results in bucket order
    pub fn iter(&self) -> impl Iterator<Item = &FitResult<'a>> {
        self.best_fit
            .iter()
            .chain(self.good_fit.iter())
            .chain(self.might_fit.iter())
    }
}

/// Relative weight of each dimension in the final score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub neck: f64,
    pub chest: f64,
    pub length: f64,
}

impl ScoringWeights {
    /// Plain mean of the three dimensions
    pub fn equal() -> Self {
        Self {
            neck: 1.0 / 3.0,
            chest: 1.0 / 3.0,
            length: 1.0 / 3.0,
        }
    }

    /// Neck 35%, chest 40%, length 25%
    pub fn chest_weighted() -> Self {
        Self {
            neck: 0.35,
            chest: 0.40,
            length: 0.25,
        }
    }

    pub fn total(&self) -> f64 {
        self.neck + self.chest + self.length
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::equal()
    }
}
