use serde::{Deserialize, Serialize};

use crate::models::domain::{FitLabel, FitResult, PatternRecord};
use crate::models::products::ProductsByType;

/// Public view of a pattern; the measurement envelope stays internal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSummary {
    pub code: String,
    pub name: String,
    pub category: String,
    pub size: String,
    #[serde(rename = "breedCode")]
    pub breed_code: String,
}

impl From<&PatternRecord> for PatternSummary {
    fn from(pattern: &PatternRecord) -> Self {
        Self {
            code: pattern.code.clone(),
            name: pattern.name.clone(),
            category: pattern.category.clone(),
            size: pattern.size.clone(),
            breed_code: pattern.breed_code().to_string(),
        }
    }
}

/// One ranked pattern in a fit response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResultView {
    pub pattern: PatternSummary,
    #[serde(rename = "finalScore")]
    pub final_score: f64,
    #[serde(rename = "fitLabel")]
    pub fit_label: FitLabel,
    #[serde(rename = "neckScore")]
    pub neck_score: f64,
    #[serde(rename = "chestScore")]
    pub chest_score: f64,
    #[serde(rename = "lengthScore")]
    pub length_score: f64,
    #[serde(rename = "breedMatch")]
    pub breed_match: bool,
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<ProductsByType>,
}

impl From<&FitResult<'_>> for FitResultView {
    fn from(result: &FitResult<'_>) -> Self {
        Self {
            pattern: PatternSummary::from(result.pattern),
            final_score: result.final_score,
            fit_label: result.fit_label,
            neck_score: result.neck_score(),
            chest_score: result.chest_score(),
            length_score: result.length_score(),
            breed_match: result.breed_match,
            notes: result.notes.clone(),
            products: None,
        }
    }
}

/// Response for the find-fit endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindFitResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "bestFit")]
    pub best_fit: Vec<FitResultView>,
    #[serde(rename = "goodFit")]
    pub good_fit: Vec<FitResultView>,
    #[serde(rename = "mightFit")]
    pub might_fit: Vec<FitResultView>,
    #[serde(rename = "totalPatterns")]
    pub total_patterns: usize,
    #[serde(rename = "breedCode")]
    pub breed_code: Option<String>,
    #[serde(rename = "usingStorefront")]
    pub using_storefront: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(rename = "catalogSize")]
    pub catalog_size: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Catalog listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternListResponse {
    pub patterns: Vec<PatternSummary>,
    pub total: usize,
}

/// Response for the products-by-pattern endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsByPatternResponse {
    #[serde(rename = "patternCode")]
    pub pattern_code: String,
    #[serde(rename = "productType", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    pub products: ProductsByType,
    pub total: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
