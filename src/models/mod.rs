// Model exports
pub mod domain;
pub mod products;
pub mod requests;
pub mod responses;

pub use domain::{
    CategorizedResults, DimensionScore, DisqualificationReason, FitLabel, FitResult,
    MeasurementInput, PatternRecord, Range, ScoringWeights, TailType,
};
pub use products::{PatternProduct, ProductType, ProductsByType, SkuInfo};
pub use requests::{FindFitRequest, ProductsByPatternQuery};
pub use responses::{
    ErrorResponse, FindFitResponse, FitResultView, HealthResponse, PatternListResponse,
    PatternSummary, ProductsByPatternResponse,
};
