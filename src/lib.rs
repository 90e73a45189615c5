//! Fit Finder - dog garment pattern fitting service
//!
//! This library provides the fit-scoring engine used by the Fit Finder
//! storefront widget. It scores a fixed catalog of garment patterns against
//! a dog's measurements and ranks the best candidates.

pub mod catalog;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError};
pub use core::{normalize_breed, PatternSelector, SelectionResult};
pub use models::{
    CategorizedResults, FitLabel, FitResult, MeasurementInput, PatternRecord, ScoringWeights,
    TailType,
};
