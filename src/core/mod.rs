// Fit engine exports
pub mod breed;
pub mod dimensions;
pub mod filters;
pub mod scoring;
pub mod selector;

pub use breed::{available_breeds, is_tucked_tail_code, normalize_breed};
pub use dimensions::{score_chest, score_length, score_neck, LengthCurve};
pub use filters::{is_breed_match, neck_within_pattern};
pub use scoring::{calculate_final_score, BREED_MISMATCH_PENALTY};
pub use selector::{pattern_length_for, rank_results, PatternSelector, SelectionResult, DEFAULT_RESULT_LIMIT};
