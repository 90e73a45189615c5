use crate::models::PatternRecord;

/// Check if a pattern's neck range can hold the dog's neck
///
/// Stage 1 of the selection pipeline; anything rejected here never
/// reaches the scorers.
#[inline]
pub fn neck_within_pattern(pattern: &PatternRecord, neck: f64) -> bool {
    pattern.neck.contains(neck)
}

/// Check if a pattern was drafted for the dog's (normalized) breed
#[inline]
pub fn is_breed_match(pattern: &PatternRecord, breed_code: Option<&str>) -> bool {
    breed_code.is_some_and(|code| pattern.breed_code() == code)
}
