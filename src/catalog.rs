use std::path::Path;

use thiserror::Error;

use crate::models::{PatternRecord, Range};

const EMBEDDED_PATTERNS: &str = include_str!("../data/patterns.json");

/// Errors that can occur while loading the pattern catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid pattern {code}: {reason}")]
    InvalidRecord { code: String, reason: String },

    #[error("Duplicate pattern code: {0}")]
    DuplicateCode(String),

    #[error("Catalog contains no patterns")]
    Empty,
}

/// Immutable, validated set of garment patterns
#[derive(Debug, Clone)]
pub struct Catalog {
    patterns: Vec<PatternRecord>,
}

impl Catalog {
    /// The pattern table compiled into the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_PATTERNS)
    }

    /// Load an alternate catalog file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        tracing::info!("Loading pattern catalog from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let patterns: Vec<PatternRecord> = serde_json::from_str(raw)?;
        Self::new(patterns)
    }

    /// Validate records and build the catalog
    pub fn new(patterns: Vec<PatternRecord>) -> Result<Self, CatalogError> {
        if patterns.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, pattern) in patterns.iter().enumerate() {
            validate_record(pattern)?;
            if patterns[..index].iter().any(|other| other.code == pattern.code) {
                return Err(CatalogError::DuplicateCode(pattern.code.clone()));
            }
        }

        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[PatternRecord] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Look up a pattern by code, case-insensitively
    pub fn get(&self, code: &str) -> Option<&PatternRecord> {
        self.patterns
            .iter()
            .find(|pattern| pattern.code.eq_ignore_ascii_case(code))
    }
}

fn validate_record(pattern: &PatternRecord) -> Result<(), CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidRecord {
        code: pattern.code.clone(),
        reason,
    };

    if !pattern.code.contains('-') || pattern.breed_code().is_empty() {
        return Err(invalid("code must be BREED-SIZE".to_string()));
    }
    if !pattern.size_code().eq_ignore_ascii_case(&pattern.size) {
        return Err(invalid(format!(
            "code size {} does not match size {}",
            pattern.size_code(),
            pattern.size
        )));
    }

    let ranges: [(&str, Range); 4] = [
        ("neck", pattern.neck),
        ("chest", pattern.chest),
        ("legacyLength", pattern.legacy_length),
        ("tailSize", pattern.tail_size),
    ];
    for (name, range) in ranges {
        if range.is_degenerate() {
            return Err(invalid(format!("{} range {}..{} is empty", name, range.min, range.max)));
        }
    }

    if let Some(ideal) = pattern.ideal_neck {
        if ideal.min > ideal.max || !pattern.neck.contains_range(&ideal) {
            return Err(invalid("ideal neck must lie within the acceptable neck range".to_string()));
        }
    }

    if !(pattern.length > 0.0) {
        return Err(invalid("length must be positive".to_string()));
    }
    if pattern.tucked_length.is_some_and(|tucked| !(tucked > 0.0)) {
        return Err(invalid("tucked length must be positive".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(code: &str, neck: (f64, f64)) -> serde_json::Value {
        serde_json::json!({
            "code": code,
            "name": "Test",
            "category": "Test",
            "size": "M",
            "neck": {"min": neck.0, "max": neck.1},
            "chest": {"min": 20.0, "max": 26.0},
            "length": 18.0,
            "legacyLength": {"min": 18.0, "max": 19.0},
            "tailSize": {"min": 6.0, "max": 9.0}
        })
    }

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 91);

        let vs = catalog.get("vs-s").unwrap();
        assert_eq!(vs.neck, Range::new(12.0, 19.0));
        assert_eq!(vs.chest, Range::new(25.0, 30.75));
        assert_eq!(vs.length, 19.0);
    }

    #[test]
    fn test_tucked_lengths_only_on_sighthounds() {
        let catalog = Catalog::embedded().unwrap();
        for pattern in catalog.patterns() {
            let sighthound = crate::core::is_tucked_tail_code(pattern.breed_code());
            assert_eq!(pattern.tucked_length.is_some(), sighthound, "{}", pattern.code);
        }
    }

    #[test]
    fn test_rejects_degenerate_range() {
        let raw = serde_json::to_string(&vec![record_json("VS-M", (14.0, 14.0))]).unwrap();
        match Catalog::from_json(&raw) {
            Err(CatalogError::InvalidRecord { code, .. }) => assert_eq!(code, "VS-M"),
            other => panic!("expected invalid record, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_ideal_outside_acceptable() {
        let mut record = record_json("VS-M", (12.0, 18.0));
        record["idealNeck"] = serde_json::json!({"min": 11.0, "max": 15.0});
        let raw = serde_json::to_string(&vec![record]).unwrap();
        assert!(matches!(
            Catalog::from_json(&raw),
            Err(CatalogError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        let raw = serde_json::to_string(&vec![
            record_json("VS-M", (12.0, 18.0)),
            record_json("VS-M", (12.0, 18.0)),
        ])
        .unwrap();
        assert!(matches!(Catalog::from_json(&raw), Err(CatalogError::DuplicateCode(_))));
        assert!(matches!(Catalog::from_json("[]"), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_rejects_code_size_mismatch() {
        let raw = serde_json::to_string(&vec![record_json("VS-XL", (12.0, 18.0))]).unwrap();
        match Catalog::from_json(&raw) {
            Err(CatalogError::InvalidRecord { code, reason }) => {
                assert_eq!(code, "VS-XL");
                assert!(reason.contains("size"));
            }
            other => panic!("expected invalid record, got {:?}", other),
        }

        let raw = serde_json::to_string(&vec![record_json("-M", (12.0, 18.0))]).unwrap();
        assert!(matches!(
            Catalog::from_json(&raw),
            Err(CatalogError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::ParseError(_))));
    }
}
