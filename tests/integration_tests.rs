// Integration tests for the pattern selector over the built-in catalog

use fit_finder::catalog::Catalog;
use fit_finder::core::{PatternSelector, DEFAULT_RESULT_LIMIT};
use fit_finder::models::{FitLabel, MeasurementInput, ScoringWeights, TailType};

fn create_input(breed: &str, neck: f64, chest: f64, back: f64, tail: TailType) -> MeasurementInput {
    MeasurementInput {
        breed: breed.to_string(),
        neck_circumference: neck,
        chest_circumference: chest,
        back_length: back,
        tail_type: tail,
        chondrodystrophic: false,
    }
}

fn vizsla() -> MeasurementInput {
    create_input("Vizsla", 13.0, 26.0, 19.5, TailType::Straight)
}

#[test]
fn test_integration_vizsla_end_to_end() {
    let catalog = Catalog::embedded().unwrap();
    let selector = PatternSelector::with_defaults();

    let result = selector.find_patterns(&vizsla(), catalog.patterns());

    let top = &result.categorized.best_fit[0];
    assert_eq!(top.pattern.code, "VS-S");
    assert!(top.breed_match);
    assert_eq!(top.fit_label, FitLabel::BestFit);
    assert!((top.final_score - 0.8587).abs() < 1e-3);
    assert!((top.neck_score() - 0.7021).abs() < 1e-3);
    assert_eq!(top.chest_score(), 1.0);
    assert!((top.length_score() - 0.8739).abs() < 1e-3);
    assert!(top
        .notes
        .iter()
        .any(|note| note.contains("chest") && note.contains("ideal range")));
}

#[test]
fn test_integration_top_three_truncation() {
    let catalog = Catalog::embedded().unwrap();
    let selector = PatternSelector::with_defaults();

    let result = selector.find_patterns(&vizsla(), catalog.patterns());
    let categorized = &result.categorized;

    // Five patterns qualify for this dog; only the best three are kept
    assert_eq!(
        categorized.total() + categorized.poor_fit.len(),
        DEFAULT_RESULT_LIMIT
    );

    let codes: Vec<&str> = categorized.iter().map(|r| r.pattern.code.as_str()).collect();
    assert_eq!(codes, vec!["VS-S", "VS-M", "WP-L"]);
}

#[test]
fn test_integration_bucket_exhaustiveness() {
    let catalog = Catalog::embedded().unwrap();
    let selector = PatternSelector::new(ScoringWeights::default(), 10);

    let input = create_input("Beagle", 13.0, 24.0, 17.0, TailType::UpOrCurly);
    let result = selector.find_patterns(&input, catalog.patterns());
    let categorized = &result.categorized;

    let buckets = [
        (&categorized.best_fit, FitLabel::BestFit),
        (&categorized.good_fit, FitLabel::GoodFit),
        (&categorized.might_fit, FitLabel::MightFit),
        (&categorized.poor_fit, FitLabel::PoorFit),
    ];

    let mut seen: Vec<&str> = Vec::new();
    for (bucket, label) in buckets {
        for fit in bucket.iter() {
            assert_eq!(fit.fit_label, label);
            assert_eq!(FitLabel::from_score(fit.final_score), label);
            assert!(!fit.disqualified);
            assert!(!seen.contains(&fit.pattern.code.as_str()), "{} appears twice", fit.pattern.code);
            seen.push(&fit.pattern.code);
        }
    }

    assert_eq!(seen.len(), 7);
}

#[test]
fn test_integration_results_sorted() {
    let catalog = Catalog::embedded().unwrap();
    let selector = PatternSelector::new(ScoringWeights::default(), 10);

    let input = create_input("Beagle", 13.0, 24.0, 17.0, TailType::UpOrCurly);
    let result = selector.find_patterns(&input, catalog.patterns());
    let scores: Vec<f64> = result.categorized.iter().map(|r| r.final_score).collect();

    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(result.categorized.best_fit[0].pattern.code, "BG-L");
}

#[test]
fn test_integration_chest_disqualification() {
    let catalog = Catalog::embedded().unwrap();
    let selector = PatternSelector::with_defaults();

    let mut input = vizsla();
    input.chest_circumference = 40.0;
    let result = selector.find_patterns(&input, catalog.patterns());

    assert!(result.categorized.is_empty());
    assert!(result.categorized.iter().all(|r| r.pattern.code != "VS-S"));
    assert!(result.patterns_analyzed > 0);
    assert_eq!(result.disqualified, result.patterns_analyzed);
}

#[test]
fn test_integration_empty_result_is_not_an_error() {
    let catalog = Catalog::embedded().unwrap();
    let selector = PatternSelector::with_defaults();

    // Garment far too short for this back length
    let input = create_input("Vizsla", 13.0, 26.0, 40.0, TailType::Straight);
    let result = selector.find_patterns(&input, catalog.patterns());

    assert!(result.categorized.best_fit.is_empty());
    assert!(result.categorized.good_fit.is_empty());
    assert!(result.categorized.might_fit.is_empty());
}

#[test]
fn test_integration_breed_penalty_toggle() {
    let catalog = Catalog::embedded().unwrap();
    let selector = PatternSelector::with_defaults();
    let pattern = catalog.get("VS-S").unwrap();

    let matched = selector.evaluate(&vizsla(), pattern);
    let mut other = vizsla();
    other.breed = "Beagle".to_string();
    let mismatched = selector.evaluate(&other, pattern);

    assert!(matched.breed_match);
    assert!(!mismatched.breed_match);
    assert!((matched.final_score - mismatched.final_score - 0.10).abs() < 1e-9);
}

#[test]
fn test_integration_unknown_breed_degrades_gracefully() {
    let catalog = Catalog::embedded().unwrap();
    let selector = PatternSelector::with_defaults();

    let mut input = vizsla();
    input.breed = "Labradoodle".to_string();
    let result = selector.find_patterns(&input, catalog.patterns());

    assert_eq!(result.breed_code, None);
    assert_eq!(result.categorized.total(), 3);
    assert!(result.categorized.iter().all(|r| !r.breed_match));
    // Without the breed bonus the closer neck fit wins
    assert_eq!(result.categorized.iter().next().unwrap().pattern.code, "WP-L");
}

#[test]
fn test_integration_tucked_tail_sighthound() {
    let catalog = Catalog::embedded().unwrap();
    let selector = PatternSelector::with_defaults();

    let input = create_input("Whippet", 12.0, 24.0, 20.0, TailType::DownTucked);
    let result = selector.find_patterns(&input, catalog.patterns());

    let codes: Vec<&str> = result.categorized.iter().map(|r| r.pattern.code.as_str()).collect();
    assert_eq!(codes, vec!["WP-L"]);

    let fit = result.categorized.iter().next().unwrap();
    assert_eq!(fit.fit_label, FitLabel::BestFit);
    assert!(fit.notes.iter().any(|n| n.contains("tucked tail")));
}

#[test]
fn test_integration_unknown_tail_type() {
    let catalog = Catalog::embedded().unwrap();
    let selector = PatternSelector::with_defaults();

    let mut input = vizsla();
    input.tail_type = TailType::Unknown;
    let result = selector.find_patterns(&input, catalog.patterns());

    assert!(!result.categorized.is_empty());
    for fit in result.categorized.iter() {
        assert_eq!(fit.length_score(), 0.75);
    }
}

#[test]
fn test_integration_chondrodystrophic_note_only() {
    let catalog = Catalog::embedded().unwrap();
    let selector = PatternSelector::with_defaults();

    let plain = selector.find_patterns(&vizsla(), catalog.patterns());
    let mut input = vizsla();
    input.chondrodystrophic = true;
    let chondro = selector.find_patterns(&input, catalog.patterns());

    let plain_scores: Vec<f64> = plain.categorized.iter().map(|r| r.final_score).collect();
    let chondro_scores: Vec<f64> = chondro.categorized.iter().map(|r| r.final_score).collect();
    assert_eq!(plain_scores, chondro_scores);

    for fit in chondro.categorized.iter() {
        assert!(fit.notes.last().unwrap().contains("chondrodystrophic"));
    }
}

#[test]
fn test_integration_chest_weighted_variant() {
    let catalog = Catalog::embedded().unwrap();
    let selector = PatternSelector::new(ScoringWeights::chest_weighted(), DEFAULT_RESULT_LIMIT);
    let pattern = catalog.get("VS-S").unwrap();

    let fit = selector.evaluate(&vizsla(), pattern);
    let expected = 0.35 * fit.neck_score() + 0.40 * fit.chest_score() + 0.25 * fit.length_score();
    assert!((fit.final_score - expected).abs() < 1e-9);
}
