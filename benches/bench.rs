// Criterion benchmarks for Fit Finder

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fit_finder::catalog::Catalog;
use fit_finder::core::{score_chest, score_length, score_neck, PatternSelector};
use fit_finder::models::{MeasurementInput, Range, TailType};

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

fn bench_dimension_scorers(c: &mut Criterion) {
    let neck = Range::new(12.0, 19.0);
    let chest = Range::new(23.0, 30.0);

    c.bench_function("score_neck", |b| {
        b.iter(|| score_neck(black_box(13.0), black_box(neck), black_box(None)))
    });

    c.bench_function("score_chest", |b| {
        b.iter(|| score_chest(black_box(26.0), black_box(chest)))
    });

    c.bench_function("score_length", |b| {
        b.iter(|| score_length(black_box(19.5), black_box(20.0), black_box(TailType::Straight)))
    });
}

fn bench_selection(c: &mut Criterion) {
    let catalog = match Catalog::embedded() {
        Ok(catalog) => catalog,
        Err(e) => panic!("embedded catalog failed to load: {}", e),
    };
    let selector = PatternSelector::with_defaults();

    let dogs = [
        ("vizsla", create_input("Vizsla", 13.0, 26.0, 19.5, TailType::Straight)),
        ("whippet", create_input("Whippet", 12.0, 24.0, 20.0, TailType::DownTucked)),
        ("beagle", create_input("Beagle", 13.0, 24.0, 17.0, TailType::UpOrCurly)),
        ("unknown_breed", create_input("Labradoodle", 13.0, 26.0, 19.5, TailType::Unknown)),
    ];

    let mut group = c.benchmark_group("find_patterns");

    for (name, input) in dogs.iter() {
        group.bench_with_input(BenchmarkId::new("catalog", name), input, |b, input| {
            b.iter(|| selector.find_patterns(black_box(input), black_box(catalog.patterns())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dimension_scorers, bench_selection);

criterion_main!(benches);
