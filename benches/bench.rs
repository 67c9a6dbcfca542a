// Criterion benchmarks for City Match

use city_match::core::{compute_catalog_ranges, CityQuartiles, Ranker};
use city_match::models::{City, Dimension, Location, NormalizedPriorities, Politics};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_city(id: usize) -> City {
    let rep16_frac = (id * 37 % 1000) as f64 / 10.0;
    City {
        name: format!("City {}", id),
        affordability: 50_000 + (id * 7919 % 900_000) as u32,
        happiness: 30.0 + (id * 31 % 450) as f64 / 10.0,
        politics: Politics {
            dem16_frac: 100.0 - rep16_frac,
            rep16_frac,
        },
        location: Location {
            lat: 25.0 + (id % 240) as f64 / 10.0,
            lng: -125.0 + (id % 570) as f64 / 10.0,
        },
        img: None,
    }
}

fn create_catalog(size: usize) -> Vec<City> {
    (0..size).map(create_city).collect()
}

fn all_priorities() -> NormalizedPriorities {
    [
        (Dimension::Affordability, 0.2),
        (Dimension::Happiness, 0.9),
        (Dimension::Politics, 0.5),
    ]
    .into_iter()
    .collect()
}

fn bench_catalog_ranges(c: &mut Criterion) {
    let cities = create_catalog(1000);
    c.bench_function("catalog_ranges_1000", |b| {
        b.iter(|| compute_catalog_ranges(black_box(&cities)));
    });
}

fn bench_quartiles(c: &mut Criterion) {
    let cities = create_catalog(1000);
    c.bench_function("quartiles_1000", |b| {
        b.iter(|| CityQuartiles::from_cities(black_box(&cities)));
    });
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let priorities = all_priorities();

    for size in [100, 1000, 10000].iter() {
        let cities = create_catalog(*size);
        let ranker = match compute_catalog_ranges(&cities) {
            Ok(ranges) => Ranker::new(ranges),
            Err(_) => continue,
        };

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| ranker.rank(black_box(&cities), black_box(&priorities)));
        });
    }

    group.finish();
}

fn bench_rank_and_project(c: &mut Criterion) {
    let cities = create_catalog(1000);
    let priorities = all_priorities();
    let ranker = match compute_catalog_ranges(&cities) {
        Ok(ranges) => Ranker::new(ranges),
        Err(_) => return,
    };

    c.bench_function("rank_and_project_top10", |b| {
        b.iter(|| {
            ranker
                .rank(black_box(&cities), black_box(&priorities))
                .ranking
                .project(10)
        });
    });
}

criterion_group!(
    benches,
    bench_catalog_ranges,
    bench_quartiles,
    bench_rank,
    bench_rank_and_project
);
criterion_main!(benches);
