// Unit tests for City Match

use city_match::core::{
    calculate_composite_score, compute_catalog_ranges, dimension_distance, normalized_value,
    validate_record, CityQuartiles, QuartileBounds, RecordError,
};
use city_match::models::{
    City, CityRecord, DataView, DataViewParseError, Dimension, DimensionRange, Location,
    NormalizedPriorities, Politics, Quartile,
};

fn city(name: &str, affordability: u32, happiness: f64, rep16_frac: f64) -> City {
    City {
        name: name.to_string(),
        affordability,
        happiness,
        politics: Politics {
            dem16_frac: 100.0 - rep16_frac,
            rep16_frac,
        },
        location: Location { lat: 40.0, lng: -100.0 },
        img: None,
    }
}

fn sample() -> Vec<City> {
    vec![
        city("A", 120000, 55.0, 61.5),
        city("B", 333333, 70.1, 48.0),
        city("C", 98765, 62.7, 30.3),
        city("D", 845000, 66.6, 22.9),
        city("E", 410000, 48.2, 57.0),
    ]
}

#[test]
fn test_range_midpoint_is_exact() {
    let ranges = compute_catalog_ranges(&sample()).unwrap();
    for dimension in Dimension::ALL {
        let r = ranges.get(dimension);
        assert!(r.min <= r.mid && r.mid <= r.max);
        assert_eq!(r.mid, r.min + (r.max - r.min) / 2.0);
    }
}

#[test]
fn test_empty_catalog_has_no_ranges() {
    assert!(compute_catalog_ranges(&[]).is_err());
}

#[test]
fn test_normalized_values_stay_in_unit_interval() {
    let cities = sample();
    let ranges = compute_catalog_ranges(&cities).unwrap();

    for c in &cities {
        for dimension in Dimension::ALL {
            let v = normalized_value(c, dimension, &ranges);
            assert!((0.0..=1.0).contains(&v), "{} {} = {}", c.name, dimension, v);
        }
    }

    // Values outside the range clamp rather than escape it
    let outlier = city("Z", 2_000_000, 99.0, 0.0);
    for dimension in Dimension::ALL {
        let v = normalized_value(&outlier, dimension, &ranges);
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
fn test_degenerate_range_normalizes_to_zero() {
    let range = DimensionRange {
        min: 5.0,
        max: 5.0,
        mid: 5.0,
    };
    assert_eq!(range.normalize(5.0), 0.0);
}

#[test]
fn test_dimension_distance_is_symmetric() {
    assert_eq!(dimension_distance(0.2, 0.7), dimension_distance(0.7, 0.2));
    assert_eq!(dimension_distance(0.4, 0.4), 0.0);
}

#[test]
fn test_composite_score_is_mean_of_enabled_distances() {
    let cities = sample();
    let ranges = compute_catalog_ranges(&cities).unwrap();

    let mut priorities = NormalizedPriorities::new();
    priorities.insert(Dimension::Affordability, 0.0);
    priorities.insert(Dimension::Happiness, 1.0);

    // D is the priciest city; B the happiest
    let (score, distances) = calculate_composite_score(&cities[3], &priorities, &ranges).unwrap();
    assert_eq!(distances.len(), 2);
    assert_eq!(distances[&Dimension::Affordability], 1.0);
    let expected = (1.0 + distances[&Dimension::Happiness]) / 2.0;
    assert!((score - expected).abs() < 1e-12);
    assert!(!distances.contains_key(&Dimension::Politics));
}

#[test]
fn test_quartile_bounds_interpolate() {
    let bounds = QuartileBounds::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    assert_eq!(bounds.q1, 2.0);
    assert_eq!(bounds.q2, 3.0);
    assert_eq!(bounds.q3, 4.0);

    assert_eq!(bounds.classify(1.0), Quartile::First);
    assert_eq!(bounds.classify(2.5), Quartile::Second);
    assert_eq!(bounds.classify(3.5), Quartile::Third);
    assert_eq!(bounds.classify(5.0), Quartile::Fourth);
}

#[test]
fn test_expensive_and_unhappy_cities_are_sketchy() {
    let cities = sample();
    let quartiles = CityQuartiles::from_cities(&cities).unwrap();

    assert_eq!(quartiles.sketchy_dimensions(&cities[3]), vec![Dimension::Affordability]);
    assert_eq!(quartiles.sketchy_dimensions(&cities[4]), vec![Dimension::Happiness]);
    assert!(quartiles.sketchy_dimensions(&cities[1]).is_empty());
    assert_eq!(CityQuartiles::sketchy_quartile(Dimension::Politics), None);
}

#[test]
fn test_record_validation() {
    let record: CityRecord = serde_json::from_str(
        r#"{"affordability": 265300, "happiness": 72.3,
            "location": {"lat": 33.02, "lng": -96.70},
            "politics": {"dem16_frac": 39.2, "rep16_frac": 56.2}}"#,
    )
    .unwrap();
    let parsed = validate_record("Plano, TX", &record).unwrap();
    assert_eq!(parsed.affordability, 265300);
    assert_eq!(Dimension::Politics.raw_value(&parsed), 56.2);

    let bad: CityRecord = serde_json::from_str(
        r#"{"affordability": "cheap", "happiness": 72.3,
            "location": {"lat": 33.02, "lng": -96.70},
            "politics": {"dem16_frac": 39.2, "rep16_frac": 56.2}}"#,
    )
    .unwrap();
    assert!(matches!(
        validate_record("Plano, TX", &bad),
        Err(RecordError::MissingField { .. })
    ));
}

#[test]
fn test_data_view_keys() {
    assert_eq!("chart-view".parse::<DataView>().unwrap(), DataView::ChartView);
    assert_eq!(DataView::MapView.to_string(), "map-view");
    assert!(matches!(
        "photo-view-disabled".parse::<DataView>(),
        Err(DataViewParseError::Disabled(_))
    ));
    assert!(matches!(
        "globe-view".parse::<DataView>(),
        Err(DataViewParseError::Unknown(_))
    ));
}

#[test]
fn test_dimension_parsing() {
    assert_eq!("Happiness".parse::<Dimension>().unwrap(), Dimension::Happiness);
    assert!("weather".parse::<Dimension>().is_err());
}
