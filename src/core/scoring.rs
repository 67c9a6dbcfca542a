use crate::models::{CatalogRanges, City, Dimension, NormalizedPriorities};
use std::collections::BTreeMap;
use thiserror::Error;

/// A city whose composite score could not be computed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("{city}: non-finite {dimension} distance")]
    NonFiniteDistance { city: String, dimension: Dimension },
}

/// Position of a city's raw value within the catalog range, in [0, 1]
#[inline]
pub fn normalized_value(city: &City, dimension: Dimension, ranges: &CatalogRanges) -> f64 {
    ranges.get(dimension).normalize(dimension.raw_value(city))
}

/// Distance between a normalized value and a normalized target
#[inline]
pub fn dimension_distance(value: f64, target: f64) -> f64 {
    (value - target).abs()
}

/// Calculate the composite distance of a city from the user's priorities
///
/// Scoring formula:
/// score = mean over enabled dimensions d of |v_d - t_d|
///
/// where `v_d` is the city's value rescaled into [0, 1] against the catalog
/// range and `t_d` is the normalized target. Disabled dimensions are not in
/// `priorities` and contribute nothing, not even a zero.
///
/// # Returns
/// The composite score and the per-dimension distances.
/// `priorities` must be non-empty; an empty set yields a score of 0.
pub fn calculate_composite_score(
    city: &City,
    priorities: &NormalizedPriorities,
    ranges: &CatalogRanges,
) -> Result<(f64, BTreeMap<Dimension, f64>), ScoringError> {
    let mut distances = BTreeMap::new();
    let mut total = 0.0;

    for (dimension, target) in priorities.iter() {
        let value = normalized_value(city, dimension, ranges);
        let distance = dimension_distance(value, target);

        if !distance.is_finite() {
            return Err(ScoringError::NonFiniteDistance {
                city: city.name.clone(),
                dimension,
            });
        }

        total += distance;
        distances.insert(dimension, distance);
    }

    let score = if distances.is_empty() {
        0.0
    } else {
        total / distances.len() as f64
    };

    Ok((score, distances))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::range::compute_catalog_ranges;
    use crate::models::{Location, Politics};

    fn city(name: &str, affordability: u32, happiness: f64, rep: f64) -> City {
        City {
            name: name.to_string(),
            affordability,
            happiness,
            politics: Politics {
                dem16_frac: 40.0,
                rep16_frac: rep,
            },
            location: Location { lat: 0.0, lng: 0.0 },
            img: None,
        }
    }

    fn sample() -> Vec<City> {
        vec![
            city("Plano, TX", 265300, 72.3, 56.2),
            city("Irvine, CA", 620500, 71.86, 43.3),
        ]
    }

    #[test]
    fn test_normalized_values_at_extremes() {
        let cities = sample();
        let ranges = compute_catalog_ranges(&cities).unwrap();

        assert_eq!(normalized_value(&cities[0], Dimension::Affordability, &ranges), 0.0);
        assert_eq!(normalized_value(&cities[1], Dimension::Affordability, &ranges), 1.0);
        assert_eq!(normalized_value(&cities[0], Dimension::Happiness, &ranges), 1.0);
    }

    #[test]
    fn test_out_of_range_value_is_clamped() {
        let cities = sample();
        let ranges = compute_catalog_ranges(&cities).unwrap();
        let outlier = city("Pricey, NY", 2_000_000, 10.0, 99.0);

        for dimension in Dimension::ALL {
            let v = normalized_value(&outlier, dimension, &ranges);
            assert!((0.0..=1.0).contains(&v), "{} out of bounds: {}", dimension, v);
        }
    }

    #[test]
    fn test_composite_is_mean_of_enabled_distances() {
        let cities = sample();
        let ranges = compute_catalog_ranges(&cities).unwrap();

        let priorities: NormalizedPriorities =
            [(Dimension::Affordability, 0.0), (Dimension::Happiness, 0.0)]
                .into_iter()
                .collect();

        // Irvine: affordability distance 1, happiness distance 0
        let (score, distances) =
            calculate_composite_score(&cities[1], &priorities, &ranges).unwrap();
        assert_eq!(distances.len(), 2);
        assert_eq!(distances[&Dimension::Affordability], 1.0);
        assert_eq!(distances[&Dimension::Happiness], 0.0);
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_disabled_dimension_is_omitted() {
        let cities = sample();
        let ranges = compute_catalog_ranges(&cities).unwrap();

        let both: NormalizedPriorities =
            [(Dimension::Affordability, 0.0), (Dimension::Politics, 0.0)]
                .into_iter()
                .collect();
        let only_affordability: NormalizedPriorities =
            [(Dimension::Affordability, 0.0)].into_iter().collect();

        // Irvine: affordability distance 1, politics distance 0 (lowest rep share)
        let (with_politics, _) =
            calculate_composite_score(&cities[1], &both, &ranges).unwrap();
        let (without_politics, distances) =
            calculate_composite_score(&cities[1], &only_affordability, &ranges).unwrap();

        assert_eq!(with_politics, 0.5);
        assert_eq!(without_politics, 1.0);
        assert!(!distances.contains_key(&Dimension::Politics));
    }
}
