use crate::models::{CatalogRanges, City, Dimension, DimensionRange};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("cannot compute {0} range of an empty catalog")]
    EmptyCatalog(&'static str),
}

/// Compute min, max and midpoint of a numeric field across `cities`
///
/// # Arguments
/// * `cities` - Non-empty city collection
/// * `selector` - Extracts the field from a city
///
/// # Returns
/// `mid = min + (max - min) / 2`, the midpoint of the extremes
pub fn compute_range<F>(cities: &[City], selector: F) -> Option<DimensionRange>
where
    F: Fn(&City) -> f64,
{
    let mut values = cities.iter().map(selector);
    let first = values.next()?;

    let (min, max) = values.fold((first, first), |(min, max), v| (min.min(v), max.max(v)));

    Some(DimensionRange {
        min,
        max,
        mid: min + (max - min) / 2.0,
    })
}

/// Compute the ranges of every ranking dimension
pub fn compute_catalog_ranges(cities: &[City]) -> Result<CatalogRanges, RangeError> {
    let range_of = |dimension: Dimension| {
        compute_range(cities, |city| dimension.raw_value(city))
            .ok_or(RangeError::EmptyCatalog(dimension.as_str()))
    };

    Ok(CatalogRanges {
        affordability: range_of(Dimension::Affordability)?,
        happiness: range_of(Dimension::Happiness)?,
        politics: range_of(Dimension::Politics)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, Politics};

    fn city(name: &str, affordability: u32, happiness: f64, rep: f64) -> City {
        City {
            name: name.to_string(),
            affordability,
            happiness,
            politics: Politics {
                dem16_frac: 100.0 - rep - 5.0,
                rep16_frac: rep,
            },
            location: Location { lat: 0.0, lng: 0.0 },
            img: None,
        }
    }

    #[test]
    fn test_range_midpoint_of_extremes() {
        let cities = vec![
            city("Plano, TX", 265300, 72.3, 56.2),
            city("Irvine, CA", 620500, 71.86, 43.3),
            city("Madison, WI", 290000, 71.2, 30.1),
        ];

        let range = compute_range(&cities, |c| c.affordability as f64).unwrap();
        assert_eq!(range.min, 265300.0);
        assert_eq!(range.max, 620500.0);
        assert_eq!(range.mid, 442900.0);
    }

    #[test]
    fn test_range_invariant_holds() {
        let cities = vec![
            city("A", 100, 50.0, 10.0),
            city("B", 300, 40.0, 90.0),
            city("C", 200, 60.0, 50.0),
        ];
        let ranges = compute_catalog_ranges(&cities).unwrap();

        for dimension in Dimension::ALL {
            let r = ranges.get(dimension);
            assert!(r.min <= r.mid && r.mid <= r.max);
            assert_eq!(r.mid, r.min + (r.max - r.min) / 2.0);
        }
    }

    #[test]
    fn test_single_city_range_is_degenerate() {
        let cities = vec![city("Solo", 1000, 55.0, 40.0)];
        let range = compute_range(&cities, |c| c.happiness).unwrap();
        assert_eq!(range.min, 55.0);
        assert_eq!(range.max, 55.0);
        assert_eq!(range.mid, 55.0);
    }

    #[test]
    fn test_empty_catalog_is_an_error() {
        assert!(compute_range(&[], |c| c.happiness).is_none());
        assert_eq!(
            compute_catalog_ranges(&[]),
            Err(RangeError::EmptyCatalog("affordability"))
        );
    }
}
