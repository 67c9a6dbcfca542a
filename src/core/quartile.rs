use crate::models::{City, Dimension, Quartile};
use serde::Serialize;

/// Lower quartile, median and upper quartile of one dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuartileBounds {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl QuartileBounds {
    /// Compute bounds by linear interpolation between order statistics.
    /// Returns `None` for an empty slice.
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        Some(Self {
            q1: percentile(&values, 0.25),
            q2: percentile(&values, 0.50),
            q3: percentile(&values, 0.75),
        })
    }

    /// Which quartile `value` falls in.
    ///
    /// Values equal to a bound fall toward the middle, so a catalog with no
    /// spread puts everything in the second quartile.
    pub fn classify(&self, value: f64) -> Quartile {
        if value < self.q1 {
            Quartile::First
        } else if value > self.q3 {
            Quartile::Fourth
        } else if value <= self.q2 {
            Quartile::Second
        } else {
            Quartile::Third
        }
    }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Catalog-wide quartiles used to flag outlier cities.
///
/// This is a display annotation and never feeds the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CityQuartiles {
    pub affordability: QuartileBounds,
    pub happiness: QuartileBounds,
    pub politics: QuartileBounds,
}

impl CityQuartiles {
    pub fn from_cities(cities: &[City]) -> Option<Self> {
        let bounds = |dimension: Dimension| {
            QuartileBounds::from_values(cities.iter().map(|c| dimension.raw_value(c)).collect())
        };

        Some(Self {
            affordability: bounds(Dimension::Affordability)?,
            happiness: bounds(Dimension::Happiness)?,
            politics: bounds(Dimension::Politics)?,
        })
    }

    pub fn bounds(&self, dimension: Dimension) -> &QuartileBounds {
        match dimension {
            Dimension::Affordability => &self.affordability,
            Dimension::Happiness => &self.happiness,
            Dimension::Politics => &self.politics,
        }
    }

    /// Quartile of a raw value for `dimension`
    pub fn quartile(&self, dimension: Dimension, raw: f64) -> Quartile {
        self.bounds(dimension).classify(raw)
    }

    /// Quartile of the city's own value for `dimension`
    pub fn city_quartile(&self, city: &City, dimension: Dimension) -> Quartile {
        self.quartile(dimension, dimension.raw_value(city))
    }

    /// The quartile that marks a city as sketchy on `dimension`, if any.
    ///
    /// Most expensive quarter for affordability, least happy quarter for
    /// happiness. Politics has no undesirable direction.
    pub fn sketchy_quartile(dimension: Dimension) -> Option<Quartile> {
        match dimension {
            Dimension::Affordability => Some(Quartile::Fourth),
            Dimension::Happiness => Some(Quartile::First),
            Dimension::Politics => None,
        }
    }

    pub fn is_sketchy(&self, city: &City, dimension: Dimension) -> bool {
        Self::sketchy_quartile(dimension)
            .map(|q| self.city_quartile(city, dimension) == q)
            .unwrap_or(false)
    }

    /// Dimensions on which the city is sketchy, in dimension order
    pub fn sketchy_dimensions(&self, city: &City) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|d| self.is_sketchy(city, *d))
            .collect()
    }
}
