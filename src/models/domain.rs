use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One ranking axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Affordability,
    Happiness,
    Politics,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Affordability,
        Dimension::Happiness,
        Dimension::Politics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Affordability => "affordability",
            Dimension::Happiness => "happiness",
            Dimension::Politics => "politics",
        }
    }

    /// Raw scalar used for ranging and ranking.
    /// Politics ranks on the republican vote share; the democratic share is informational.
    #[inline]
    pub fn raw_value(&self, city: &City) -> f64 {
        match self {
            Dimension::Affordability => city.affordability as f64,
            Dimension::Happiness => city.happiness,
            Dimension::Politics => city.politics.rep16_frac,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown dimension key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dimension: {0}")]
pub struct UnknownDimension(pub String);

impl FromStr for Dimension {
    type Err = UnknownDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "affordability" => Ok(Dimension::Affordability),
            "happiness" => Ok(Dimension::Happiness),
            "politics" => Ok(Dimension::Politics),
            other => Err(UnknownDimension(other.to_string())),
        }
    }
}

/// 2016 presidential vote shares, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Politics {
    pub dem16_frac: f64,
    pub rep16_frac: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Longitude on x, latitude on y
    pub fn point(&self) -> geo::Point<f64> {
        geo::Point::new(self.lng, self.lat)
    }
}

/// Photo attribution shown alongside a city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCredit {
    #[serde(rename = "imgAuthor")]
    pub author: String,
    #[serde(rename = "imgLic")]
    pub license: String,
    #[serde(rename = "imgSrc")]
    pub source: String,
}

/// A validated catalog city. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// "Name, ST" key
    pub name: String,
    /// Median home price in local currency, lower is cheaper
    pub affordability: u32,
    /// Higher is happier
    pub happiness: f64,
    pub politics: Politics,
    pub location: Location,
    #[serde(default)]
    pub img: Option<ImageCredit>,
}

/// City record as it appears in the catalog source, before validation.
///
/// Numeric fields are optional so that one malformed record can be
/// excluded without rejecting the whole catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityRecord {
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub affordability: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub happiness: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub politics: Option<PoliticsRecord>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub location: Option<LocationRecord>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub img: Option<ImageCredit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoliticsRecord {
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub dem16_frac: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub rep16_frac: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationRecord {
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::lenient")]
    pub lng: Option<f64>,
}

/// Observed extremes of one dimension across the catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionRange {
    pub min: f64,
    pub max: f64,
    /// Midpoint of the extremes, not the median
    pub mid: f64,
}

impl DimensionRange {
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Rescale `value` into [0, 1], clamping anything outside the range.
    /// A zero-width range maps everything to 0.
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Ranges for all three dimensions, computed once per catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatalogRanges {
    pub affordability: DimensionRange,
    pub happiness: DimensionRange,
    pub politics: DimensionRange,
}

impl CatalogRanges {
    #[inline]
    pub fn get(&self, dimension: Dimension) -> &DimensionRange {
        match dimension {
            Dimension::Affordability => &self.affordability,
            Dimension::Happiness => &self.happiness,
            Dimension::Politics => &self.politics,
        }
    }
}

/// Enabled dimensions mapped to their target rescaled into [0, 1].
/// Disabled dimensions are absent, not zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedPriorities(BTreeMap<Dimension, f64>);

impl NormalizedPriorities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dimension: Dimension, target: f64) {
        self.0.insert(dimension, target.clamp(0.0, 1.0));
    }

    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.0.get(&dimension).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.0.iter().map(|(d, t)| (*d, *t))
    }
}

impl FromIterator<(Dimension, f64)> for NormalizedPriorities {
    fn from_iter<I: IntoIterator<Item = (Dimension, f64)>>(iter: I) -> Self {
        let mut priorities = Self::new();
        for (dimension, target) in iter {
            priorities.insert(dimension, target);
        }
        priorities
    }
}

/// A city annotated with its composite distance from the user's priorities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCity<'a> {
    pub city: &'a City,
    /// Mean normalized distance over enabled dimensions, lower is better
    pub score: f64,
    /// Per-dimension normalized distances, for the chart display
    pub distances: BTreeMap<Dimension, f64>,
}

/// Position of a raw value within the catalog distribution, ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quartile {
    First,
    Second,
    Third,
    Fourth,
}

impl Quartile {
    pub fn number(&self) -> u8 {
        match self {
            Quartile::First => 1,
            Quartile::Second => 2,
            Quartile::Third => 3,
            Quartile::Fourth => 4,
        }
    }
}

/// Display modes of the results page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataView {
    #[default]
    #[serde(rename = "photo-view")]
    PhotoView,
    #[serde(rename = "table-view")]
    TableView,
    #[serde(rename = "chart-view")]
    ChartView,
    #[serde(rename = "map-view")]
    MapView,
}

impl DataView {
    pub const ALL: [DataView; 4] = [
        DataView::PhotoView,
        DataView::TableView,
        DataView::ChartView,
        DataView::MapView,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataView::PhotoView => "photo-view",
            DataView::TableView => "table-view",
            DataView::ChartView => "chart-view",
            DataView::MapView => "map-view",
        }
    }

    /// Photos and map tiles are fetched remotely
    pub fn requires_network(&self) -> bool {
        match self {
            DataView::PhotoView | DataView::MapView => true,
            DataView::TableView | DataView::ChartView => false,
        }
    }

    pub fn is_available(&self, online: bool) -> bool {
        online || !self.requires_network()
    }

    /// View to fall back to when the preferred one is unavailable
    pub fn fallback(online: bool) -> DataView {
        if online {
            DataView::PhotoView
        } else {
            DataView::TableView
        }
    }
}

impl fmt::Display for DataView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a data view key was not accepted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataViewParseError {
    /// A view key carrying the `-disabled` marker used while offline
    #[error("data view is disabled: {0}")]
    Disabled(String),
    #[error("unknown data view: {0}")]
    Unknown(String),
}

impl FromStr for DataView {
    type Err = DataViewParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Some(view) = DataView::ALL.into_iter().find(|v| v.as_str() == key) {
            return Ok(view);
        }

        match key.strip_suffix("-disabled") {
            Some(base) if DataView::ALL.iter().any(|v| v.as_str() == base) => {
                Err(DataViewParseError::Disabled(key.to_string()))
            }
            _ => Err(DataViewParseError::Unknown(key.to_string())),
        }
    }
}
