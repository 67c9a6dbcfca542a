use serde::Serialize;
use std::collections::BTreeMap;
use crate::models::domain::{City, DataView, Dimension, ImageCredit, Location, Politics};

/// One row of the results page
#[derive(Debug, Clone, Serialize)]
pub struct ResultEntry {
    pub rank: usize,
    pub name: String,
    pub affordability: u32,
    pub happiness: f64,
    pub politics: Politics,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<ImageCredit>,
    /// Composite distance, absent when no priority is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub distances: BTreeMap<Dimension, f64>,
    #[serde(rename = "sketchy", skip_serializing_if = "Vec::is_empty")]
    pub sketchy_dimensions: Vec<Dimension>,
}

impl ResultEntry {
    pub fn new(rank: usize, city: &City) -> Self {
        Self {
            rank,
            name: city.name.clone(),
            affordability: city.affordability,
            happiness: city.happiness,
            politics: city.politics,
            location: city.location,
            img: city.img.clone(),
            score: None,
            distances: BTreeMap::new(),
            sketchy_dimensions: Vec::new(),
        }
    }
}

/// Map framing for the projected cities
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapFrame {
    pub center: Location,
    #[serde(rename = "southWest")]
    pub south_west: Location,
    #[serde(rename = "northEast")]
    pub north_east: Location,
}

/// Everything the renderer needs for the results page
#[derive(Debug, Clone, Serialize)]
pub struct ResultsResponse {
    #[serde(rename = "dataView")]
    pub data_view: DataView,
    /// False when no priority is active and results are in catalog order
    pub ranked: bool,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "excludedCities")]
    pub excluded_cities: usize,
    pub results: Vec<ResultEntry>,
    #[serde(rename = "mapFrame", skip_serializing_if = "Option::is_none")]
    pub map_frame: Option<MapFrame>,
}
