use crate::core::filters::{collect_unique, validate_city, validate_record, RecordError};
use crate::models::{City, CityRecord};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that make a catalog unusable
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog contains no cities")]
    Empty,

    #[error("Catalog has no valid cities ({rejected} record(s) rejected)")]
    NoValidCities { rejected: usize },
}

/// The reference list of candidate cities, in catalog order.
///
/// Loaded once per session and never mutated.
#[derive(Debug, Clone)]
pub struct CityCatalog {
    cities: Vec<City>,
    rejected: Vec<RecordError>,
}

impl CityCatalog {
    /// Build a catalog from cities constructed in code.
    ///
    /// Cities get the same field checks as parsed records; failures are
    /// dropped and kept in [`CityCatalog::rejected`].
    pub fn from_cities(cities: Vec<City>) -> Result<Self, CatalogError> {
        if cities.is_empty() {
            return Err(CatalogError::Empty);
        }

        let (cities, rejected) = collect_unique(
            cities
                .into_iter()
                .map(|city| validate_city(&city).map(|()| city)),
        );
        Self::checked(cities, rejected)
    }

    /// Parse a catalog of single-key objects:
    ///
    /// ```json
    /// [
    ///   {"Plano, TX": {"affordability": 265300, "happiness": 72.3, ...}},
    ///   {"Irvine, CA": {"affordability": 620500, "happiness": 71.86, ...}}
    /// ]
    /// ```
    ///
    /// Only a document that is not a JSON array fails as a whole. Entries
    /// that are not objects, and records that are not objects or fail
    /// validation, are dropped and kept in [`CityCatalog::rejected`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<Value> = serde_json::from_str(json)?;
        if entries
            .iter()
            .all(|entry| entry.as_object().map_or(false, |map| map.is_empty()))
        {
            return Err(CatalogError::Empty);
        }

        let mut results = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let Value::Object(map) = entry else {
                results.push(Err(RecordError::NotAnObject { index }));
                continue;
            };
            for (name, value) in map {
                results.push(parse_record(&name, value));
            }
        }

        let (cities, rejected) = collect_unique(results);
        Self::checked(cities, rejected)
    }

    fn checked(cities: Vec<City>, rejected: Vec<RecordError>) -> Result<Self, CatalogError> {
        if cities.is_empty() {
            return Err(CatalogError::NoValidCities {
                rejected: rejected.len(),
            });
        }

        if !rejected.is_empty() {
            tracing::warn!(
                "Loaded {} cities, rejected {} malformed record(s)",
                cities.len(),
                rejected.len()
            );
        }

        Ok(Self { cities, rejected })
    }

    /// Read and parse a catalog file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json_str(&json)?;
        tracing::info!("Loaded {} cities from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Look up a city by its "Name, ST" key, ignoring case
    pub fn get(&self, name: &str) -> Option<&City> {
        let name = name.trim();
        self.cities
            .iter()
            .find(|city| city.name.eq_ignore_ascii_case(name))
    }

    /// Records excluded while loading
    pub fn rejected(&self) -> &[RecordError] {
        &self.rejected
    }
}

fn parse_record(name: &str, value: Value) -> Result<City, RecordError> {
    let record: CityRecord =
        serde_json::from_value(value).map_err(|err| RecordError::Malformed {
            city: name.to_string(),
            reason: err.to_string(),
        })?;
    validate_record(name, &record)
}
