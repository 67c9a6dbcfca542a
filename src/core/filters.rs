use crate::models::{City, CityRecord, Location, Politics};
use std::collections::HashSet;
use thiserror::Error;

/// Reasons a catalog record is excluded from ranking
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("{city}: missing required field `{field}`")]
    MissingField { city: String, field: &'static str },

    #[error("{city}: field `{field}` is not a finite number")]
    NonFinite { city: String, field: &'static str },

    #[error("{city}: affordability must be a positive integer, got {value}")]
    InvalidAffordability { city: String, value: f64 },

    #[error("{city}: `{field}` must lie in [0, 100], got {value}")]
    FractionOutOfRange {
        city: String,
        field: &'static str,
        value: f64,
    },

    #[error("city record has an empty name")]
    EmptyName,

    #[error("{city}: duplicate catalog entry")]
    DuplicateName { city: String },

    #[error("catalog entry {index} is not a {{name: record}} object")]
    NotAnObject { index: usize },

    #[error("{city}: unreadable record ({reason})")]
    Malformed { city: String, reason: String },
}

fn required(
    city: &str,
    field: &'static str,
    value: Option<f64>,
) -> Result<f64, RecordError> {
    let value = value.ok_or_else(|| RecordError::MissingField {
        city: city.to_string(),
        field,
    })?;

    if !value.is_finite() {
        return Err(RecordError::NonFinite {
            city: city.to_string(),
            field,
        });
    }

    Ok(value)
}

fn vote_fraction(city: &str, field: &'static str, value: Option<f64>) -> Result<f64, RecordError> {
    let value = required(city, field, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(RecordError::FractionOutOfRange {
            city: city.to_string(),
            field,
            value,
        });
    }
    Ok(value)
}

/// Turn a raw catalog record into a [`City`]
///
/// Every numeric field the ranking reads must be present and finite,
/// so a malformed record can never leak a NaN into a composite score.
pub fn validate_record(name: &str, record: &CityRecord) -> Result<City, RecordError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RecordError::EmptyName);
    }

    let affordability = required(name, "affordability", record.affordability)?;
    if affordability <= 0.0 || affordability.fract() != 0.0 || affordability > u32::MAX as f64 {
        return Err(RecordError::InvalidAffordability {
            city: name.to_string(),
            value: affordability,
        });
    }

    let happiness = required(name, "happiness", record.happiness)?;

    let politics = record
        .politics
        .as_ref()
        .ok_or_else(|| RecordError::MissingField {
            city: name.to_string(),
            field: "politics",
        })?;
    let rep16_frac = vote_fraction(name, "politics.rep16_frac", politics.rep16_frac)?;
    let dem16_frac = vote_fraction(name, "politics.dem16_frac", politics.dem16_frac)?;

    let location = record
        .location
        .as_ref()
        .ok_or_else(|| RecordError::MissingField {
            city: name.to_string(),
            field: "location",
        })?;
    let lat = required(name, "location.lat", location.lat)?;
    let lng = required(name, "location.lng", location.lng)?;

    Ok(City {
        name: name.to_string(),
        affordability: affordability as u32,
        happiness,
        politics: Politics {
            dem16_frac,
            rep16_frac,
        },
        location: Location { lat, lng },
        img: record.img.clone(),
    })
}

/// Re-check a [`City`] built outside of [`validate_record`]
pub fn validate_city(city: &City) -> Result<(), RecordError> {
    let name = city.name.trim();
    if name.is_empty() {
        return Err(RecordError::EmptyName);
    }
    if city.affordability == 0 {
        return Err(RecordError::InvalidAffordability {
            city: name.to_string(),
            value: 0.0,
        });
    }

    required(name, "happiness", Some(city.happiness))?;
    vote_fraction(name, "politics.rep16_frac", Some(city.politics.rep16_frac))?;
    vote_fraction(name, "politics.dem16_frac", Some(city.politics.dem16_frac))?;
    required(name, "location.lat", Some(city.location.lat))?;
    required(name, "location.lng", Some(city.location.lng))?;
    Ok(())
}

/// Split validation results into cities and rejections.
///
/// Names are compared ignoring ASCII case, the same way catalog lookups are;
/// the first city of a given name wins.
pub fn collect_unique<I>(results: I) -> (Vec<City>, Vec<RecordError>)
where
    I: IntoIterator<Item = Result<City, RecordError>>,
{
    let mut seen = HashSet::new();
    let mut cities = Vec::new();
    let mut rejected = Vec::new();

    for result in results {
        match result {
            Ok(city) if !seen.insert(city.name.to_ascii_lowercase()) => {
                tracing::warn!("Excluding duplicate city record: {}", city.name);
                rejected.push(RecordError::DuplicateName { city: city.name });
            }
            Ok(city) => cities.push(city),
            Err(err) => {
                tracing::warn!("Excluding malformed city record: {}", err);
                rejected.push(err);
            }
        }
    }

    (cities, rejected)
}

/// Validate a whole catalog, keeping catalog order.
///
/// Returns the valid cities and the reasons each rejected record was dropped.
pub fn validate_records<'a, I>(records: I) -> (Vec<City>, Vec<RecordError>)
where
    I: IntoIterator<Item = (&'a str, &'a CityRecord)>,
{
    collect_unique(
        records
            .into_iter()
            .map(|(name, record)| validate_record(name, record)),
    )
}
