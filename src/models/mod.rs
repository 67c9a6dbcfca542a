// Model exports
pub mod domain;
pub mod responses;
pub mod snapshot;

pub use domain::{
    CatalogRanges, City, CityRecord, DataView, DataViewParseError, Dimension, DimensionRange,
    ImageCredit, Location, LocationRecord, NormalizedPriorities, Politics, PoliticsRecord,
    Quartile, RankedCity, UnknownDimension,
};
pub use responses::{MapFrame, ResultEntry, ResultsResponse};
pub use snapshot::{
    PersistedState, PrioritiesSnapshot, PrioritySnapshot, ResultsSnapshot, SettingsSnapshot,
};

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;

/// Deserialize a field, turning a value of the wrong shape into `None`
/// instead of failing the whole record.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            tracing::debug!("Ignoring malformed field: {}", err);
            Ok(None)
        }
    }
}
