use serde::{Deserialize, Serialize};
use validator::Validate;

/// Persisted form of one numeric priority
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrioritySnapshot {
    #[serde(default, deserialize_with = "crate::models::lenient", skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "crate::models::lenient", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Persisted priorities: `{dimension: {value, enabled}}` plus the job-search flag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrioritiesSnapshot {
    #[serde(default, deserialize_with = "crate::models::lenient", skip_serializing_if = "Option::is_none")]
    pub affordability: Option<PrioritySnapshot>,
    #[serde(default, deserialize_with = "crate::models::lenient", skip_serializing_if = "Option::is_none")]
    pub happiness: Option<PrioritySnapshot>,
    #[serde(default, deserialize_with = "crate::models::lenient", skip_serializing_if = "Option::is_none")]
    pub politics: Option<PrioritySnapshot>,
    #[serde(
        rename = "jobSearchEnabled",
        default,
        deserialize_with = "crate::models::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_search_enabled: Option<bool>,
}

/// Persisted settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SettingsSnapshot {
    #[validate(range(min = 1))]
    #[serde(
        rename = "numCities",
        default,
        deserialize_with = "crate::models::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_cities: Option<usize>,
    #[validate(range(min = 1))]
    #[serde(
        rename = "maxResults",
        default,
        deserialize_with = "crate::models::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_results: Option<usize>,
    #[validate(length(min = 2, max = 16))]
    #[serde(default, deserialize_with = "crate::models::lenient", skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[validate(length(equal = 2))]
    #[serde(
        rename = "countryCode",
        default,
        deserialize_with = "crate::models::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub country_code: Option<String>,
}

impl SettingsSnapshot {
    /// Names of fields that fail their static bounds
    pub fn invalid_fields(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .field_errors()
                .keys()
                .map(|field| field.to_string())
                .collect(),
        }
    }
}

/// Persisted results page state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsSnapshot {
    #[serde(
        rename = "activeDataView",
        default,
        deserialize_with = "crate::models::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub active_data_view: Option<String>,
}

/// Everything persisted between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(
        rename = "savedAt",
        default,
        deserialize_with = "crate::models::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub saved_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, deserialize_with = "crate::models::lenient", skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsSnapshot>,
    #[serde(default, deserialize_with = "crate::models::lenient", skip_serializing_if = "Option::is_none")]
    pub priorities: Option<PrioritiesSnapshot>,
    #[serde(default, deserialize_with = "crate::models::lenient", skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultsSnapshot>,
}
