use crate::models::SettingsSnapshot;

/// Interface languages (BCP 47 tags)
pub const SUPPORTED_LOCALES: [&str; 4] = ["en-US", "es-ES", "hi-IN", "zh-CN"];

/// Countries with a city catalog
pub const SUPPORTED_COUNTRY_CODES: [&str; 1] = ["US"];

pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_COUNTRY_CODE: &str = "US";
const DEFAULT_MAX_RESULTS: usize = 10;
const MAX_RESULTS_OPTIONS: [usize; 3] = [5, 10, 20];

/// Display metadata for an ISO 3166 country code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryInfo {
    pub name: &'static str,
    /// ISO 4217 currency code
    pub currency: &'static str,
    pub supported: bool,
}

pub fn country_info(code: &str) -> Option<CountryInfo> {
    let info = match code {
        "US" => CountryInfo {
            name: "United States",
            currency: "USD",
            supported: true,
        },
        "IN" => CountryInfo {
            name: "India",
            currency: "USD",
            supported: false,
        },
        "CR" => CountryInfo {
            name: "Costa Rica",
            currency: "CRC",
            supported: false,
        },
        _ => return None,
    };
    Some(info)
}

pub fn is_valid_locale(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

pub fn is_valid_country_code(code: &str) -> bool {
    SUPPORTED_COUNTRY_CODES.contains(&code)
}

/// Application settings: result count, locale and country
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsState {
    num_cities: usize,
    max_results: usize,
    locale: String,
    country_code: String,
}

impl SettingsState {
    /// `max_results` defaults to `min(num_cities, 10)`
    pub fn new(num_cities: usize) -> Self {
        Self {
            num_cities,
            max_results: Self::default_max_results(num_cities),
            locale: DEFAULT_LOCALE.to_string(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }

    fn default_max_results(num_cities: usize) -> usize {
        num_cities.min(DEFAULT_MAX_RESULTS)
    }

    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Currency used to format affordability
    pub fn currency(&self) -> &'static str {
        country_info(&self.country_code)
            .map(|info| info.currency)
            .unwrap_or("USD")
    }

    pub fn is_valid_max_results(&self, max_results: usize) -> bool {
        max_results > 0 && max_results <= self.num_cities
    }

    /// Result counts offered to the user
    pub fn max_results_options(&self) -> Vec<usize> {
        if self.num_cities < 20 {
            vec![self.max_results]
        } else {
            MAX_RESULTS_OPTIONS.to_vec()
        }
    }

    pub fn set_num_cities(&mut self, num_cities: usize) -> bool {
        if num_cities == 0 {
            tracing::info!("Ignoring invalid num_cities: {}", num_cities);
            return false;
        }
        self.num_cities = num_cities;
        if self.max_results > num_cities {
            self.max_results = num_cities;
        }
        true
    }

    pub fn set_max_results(&mut self, max_results: usize) -> bool {
        if !self.is_valid_max_results(max_results) {
            tracing::info!(
                "Ignoring max_results {} outside [1, {}]",
                max_results,
                self.num_cities
            );
            return false;
        }
        self.max_results = max_results;
        true
    }

    pub fn set_locale(&mut self, locale: &str) -> bool {
        if !is_valid_locale(locale) {
            tracing::info!("Ignoring unsupported locale: {}", locale);
            return false;
        }
        self.locale = locale.to_string();
        true
    }

    pub fn set_country_code(&mut self, code: &str) -> bool {
        if !is_valid_country_code(code) {
            tracing::info!("Ignoring unsupported country code: {}", code);
            return false;
        }
        self.country_code = code.to_string();
        true
    }

    /// Reset result count, locale and country. The catalog size is kept.
    pub fn restore_defaults(&mut self) {
        *self = Self::new(self.num_cities);
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            num_cities: Some(self.num_cities),
            max_results: Some(self.max_results),
            locale: Some(self.locale.clone()),
            country_code: Some(self.country_code.clone()),
        }
    }

    /// Apply a persisted snapshot field by field.
    ///
    /// The persisted catalog size is informational: the loaded catalog is the
    /// authority, so `max_results` is checked against the current size.
    pub fn restore(&mut self, snapshot: &SettingsSnapshot) {
        let invalid = snapshot.invalid_fields();
        if !invalid.is_empty() {
            tracing::warn!("Persisted settings fields out of bounds: {:?}", invalid);
        }
        let usable = |field: &str| !invalid.iter().any(|f| f == field);

        if let Some(persisted) = snapshot.num_cities {
            if persisted != self.num_cities {
                tracing::info!(
                    "Catalog size changed since last session ({} -> {})",
                    persisted,
                    self.num_cities
                );
            }
        }
        if let Some(max_results) = snapshot.max_results.filter(|_| usable("max_results")) {
            self.set_max_results(max_results);
        }
        if let Some(locale) = snapshot.locale.as_deref().filter(|_| usable("locale")) {
            self.set_locale(locale);
        }
        if let Some(code) = snapshot
            .country_code
            .as_deref()
            .filter(|_| usable("country_code"))
        {
            self.set_country_code(code);
        }
    }
}
