use crate::models::{CatalogRanges, DataView, Dimension, PersistedState};
use crate::state::{PriorityState, ResultsState, SettingsState};

/// A single user action
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetPriorityValue(Dimension, f64),
    SetPriorityEnabled(Dimension, bool),
    SetJobSearch(bool),
    SetMaxResults(usize),
    SetLocale(String),
    SetCountryCode(String),
    SetDataView(DataView),
    SetOnline(bool),
    RestoreDefaults,
}

/// Outcome of applying an action
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: AppState,
    /// False when the action was rejected by validation
    pub accepted: bool,
}

/// Immutable snapshot of everything the user can change.
///
/// Each action produces a new value via [`AppState::apply`]; nothing is
/// mutated in place by callers.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    settings: SettingsState,
    priorities: PriorityState,
    results: ResultsState,
    online: bool,
}

impl AppState {
    /// Defaults for a catalog of `num_cities` cities with the given ranges
    pub fn new(ranges: CatalogRanges, num_cities: usize, online: bool) -> Self {
        Self {
            settings: SettingsState::new(num_cities),
            priorities: PriorityState::new(ranges),
            results: ResultsState::new(online),
            online,
        }
    }

    pub fn settings(&self) -> &SettingsState {
        &self.settings
    }

    pub fn priorities(&self) -> &PriorityState {
        &self.priorities
    }

    pub fn results(&self) -> &ResultsState {
        &self.results
    }

    pub fn online(&self) -> bool {
        self.online
    }

    /// Defaults overwritten by whatever persisted fields are still valid
    pub fn restored(mut self, persisted: &PersistedState) -> Self {
        if let Some(settings) = &persisted.settings {
            self.settings.restore(settings);
        }
        if let Some(priorities) = &persisted.priorities {
            self.priorities.restore(priorities);
        }
        if let Some(results) = &persisted.results {
            self.results.restore(results, self.online);
        }
        self
    }

    /// Produce the state that follows `action`
    pub fn apply(&self, action: Action) -> Transition {
        let mut next = self.clone();
        let online = next.online;

        let accepted = match action {
            Action::SetPriorityValue(dimension, value) => {
                next.priorities.set_value(dimension, value)
            }
            Action::SetPriorityEnabled(dimension, enabled) => {
                next.priorities.set_enabled(dimension, enabled);
                true
            }
            Action::SetJobSearch(enabled) => {
                next.priorities.set_job_search_enabled(enabled);
                true
            }
            Action::SetMaxResults(max_results) => next.settings.set_max_results(max_results),
            Action::SetLocale(locale) => next.settings.set_locale(&locale),
            Action::SetCountryCode(code) => next.settings.set_country_code(&code),
            Action::SetDataView(view) => next.results.set_active_data_view(view, online),
            Action::SetOnline(online) => {
                next.online = online;
                next.results.on_connectivity_change(online);
                true
            }
            Action::RestoreDefaults => {
                next.settings.restore_defaults();
                next.priorities.restore_defaults();
                next.results.restore_defaults(online);
                true
            }
        };

        Transition {
            state: next,
            accepted,
        }
    }

    /// Apply several actions in order, returning the final state and how many were rejected
    pub fn apply_all<I>(&self, actions: I) -> (AppState, usize)
    where
        I: IntoIterator<Item = Action>,
    {
        let mut state = self.clone();
        let mut rejected = 0;
        for action in actions {
            let transition = state.apply(action);
            if !transition.accepted {
                rejected += 1;
            }
            state = transition.state;
        }
        (state, rejected)
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            saved_at: Some(chrono::Utc::now()),
            settings: Some(self.settings.snapshot()),
            priorities: Some(self.priorities.snapshot()),
            results: Some(self.results.snapshot()),
        }
    }
}
