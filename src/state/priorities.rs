use crate::models::{
    CatalogRanges, Dimension, NormalizedPriorities, PrioritiesSnapshot, PrioritySnapshot,
};
use serde::Serialize;

/// Target value and enabled flag for one numeric dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Priority {
    pub value: f64,
    pub enabled: bool,
}

/// The user's ranking priorities.
///
/// Values are always inside the catalog range of their dimension; writes
/// outside it are ignored and reported through the `bool` return.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityState {
    ranges: CatalogRanges,
    affordability: Priority,
    happiness: Priority,
    politics: Priority,
    /// Not yet wired into ranking, contributes no weight
    job_search_enabled: bool,
}

impl PriorityState {
    /// Every numeric priority enabled and set to its range midpoint
    pub fn new(ranges: CatalogRanges) -> Self {
        let midpoint = |dimension: Dimension| Priority {
            value: ranges.get(dimension).mid,
            enabled: true,
        };

        Self {
            affordability: midpoint(Dimension::Affordability),
            happiness: midpoint(Dimension::Happiness),
            politics: midpoint(Dimension::Politics),
            job_search_enabled: false,
            ranges,
        }
    }

    pub fn ranges(&self) -> &CatalogRanges {
        &self.ranges
    }

    pub fn priority(&self, dimension: Dimension) -> Priority {
        match dimension {
            Dimension::Affordability => self.affordability,
            Dimension::Happiness => self.happiness,
            Dimension::Politics => self.politics,
        }
    }

    fn priority_mut(&mut self, dimension: Dimension) -> &mut Priority {
        match dimension {
            Dimension::Affordability => &mut self.affordability,
            Dimension::Happiness => &mut self.happiness,
            Dimension::Politics => &mut self.politics,
        }
    }

    pub fn value(&self, dimension: Dimension) -> f64 {
        self.priority(dimension).value
    }

    pub fn is_enabled(&self, dimension: Dimension) -> bool {
        self.priority(dimension).enabled
    }

    pub fn job_search_enabled(&self) -> bool {
        self.job_search_enabled
    }

    pub fn is_valid_value(&self, dimension: Dimension, value: f64) -> bool {
        self.ranges.get(dimension).contains(value)
    }

    /// Set the target value of `dimension`.
    /// Returns false and keeps the prior value when `value` is outside the range.
    pub fn set_value(&mut self, dimension: Dimension, value: f64) -> bool {
        if !self.store_value(dimension, value) {
            let range = self.ranges.get(dimension);
            tracing::info!(
                "Ignoring {} priority {} outside [{}, {}]",
                dimension,
                value,
                range.min,
                range.max
            );
            return false;
        }
        true
    }

    fn store_value(&mut self, dimension: Dimension, value: f64) -> bool {
        if !self.is_valid_value(dimension, value) {
            return false;
        }
        self.priority_mut(dimension).value = value;
        true
    }

    pub fn set_enabled(&mut self, dimension: Dimension, enabled: bool) {
        self.priority_mut(dimension).enabled = enabled;
    }

    pub fn set_job_search_enabled(&mut self, enabled: bool) {
        self.job_search_enabled = enabled;
    }

    /// Targets of the enabled dimensions rescaled into [0, 1].
    /// Disabled dimensions are omitted.
    pub fn normalized_priorities(&self) -> NormalizedPriorities {
        Dimension::ALL
            .into_iter()
            .filter(|d| self.is_enabled(*d))
            .map(|d| (d, self.ranges.get(d).normalize(self.value(d))))
            .collect()
    }

    pub fn has_no_priorities(&self) -> bool {
        !Dimension::ALL.iter().any(|d| self.is_enabled(*d))
    }

    pub fn restore_defaults(&mut self) {
        *self = Self::new(self.ranges);
    }

    pub fn snapshot(&self) -> PrioritiesSnapshot {
        let field = |dimension: Dimension| {
            let priority = self.priority(dimension);
            Some(PrioritySnapshot {
                value: Some(priority.value),
                enabled: Some(priority.enabled),
            })
        };

        PrioritiesSnapshot {
            affordability: field(Dimension::Affordability),
            happiness: field(Dimension::Happiness),
            politics: field(Dimension::Politics),
            job_search_enabled: Some(self.job_search_enabled),
        }
    }

    /// Apply a persisted snapshot field by field.
    /// Missing or invalid fields keep the current value.
    pub fn restore(&mut self, snapshot: &PrioritiesSnapshot) {
        let persisted = [
            (Dimension::Affordability, snapshot.affordability.as_ref()),
            (Dimension::Happiness, snapshot.happiness.as_ref()),
            (Dimension::Politics, snapshot.politics.as_ref()),
        ];

        for (dimension, priority) in persisted {
            let Some(priority) = priority else {
                continue;
            };
            if let Some(value) = priority.value {
                if !self.store_value(dimension, value) {
                    tracing::warn!("Persisted {} value {} rejected", dimension, value);
                }
            }
            if let Some(enabled) = priority.enabled {
                self.set_enabled(dimension, enabled);
            }
        }

        if let Some(enabled) = snapshot.job_search_enabled {
            self.set_job_search_enabled(enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DimensionRange;

    fn ranges() -> CatalogRanges {
        CatalogRanges {
            affordability: DimensionRange {
                min: 265300.0,
                max: 620500.0,
                mid: 442900.0,
            },
            happiness: DimensionRange {
                min: 40.0,
                max: 80.0,
                mid: 60.0,
            },
            politics: DimensionRange {
                min: 20.0,
                max: 70.0,
                mid: 45.0,
            },
        }
    }

    #[test]
    fn test_defaults_to_midpoints() {
        let state = PriorityState::new(ranges());
        assert_eq!(state.value(Dimension::Affordability), 442900.0);
        assert_eq!(state.value(Dimension::Happiness), 60.0);
        assert_eq!(state.value(Dimension::Politics), 45.0);
        assert!(Dimension::ALL.iter().all(|d| state.is_enabled(*d)));
        assert!(!state.job_search_enabled());
    }

    #[test]
    fn test_out_of_range_write_is_rejected() {
        let mut state = PriorityState::new(ranges());

        assert!(!state.set_value(Dimension::Happiness, 95.0));
        assert_eq!(state.value(Dimension::Happiness), 60.0);

        assert!(!state.set_value(Dimension::Happiness, f64::NAN));
        assert_eq!(state.value(Dimension::Happiness), 60.0);

        assert!(state.set_value(Dimension::Happiness, 80.0));
        assert_eq!(state.value(Dimension::Happiness), 80.0);
    }

    #[test]
    fn test_normalized_priorities_omit_disabled() {
        let mut state = PriorityState::new(ranges());
        state.set_value(Dimension::Affordability, 265300.0);
        state.set_enabled(Dimension::Politics, false);

        let normalized = state.normalized_priorities();
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized.get(Dimension::Affordability), Some(0.0));
        assert_eq!(normalized.get(Dimension::Happiness), Some(0.5));
        assert_eq!(normalized.get(Dimension::Politics), None);
    }

    #[test]
    fn test_job_search_never_counts() {
        let mut state = PriorityState::new(ranges());
        for dimension in Dimension::ALL {
            state.set_enabled(dimension, false);
        }
        state.set_job_search_enabled(true);

        assert!(state.has_no_priorities());
        assert!(state.normalized_priorities().is_empty());
    }

    #[test]
    fn test_restore_is_field_by_field() {
        let mut state = PriorityState::new(ranges());
        state.set_value(Dimension::Politics, 30.0);

        let snapshot = PrioritiesSnapshot {
            affordability: Some(PrioritySnapshot {
                value: Some(300000.0),
                enabled: Some(false),
            }),
            happiness: Some(PrioritySnapshot {
                value: Some(500.0),
                enabled: None,
            }),
            politics: None,
            job_search_enabled: Some(true),
        };
        state.restore(&snapshot);

        assert_eq!(state.value(Dimension::Affordability), 300000.0);
        assert!(!state.is_enabled(Dimension::Affordability));
        assert_eq!(state.value(Dimension::Happiness), 60.0);
        assert!(state.is_enabled(Dimension::Happiness));
        assert_eq!(state.value(Dimension::Politics), 30.0);
        assert!(state.job_search_enabled());
    }

    #[test]
    fn test_snapshot_restores_to_equal_state() {
        let mut state = PriorityState::new(ranges());
        state.set_value(Dimension::Happiness, 75.0);
        state.set_enabled(Dimension::Affordability, false);

        let mut restored = PriorityState::new(ranges());
        restored.restore(&state.snapshot());

        assert_eq!(restored, state);
    }

    #[test]
    fn test_restore_skips_unusable_values() {
        let mut state = PriorityState::new(ranges());
        state.set_value(Dimension::Happiness, 75.0);
        let before = state.clone();

        let snapshot = PrioritiesSnapshot {
            happiness: Some(PrioritySnapshot {
                value: Some(f64::NAN),
                enabled: None,
            }),
            politics: Some(PrioritySnapshot {
                value: Some(-1.0),
                enabled: None,
            }),
            ..Default::default()
        };
        state.restore(&snapshot);

        assert_eq!(state, before);
    }
}
