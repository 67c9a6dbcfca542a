use crate::models::{DataView, DataViewParseError, ResultsSnapshot};

/// Results page state: the active display mode
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsState {
    active_data_view: DataView,
}

impl ResultsState {
    pub fn new(online: bool) -> Self {
        Self {
            active_data_view: DataView::fallback(online),
        }
    }

    pub fn active_data_view(&self) -> DataView {
        self.active_data_view
    }

    /// Switch display mode. Views that need the network are refused offline.
    pub fn set_active_data_view(&mut self, view: DataView, online: bool) -> bool {
        if !view.is_available(online) {
            tracing::info!("Ignoring {} while offline", view);
            return false;
        }
        self.active_data_view = view;
        true
    }

    /// Parse and apply a view key coming from outside the crate
    pub fn set_active_data_view_key(&mut self, key: &str, online: bool) -> bool {
        match key.parse::<DataView>() {
            Ok(view) => self.set_active_data_view(view, online),
            // Disabled keys are expected while offline, not an error
            Err(DataViewParseError::Disabled(_)) => false,
            Err(err) => {
                tracing::info!("Ignoring invalid data view: {}", err);
                false
            }
        }
    }

    /// Called when reachability changes. Falls back when the active view
    /// can no longer be shown.
    pub fn on_connectivity_change(&mut self, online: bool) -> bool {
        if self.active_data_view.is_available(online) {
            return false;
        }
        let fallback = DataView::fallback(online);
        tracing::info!(
            "{} unavailable offline, switching to {}",
            self.active_data_view,
            fallback
        );
        self.active_data_view = fallback;
        true
    }

    pub fn restore_defaults(&mut self, online: bool) {
        *self = Self::new(online);
    }

    pub fn snapshot(&self) -> ResultsSnapshot {
        ResultsSnapshot {
            active_data_view: Some(self.active_data_view.as_str().to_string()),
        }
    }

    /// Restore the persisted view if it can be shown now; otherwise keep the
    /// current view if it can, else fall back.
    pub fn restore(&mut self, snapshot: &ResultsSnapshot, online: bool) {
        if let Some(key) = snapshot.active_data_view.as_deref() {
            if self.set_active_data_view_key(key, online) {
                return;
            }
        }
        self.on_connectivity_change(online);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view() {
        assert_eq!(ResultsState::new(true).active_data_view(), DataView::PhotoView);
        assert_eq!(ResultsState::new(false).active_data_view(), DataView::TableView);
    }

    #[test]
    fn test_network_views_refused_offline() {
        let mut results = ResultsState::new(false);
        assert!(!results.set_active_data_view(DataView::MapView, false));
        assert!(results.set_active_data_view(DataView::ChartView, false));
        assert_eq!(results.active_data_view(), DataView::ChartView);
    }

    #[test]
    fn test_view_keys() {
        let mut results = ResultsState::new(true);
        assert!(results.set_active_data_view_key("map-view", true));
        assert!(!results.set_active_data_view_key("bogus-view", true));
        assert!(!results.set_active_data_view_key("table-view-disabled", true));
        assert_eq!(results.active_data_view(), DataView::MapView);
    }

    #[test]
    fn test_going_offline_falls_back() {
        let mut results = ResultsState::new(true);
        results.set_active_data_view(DataView::PhotoView, true);

        assert!(results.on_connectivity_change(false));
        assert_eq!(results.active_data_view(), DataView::TableView);
        assert!(!results.on_connectivity_change(true));
    }

    #[test]
    fn test_restore_unavailable_view_offline() {
        let mut results = ResultsState::new(false);
        results.set_active_data_view(DataView::ChartView, false);

        results.restore(
            &ResultsSnapshot {
                active_data_view: Some("photo-view".to_string()),
            },
            false,
        );
        assert_eq!(results.active_data_view(), DataView::ChartView);

        results.restore(
            &ResultsSnapshot {
                active_data_view: Some("table-view".to_string()),
            },
            false,
        );
        assert_eq!(results.active_data_view(), DataView::TableView);
    }
}
