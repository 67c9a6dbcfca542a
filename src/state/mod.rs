// View-model state exports
pub mod app;
pub mod priorities;
pub mod results;
pub mod settings;

pub use app::{Action, AppState, Transition};
pub use priorities::{Priority, PriorityState};
pub use results::ResultsState;
pub use settings::{country_info, CountryInfo, SettingsState};
