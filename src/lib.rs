//! City Match - rank candidate cities for relocation against weighted priorities
//!
//! This library provides the ranking core: catalog validation, per-dimension
//! ranges, the priority-weighted ranking, outlier quartiles, and the
//! settings/priorities/results state that drives them.

pub mod config;
pub mod core;
pub mod engine;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use core::{Ranker, Ranking, RankOutcome};
pub use engine::{CityMatch, ResultsView};
pub use models::{City, DataView, Dimension, NormalizedPriorities, PersistedState, RankedCity};
pub use services::{CityCatalog, JsonFileStore, StateStore};
pub use state::{Action, AppState};
