// Core algorithm exports
pub mod filters;
pub mod quartile;
pub mod range;
pub mod ranker;
pub mod scoring;

pub use filters::{collect_unique, validate_city, validate_record, validate_records, RecordError};
pub use quartile::{CityQuartiles, QuartileBounds};
pub use range::{compute_catalog_ranges, compute_range, RangeError};
pub use ranker::{project, RankOutcome, Ranker, Ranking};
pub use scoring::{calculate_composite_score, dimension_distance, normalized_value, ScoringError};
