use crate::core::{compute_catalog_ranges, CityQuartiles, RankOutcome, Ranker, Ranking};
use crate::models::{
    CatalogRanges, City, DataView, Dimension, Location, MapFrame, PersistedState, Quartile,
    ResultEntry, ResultsResponse,
};
use crate::services::{CatalogError, CityCatalog};
use crate::state::AppState;
use geo::{BoundingRect, Centroid, MultiPoint};
use serde::Serialize;

/// Results page contents for one state
#[derive(Debug)]
pub struct ResultsView<'a> {
    pub data_view: DataView,
    /// Already sliced to `max_results`
    pub ranking: Ranking<'a>,
    pub excluded: usize,
}

impl<'a> ResultsView<'a> {
    /// Bounding box and center of the listed cities, for the map view
    pub fn map_frame(&self) -> Option<MapFrame> {
        let points: MultiPoint<f64> = self
            .ranking
            .cities()
            .iter()
            .map(|city| city.location.point())
            .collect();

        let rect = points.bounding_rect()?;
        let center = points.centroid()?;

        Some(MapFrame {
            center: Location {
                lat: center.y(),
                lng: center.x(),
            },
            south_west: Location {
                lat: rect.min().y,
                lng: rect.min().x,
            },
            north_east: Location {
                lat: rect.max().y,
                lng: rect.max().x,
            },
        })
    }
}

/// Where a city sits relative to the rest of the catalog
#[derive(Debug, Clone, Serialize)]
pub struct CityProfile<'a> {
    pub city: &'a City,
    pub quartiles: Vec<(Dimension, Quartile)>,
    pub sketchy: Vec<Dimension>,
}

/// The ranking core: catalog, its ranges and quartiles, and the ranker.
///
/// Built in one pass after the catalog loads; everything here is read-only
/// for the rest of the session.
#[derive(Debug, Clone)]
pub struct CityMatch {
    catalog: CityCatalog,
    ranker: Ranker,
    quartiles: CityQuartiles,
}

impl CityMatch {
    pub fn new(catalog: CityCatalog) -> Result<Self, CatalogError> {
        let ranges = compute_catalog_ranges(catalog.cities()).map_err(|_| CatalogError::Empty)?;
        let quartiles = CityQuartiles::from_cities(catalog.cities()).ok_or(CatalogError::Empty)?;

        tracing::info!(
            "Ranges: affordability [{}, {}], happiness [{}, {}], politics [{}, {}]",
            ranges.affordability.min,
            ranges.affordability.max,
            ranges.happiness.min,
            ranges.happiness.max,
            ranges.politics.min,
            ranges.politics.max
        );

        Ok(Self {
            catalog,
            ranker: Ranker::new(ranges),
            quartiles,
        })
    }

    pub fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }

    pub fn ranges(&self) -> &CatalogRanges {
        self.ranker.ranges()
    }

    pub fn quartiles(&self) -> &CityQuartiles {
        &self.quartiles
    }

    /// Default state for this catalog
    pub fn initial_state(&self, online: bool) -> AppState {
        AppState::new(*self.ranges(), self.catalog.len(), online)
    }

    /// Default state overwritten by the valid parts of `persisted`
    pub fn restore_state(&self, persisted: &PersistedState, online: bool) -> AppState {
        self.initial_state(online).restored(persisted)
    }

    /// Rank the whole catalog against the state's priorities
    pub fn rank(&self, state: &AppState) -> RankOutcome<'_> {
        self.ranker.rank(
            self.catalog.cities(),
            &state.priorities().normalized_priorities(),
        )
    }

    /// Rank and slice to the configured result count
    pub fn results(&self, state: &AppState) -> ResultsView<'_> {
        let outcome = self.rank(state);
        // max_results is validated against the catalog size; clamp anyway
        let max_results = state.settings().max_results().min(self.catalog.len());

        ResultsView {
            data_view: state.results().active_data_view(),
            ranking: outcome.ranking.project(max_results),
            excluded: outcome.excluded.len(),
        }
    }

    pub fn profile<'a>(&'a self, city: &'a City) -> CityProfile<'a> {
        CityProfile {
            city,
            quartiles: Dimension::ALL
                .into_iter()
                .map(|d| (d, self.quartiles.city_quartile(city, d)))
                .collect(),
            sketchy: self.quartiles.sketchy_dimensions(city),
        }
    }

    /// Renderer-facing form of the results page
    pub fn response(&self, state: &AppState) -> ResultsResponse {
        let view = self.results(state);

        let results = match &view.ranking {
            Ranking::Unranked(cities) => cities
                .iter()
                .enumerate()
                .map(|(i, city)| self.entry(i + 1, city))
                .collect(),
            Ranking::Ranked(ranked) => ranked
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    let mut entry = self.entry(i + 1, r.city);
                    entry.score = Some(r.score);
                    entry.distances = r.distances.clone();
                    entry
                })
                .collect(),
        };

        ResultsResponse {
            data_view: view.data_view,
            ranked: view.ranking.is_ranked(),
            total_results: view.ranking.len(),
            excluded_cities: view.excluded,
            results,
            map_frame: view.map_frame(),
        }
    }

    fn entry(&self, rank: usize, city: &City) -> ResultEntry {
        let mut entry = ResultEntry::new(rank, city);
        entry.sketchy_dimensions = self.quartiles.sketchy_dimensions(city);
        entry
    }
}
