use crate::core::scoring::{calculate_composite_score, ScoringError};
use crate::models::{CatalogRanges, City, NormalizedPriorities, RankedCity};

/// Ordered cities, or the catalog order when no priority is active
#[derive(Debug, Clone, PartialEq)]
pub enum Ranking<'a> {
    /// No enabled dimension: catalog order, no scores
    Unranked(Vec<&'a City>),
    /// Ascending composite score, ties in catalog order
    Ranked(Vec<RankedCity<'a>>),
}

impl<'a> Ranking<'a> {
    pub fn len(&self) -> usize {
        match self {
            Ranking::Unranked(cities) => cities.len(),
            Ranking::Ranked(ranked) => ranked.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self, Ranking::Ranked(_))
    }

    /// Cities in display order, scores dropped
    pub fn cities(&self) -> Vec<&'a City> {
        match self {
            Ranking::Unranked(cities) => cities.clone(),
            Ranking::Ranked(ranked) => ranked.iter().map(|r| r.city).collect(),
        }
    }

    /// Keep the first `max_results` entries without re-sorting.
    /// Asking for more than the list holds returns the whole list.
    pub fn project(mut self, max_results: usize) -> Self {
        match &mut self {
            Ranking::Unranked(cities) => cities.truncate(max_results),
            Ranking::Ranked(ranked) => ranked.truncate(max_results),
        }
        self
    }
}

/// Result of ranking a catalog
#[derive(Debug)]
pub struct RankOutcome<'a> {
    pub ranking: Ranking<'a>,
    /// Cities left out because their score could not be computed
    pub excluded: Vec<ScoringError>,
    pub total_candidates: usize,
}

/// Ranks cities by their composite distance from the user's priorities
///
/// # Pipeline Stages
/// 1. No enabled dimension: return the catalog order unscored
/// 2. Score each city against the enabled dimensions
/// 3. Drop cities with a non-finite distance
/// 4. Stable ascending sort
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    ranges: CatalogRanges,
}

impl Ranker {
    pub fn new(ranges: CatalogRanges) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &CatalogRanges {
        &self.ranges
    }

    /// Rank `cities` against `priorities`
    ///
    /// # Arguments
    /// * `cities` - Catalog cities in catalog order
    /// * `priorities` - Normalized targets of the enabled dimensions
    ///
    /// # Returns
    /// RankOutcome with the ordering and any excluded cities
    pub fn rank<'a>(&self, cities: &'a [City], priorities: &NormalizedPriorities) -> RankOutcome<'a> {
        let total_candidates = cities.len();

        if priorities.is_empty() {
            tracing::debug!("No active priorities, keeping catalog order");
            return RankOutcome {
                ranking: Ranking::Unranked(cities.iter().collect()),
                excluded: Vec::new(),
                total_candidates,
            };
        }

        let mut excluded = Vec::new();
        let mut ranked: Vec<RankedCity<'a>> = cities
            .iter()
            .filter_map(|city| {
                match calculate_composite_score(city, priorities, &self.ranges) {
                    Ok((score, distances)) => Some(RankedCity {
                        city,
                        score,
                        distances,
                    }),
                    Err(err) => {
                        tracing::error!("Dropping city from ranking: {}", err);
                        excluded.push(err);
                        None
                    }
                }
            })
            .collect();

        // sort_by is stable, equal scores keep catalog order
        ranked.sort_by(|a, b| a.score.total_cmp(&b.score));

        tracing::debug!(
            "Ranked {} of {} cities on {} dimension(s)",
            ranked.len(),
            total_candidates,
            priorities.len()
        );

        RankOutcome {
            ranking: Ranking::Ranked(ranked),
            excluded,
            total_candidates,
        }
    }
}

/// Keep the first `max_results` entries of an already sorted ranking
pub fn project(ranking: Ranking<'_>, max_results: usize) -> Ranking<'_> {
    ranking.project(max_results)
}
