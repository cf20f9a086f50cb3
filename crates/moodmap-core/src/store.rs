//! Storage seam for the hotspot pipeline.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use crate::models::{HotspotUpsert, Neighborhood, UpsertSummary, Venue};

/// Everything one heatmap run reads, taken from a single consistent view of
/// storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapSnapshot {
    pub neighborhoods: Vec<Neighborhood>,
    pub venues: Vec<Venue>,
    /// Scores for the snapshot's emotion, grouped by venue id.
    pub scores: HashMap<i64, Vec<f64>>,
}

impl HeatmapSnapshot {
    /// Scores of every venue in `venue_ids`, in ascending venue id order.
    #[must_use]
    pub fn scores_for(&self, venue_ids: &HashSet<i64>) -> Vec<f64> {
        let mut ids: Vec<i64> = venue_ids.iter().copied().collect();
        ids.sort_unstable();

        ids.iter()
            .filter_map(|id| self.scores.get(id))
            .flatten()
            .copied()
            .collect()
    }
}

/// Read and write access the hotspot pipeline needs from persistence.
///
/// `read_snapshot` returns neighborhoods, venues and scores as of one point
/// in time; writes committed while it runs must not be partially visible.
/// `upsert_hotspots` must be atomic: either every row in the batch is
/// written or none is.
pub trait HeatmapStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Neighborhoods, venues and the `emotion` scores of their reviews.
    fn read_snapshot(
        &self,
        emotion: &str,
    ) -> impl Future<Output = Result<HeatmapSnapshot, Self::Error>> + Send;

    /// Insert or overwrite one hotspot per row, keyed by `(neighborhood_id, emotion)`.
    fn upsert_hotspots(
        &self,
        rows: &[HotspotUpsert],
    ) -> impl Future<Output = Result<UpsertSummary, Self::Error>> + Send;
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
