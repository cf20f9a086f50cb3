//! Heatmap orchestration.

use moodmap_core::{HeatmapStore, HotspotUpsert, UpsertSummary};

use crate::aggregate::aggregate_scores;
use crate::error::HeatmapError;
use crate::fallback::render_fallback;
use crate::geojson::{render_hotspots, FeatureCollection};
use crate::geometry::point_center;
use crate::proximity::nearby_venue_ids;
use crate::types::{HeatmapConfig, HeatmapOutcome, HeatmapRun, NeighborhoodScore};

/// Builds emotion heatmaps from a [`HeatmapStore`].
///
/// Construct one per process and share it by reference; it holds no mutable
/// state, so concurrent runs only contend in the store.
#[derive(Debug)]
pub struct HeatmapGenerator<S> {
    store: S,
    config: HeatmapConfig,
}

impl<S: HeatmapStore> HeatmapGenerator<S> {
    #[must_use]
    pub fn new(store: S, config: HeatmapConfig) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Generate the heatmap for `emotion`.
    ///
    /// Never fails: an empty aggregation or any storage error yields the
    /// fallback dataset instead.
    pub async fn generate(&self, emotion: &str) -> FeatureCollection {
        self.run(emotion).await.collection
    }

    /// Generate the heatmap for `emotion` and report which outcome produced it.
    ///
    /// 1. Read neighborhoods, venues and scores in one snapshot.
    /// 2. Match venues to each neighborhood center and average their scores.
    /// 3. Upsert one hotspot per scored neighborhood in a single batch.
    /// 4. Render the scored neighborhoods as GeoJSON.
    ///
    /// Nothing is persisted when the run falls back.
    pub async fn run(&self, emotion: &str) -> HeatmapRun {
        match self.try_run(emotion).await {
            Ok((collection, summary)) => {
                tracing::info!(
                    emotion,
                    hotspots = collection.features.len(),
                    inserted = summary.inserted,
                    updated = summary.updated,
                    "heatmap generated from review data"
                );
                HeatmapRun {
                    outcome: HeatmapOutcome::RealData {
                        hotspots: collection.features.len(),
                        inserted: summary.inserted,
                        updated: summary.updated,
                    },
                    collection,
                }
            }
            Err(reason) => {
                match &reason {
                    HeatmapError::Empty(_) => {
                        tracing::warn!(emotion, "no hotspot data; serving fallback dataset");
                    }
                    HeatmapError::Storage { stage, source } => {
                        tracing::error!(
                            emotion,
                            stage,
                            error = %source,
                            "heatmap storage failure; serving fallback dataset"
                        );
                    }
                }
                HeatmapRun {
                    collection: render_fallback(emotion, &self.config.fallback),
                    outcome: HeatmapOutcome::Fallback { reason },
                }
            }
        }
    }

    async fn try_run(
        &self,
        emotion: &str,
    ) -> Result<(FeatureCollection, UpsertSummary), HeatmapError> {
        let scores = self.neighborhood_scores(emotion).await?;
        if scores.is_empty() {
            return Err(HeatmapError::Empty(emotion.to_string()));
        }

        let rows: Vec<HotspotUpsert> = scores
            .iter()
            .map(|scored| HotspotUpsert {
                neighborhood_id: scored.neighborhood.id,
                emotion: emotion.to_string(),
                average_score: scored.summary.average,
                review_count: scored.summary.review_count(),
            })
            .collect();

        let summary = self
            .store
            .upsert_hotspots(&rows)
            .await
            .map_err(|e| HeatmapError::storage("upsert_hotspots", e))?;

        Ok((render_hotspots(emotion, &scores), summary))
    }

    /// Aggregate `emotion` scores for every neighborhood with matched reviews.
    ///
    /// Neighborhoods whose geometry is not a usable point, that have no venue
    /// within the radius, or whose nearby venues carry no matching scores are
    /// left out of the result. Nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapError::Storage`] if the snapshot read fails.
    pub async fn neighborhood_scores(
        &self,
        emotion: &str,
    ) -> Result<Vec<NeighborhoodScore>, HeatmapError> {
        let snapshot = self
            .store
            .read_snapshot(emotion)
            .await
            .map_err(|e| HeatmapError::storage("read_snapshot", e))?;

        tracing::debug!(
            emotion,
            neighborhoods = snapshot.neighborhoods.len(),
            venues = snapshot.venues.len(),
            scored_venues = snapshot.scores.len(),
            radius_km = self.config.radius_km,
            "aggregating neighborhood scores"
        );

        let mut results = Vec::new();
        for neighborhood in &snapshot.neighborhoods {
            let center = match point_center(&neighborhood.geometry) {
                Ok(center) => center,
                Err(e) => {
                    tracing::debug!(
                        neighborhood_id = neighborhood.id,
                        name = %neighborhood.name,
                        error = %e,
                        "skipping neighborhood without a point center"
                    );
                    continue;
                }
            };

            let nearby = nearby_venue_ids(center, &snapshot.venues, self.config.radius_km);
            if let Some(summary) = aggregate_scores(&snapshot, &nearby) {
                results.push(NeighborhoodScore {
                    neighborhood: neighborhood.clone(),
                    summary,
                });
            }
        }

        Ok(results)
    }
}
