//! In-memory [`HeatmapStore`] used by the pipeline tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use moodmap_core::{
    HeatmapSnapshot, HeatmapStore, HotspotUpsert, Neighborhood, UpsertSummary, Venue,
};

#[derive(Debug, thiserror::Error)]
#[error("memory store failure: {0}")]
pub struct MemoryStoreError(pub &'static str);

#[derive(Debug, Clone, PartialEq)]
pub struct StoredHotspot {
    pub average_score: f64,
    pub review_count: i32,
    /// Number of times this row has been written.
    pub writes: u32,
}

/// A scored review: `(venue_id, emotion, score)`.
type ScoreRow = (i64, String, f64);

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub neighborhoods: Mutex<Vec<Neighborhood>>,
    pub venues: Mutex<Vec<Venue>>,
    pub scores: Mutex<Vec<ScoreRow>>,
    pub hotspots: Mutex<BTreeMap<(i64, String), StoredHotspot>>,
    pub fail_reads: AtomicBool,
    pub fail_upsert: AtomicBool,
    /// When set with `fail_upsert`, the failure happens after this many rows
    /// were staged.
    pub fail_after_rows: AtomicUsize,
    pub snapshot_reads: AtomicUsize,
    /// Scores committed right after the next snapshot is taken, as a
    /// concurrent ingest would.
    pub ingest_after_snapshot: Mutex<Vec<ScoreRow>>,
}

pub fn point(lat: f64, lng: f64) -> String {
    format!(r#"{{"type":"Point","coordinates":[{lng},{lat}]}}"#)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_neighborhood(&self, id: i64, name: &str, geometry: &str) {
        self.neighborhoods.lock().unwrap().push(Neighborhood {
            id,
            name: name.to_string(),
            city: "London".to_string(),
            geometry: geometry.to_string(),
        });
    }

    pub fn add_venue(&self, id: i64, latitude: f64, longitude: f64) {
        self.venues.lock().unwrap().push(Venue {
            id,
            name: format!("venue-{id}"),
            address: None,
            latitude,
            longitude,
            category: Some("attractions".to_string()),
        });
    }

    pub fn add_score(&self, venue_id: i64, emotion: &str, score: f64) {
        self.scores
            .lock()
            .unwrap()
            .push((venue_id, emotion.to_string(), score));
    }

    /// Queue a score that lands in storage just after the next snapshot.
    pub fn ingest_after_snapshot(&self, venue_id: i64, emotion: &str, score: f64) {
        self.ingest_after_snapshot
            .lock()
            .unwrap()
            .push((venue_id, emotion.to_string(), score));
    }

    pub fn hotspot(&self, neighborhood_id: i64, emotion: &str) -> Option<StoredHotspot> {
        self.hotspots
            .lock()
            .unwrap()
            .get(&(neighborhood_id, emotion.to_string()))
            .cloned()
    }

    pub fn hotspot_count(&self) -> usize {
        self.hotspots.lock().unwrap().len()
    }

    fn check_reads(&self) -> Result<(), MemoryStoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(MemoryStoreError("read"));
        }
        Ok(())
    }
}

impl HeatmapStore for MemoryStore {
    type Error = MemoryStoreError;

    async fn read_snapshot(&self, emotion: &str) -> Result<HeatmapSnapshot, Self::Error> {
        self.check_reads()?;
        self.snapshot_reads.fetch_add(1, Ordering::SeqCst);

        let mut stored = self.scores.lock().unwrap();
        let mut scores: HashMap<i64, Vec<f64>> = HashMap::new();
        for (venue_id, label, score) in stored.iter() {
            if label == emotion {
                scores.entry(*venue_id).or_default().push(*score);
            }
        }
        let snapshot = HeatmapSnapshot {
            neighborhoods: self.neighborhoods.lock().unwrap().clone(),
            venues: self.venues.lock().unwrap().clone(),
            scores,
        };

        stored.append(&mut self.ingest_after_snapshot.lock().unwrap());
        Ok(snapshot)
    }

    async fn upsert_hotspots(&self, rows: &[HotspotUpsert]) -> Result<UpsertSummary, Self::Error> {
        // Stage into a copy and swap it in only on success, like a transaction.
        let mut hotspots = self.hotspots.lock().unwrap();
        let mut staged = hotspots.clone();
        let mut summary = UpsertSummary::default();

        for (i, row) in rows.iter().enumerate() {
            if self.fail_upsert.load(Ordering::SeqCst)
                && i >= self.fail_after_rows.load(Ordering::SeqCst)
            {
                return Err(MemoryStoreError("upsert"));
            }

            let key = (row.neighborhood_id, row.emotion.clone());
            match staged.get_mut(&key) {
                Some(existing) => {
                    existing.average_score = row.average_score;
                    existing.review_count = row.review_count;
                    existing.writes += 1;
                    summary.updated += 1;
                }
                None => {
                    staged.insert(
                        key,
                        StoredHotspot {
                            average_score: row.average_score,
                            review_count: row.review_count,
                            writes: 1,
                        },
                    );
                    summary.inserted += 1;
                }
            }
        }

        *hotspots = staged;
        Ok(summary)
    }
}
