//! Per-neighborhood score aggregation.

use std::collections::HashSet;

use moodmap_core::HeatmapSnapshot;

/// Mean and count of the emotion scores matched to one neighborhood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub average: f64,
    pub count: usize,
}

impl ScoreSummary {
    /// `count` as a storage integer, saturating at `i32::MAX`.
    #[must_use]
    pub fn review_count(&self) -> i32 {
        i32::try_from(self.count).unwrap_or(i32::MAX)
    }
}

/// Arithmetic mean of `scores`, or `None` when there are none.
#[must_use]
pub fn summarize(scores: &[f64]) -> Option<ScoreSummary> {
    if scores.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let denom = scores.len() as f64;
    let sum: f64 = scores.iter().sum();

    Some(ScoreSummary {
        average: sum / denom,
        count: scores.len(),
    })
}

/// Average the snapshot scores of reviews attached to `venue_ids`.
///
/// Returns `None` when `venue_ids` is empty or no matching scores exist.
#[must_use]
pub fn aggregate_scores(
    snapshot: &HeatmapSnapshot,
    venue_ids: &HashSet<i64>,
) -> Option<ScoreSummary> {
    if venue_ids.is_empty() {
        return None;
    }
    summarize(&snapshot.scores_for(venue_ids))
}
