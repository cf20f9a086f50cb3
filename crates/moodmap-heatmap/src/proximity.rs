use std::collections::HashSet;

use moodmap_core::Venue;

use crate::geo::Coordinate;

/// Radius used when none is configured.
pub const DEFAULT_PROXIMITY_RADIUS_KM: f64 = 2.0;

/// Ids of venues whose great-circle distance to `center` is at most `radius_km`.
#[must_use]
pub fn nearby_venue_ids(center: Coordinate, venues: &[Venue], radius_km: f64) -> HashSet<i64> {
    venues
        .iter()
        .filter(|venue| {
            center.distance_km(Coordinate::new(venue.latitude, venue.longitude)) <= radius_km
        })
        .map(|venue| venue.id)
        .collect()
}
