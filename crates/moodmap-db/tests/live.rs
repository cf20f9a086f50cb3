//! Live integration tests for moodmap-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. `"../../migrations"` resolves to the workspace
//! migration directory relative to `crates/moodmap-db/`.

use std::collections::HashSet;

use moodmap_core::{HeatmapStore, HotspotUpsert, NeighborhoodConfig};
use moodmap_db::{
    insert_emotion_score, insert_neighborhood, insert_review, insert_venue, list_hotspots,
    list_neighborhoods, list_venues, seed_neighborhoods, upsert_hotspots, venue_scores,
    NewReview, NewVenue, PgHeatmapStore,
};
use moodmap_heatmap::{HeatmapConfig, HeatmapGenerator, HeatmapOutcome};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn point(lat: f64, lng: f64) -> String {
    serde_json::json!({ "type": "Point", "coordinates": [lng, lat] }).to_string()
}

async fn venue_at(pool: &sqlx::PgPool, name: &str, lat: f64, lng: f64) -> i64 {
    insert_venue(
        pool,
        &NewVenue {
            name: name.to_string(),
            address: None,
            latitude: lat,
            longitude: lng,
            category: None,
        },
    )
    .await
    .unwrap_or_else(|e| panic!("insert_venue failed for '{name}': {e}"))
}

/// Insert one review on `venue_id` carrying a single emotion score.
async fn scored_review(pool: &sqlx::PgPool, venue_id: i64, emotion: &str, score: f64) -> i64 {
    let review_id = insert_review(
        pool,
        &NewReview {
            venue_id,
            source: "sample".to_string(),
            text: "Lovely spot".to_string(),
            reviewer_location: None,
            review_date: None,
        },
    )
    .await
    .expect("insert_review failed");

    insert_emotion_score(pool, review_id, emotion, score)
        .await
        .expect("insert_emotion_score failed");

    review_id
}

fn upsert(neighborhood_id: i64, emotion: &str, average_score: f64, review_count: i32) -> HotspotUpsert {
    HotspotUpsert {
        neighborhood_id,
        emotion: emotion.to_string(),
        average_score,
        review_count,
    }
}

// ---------------------------------------------------------------------------
// Neighborhoods
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn seed_neighborhoods_is_idempotent_and_updates_geometry(pool: sqlx::PgPool) {
    let mut hoods = vec![
        NeighborhoodConfig {
            name: "Old Town".to_string(),
            city: "Edinburgh".to_string(),
            lat: 55.9486,
            lng: -3.1999,
        },
        NeighborhoodConfig {
            name: "Leith".to_string(),
            city: "Edinburgh".to_string(),
            lat: 55.9755,
            lng: -3.1665,
        },
    ];

    let seeded = seed_neighborhoods(&pool, &hoods)
        .await
        .expect("first seed failed");
    assert_eq!(seeded, 2);

    hoods[1].lat = 55.9760;
    seed_neighborhoods(&pool, &hoods)
        .await
        .expect("second seed failed");

    let rows = list_neighborhoods(&pool)
        .await
        .expect("list_neighborhoods failed");
    assert_eq!(rows.len(), 2, "re-seeding must not duplicate rows");

    let leith = rows
        .iter()
        .find(|r| r.name == "Leith")
        .expect("Leith row missing");
    assert_eq!(leith.geometry, hoods[1].geometry());
}

#[sqlx::test(migrations = "../../migrations")]
async fn insert_neighborhood_stores_geometry_verbatim(pool: sqlx::PgPool) {
    let id = insert_neighborhood(&pool, "Nowhere", "Atlantis", "{broken")
        .await
        .expect("insert_neighborhood failed");

    let rows = list_neighborhoods(&pool)
        .await
        .expect("list_neighborhoods failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].geometry, "{broken");
}

// ---------------------------------------------------------------------------
// Venues, reviews, scores
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn venue_rejects_out_of_range_latitude(pool: sqlx::PgPool) {
    let result = insert_venue(
        &pool,
        &NewVenue {
            name: "Bad".to_string(),
            address: None,
            latitude: 91.0,
            longitude: 0.0,
            category: None,
        },
    )
    .await;

    assert!(result.is_err(), "latitude 91 must violate the check constraint");
    assert!(list_venues(&pool).await.expect("list_venues failed").is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn venue_scores_filters_by_emotion(pool: sqlx::PgPool) {
    let a = venue_at(&pool, "A", 55.95, -3.19).await;
    let b = venue_at(&pool, "B", 55.95, -3.18).await;

    scored_review(&pool, b, "joy", 0.6).await;
    scored_review(&pool, a, "joy", 0.8).await;
    scored_review(&pool, b, "calm", 0.3).await;

    let joy = venue_scores(&pool, "joy").await.expect("venue_scores failed");
    assert_eq!(joy, vec![(a, 0.8), (b, 0.6)]);

    let calm = venue_scores(&pool, "calm").await.expect("venue_scores failed");
    assert_eq!(calm, vec![(b, 0.3)]);

    let none = venue_scores(&pool, "awe").await.expect("venue_scores failed");
    assert!(none.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn emotion_score_outside_unit_interval_is_rejected(pool: sqlx::PgPool) {
    let venue = venue_at(&pool, "A", 55.95, -3.19).await;
    let review = insert_review(
        &pool,
        &NewReview {
            venue_id: venue,
            source: "sample".to_string(),
            text: "Meh".to_string(),
            reviewer_location: Some("Glasgow".to_string()),
            review_date: None,
        },
    )
    .await
    .expect("insert_review failed");

    assert!(insert_emotion_score(&pool, review, "joy", 1.5).await.is_err());
}

// ---------------------------------------------------------------------------
// Hotspots
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_hotspots_inserts_then_updates(pool: sqlx::PgPool) {
    let hood = insert_neighborhood(&pool, "Leith", "Edinburgh", &point(55.9755, -3.1665))
        .await
        .expect("insert_neighborhood failed");

    let first = upsert_hotspots(&pool, &[upsert(hood, "joy", 0.7, 2)])
        .await
        .expect("first upsert failed");
    assert_eq!(first.inserted, 1);
    assert_eq!(first.updated, 0);

    let second = upsert_hotspots(&pool, &[upsert(hood, "joy", 0.5, 4)])
        .await
        .expect("second upsert failed");
    assert_eq!(second.inserted, 0);
    assert_eq!(second.updated, 1);

    let rows = list_hotspots(&pool, Some("joy"))
        .await
        .expect("list_hotspots failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].neighborhood_name, "Leith");
    assert!((rows[0].average_score - 0.5).abs() < f64::EPSILON);
    assert_eq!(rows[0].review_count, 4);
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_hotspots_keys_on_neighborhood_and_emotion(pool: sqlx::PgPool) {
    let hood = insert_neighborhood(&pool, "Leith", "Edinburgh", &point(55.9755, -3.1665))
        .await
        .expect("insert_neighborhood failed");

    let summary = upsert_hotspots(
        &pool,
        &[upsert(hood, "joy", 0.7, 2), upsert(hood, "calm", 0.2, 1)],
    )
    .await
    .expect("upsert failed");
    assert_eq!(summary.inserted, 2);

    assert_eq!(list_hotspots(&pool, None).await.expect("list failed").len(), 2);
    assert_eq!(
        list_hotspots(&pool, Some("calm"))
            .await
            .expect("list failed")
            .len(),
        1
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn failed_hotspot_batch_rolls_back_every_row(pool: sqlx::PgPool) {
    let hood = insert_neighborhood(&pool, "Leith", "Edinburgh", &point(55.9755, -3.1665))
        .await
        .expect("insert_neighborhood failed");

    // The second row references a neighborhood that does not exist.
    let result = upsert_hotspots(
        &pool,
        &[upsert(hood, "joy", 0.7, 2), upsert(hood + 999, "joy", 0.4, 1)],
    )
    .await;
    assert!(result.is_err());

    let rows = list_hotspots(&pool, None).await.expect("list_hotspots failed");
    assert!(rows.is_empty(), "no row of a failed batch may persist");
}

// ---------------------------------------------------------------------------
// Store + pipeline
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn pg_store_snapshot_groups_scores_by_venue(pool: sqlx::PgPool) {
    insert_neighborhood(&pool, "Leith", "Edinburgh", &point(55.9755, -3.1665))
        .await
        .expect("insert_neighborhood failed");
    let a = venue_at(&pool, "A", 55.95, -3.19).await;
    let b = venue_at(&pool, "B", 55.95, -3.18).await;
    let quiet = venue_at(&pool, "Quiet", 55.95, -3.17).await;
    scored_review(&pool, a, "joy", 0.9).await;
    scored_review(&pool, a, "joy", 0.7).await;
    scored_review(&pool, b, "joy", 0.2).await;
    scored_review(&pool, b, "calm", 0.4).await;

    let store = PgHeatmapStore::new(pool.clone());
    let snapshot = store.read_snapshot("joy").await.expect("read_snapshot failed");

    assert_eq!(snapshot.neighborhoods.len(), 1);
    assert_eq!(snapshot.venues.len(), 3);
    assert_eq!(snapshot.scores.len(), 2);
    assert_eq!(snapshot.scores[&a], vec![0.9, 0.7]);
    assert_eq!(snapshot.scores[&b], vec![0.2]);
    assert!(!snapshot.scores.contains_key(&quiet));
    assert_eq!(snapshot.scores_for(&HashSet::from([b, quiet])), vec![0.2]);

    // The snapshot transaction is closed; the pool still accepts writes.
    scored_review(&pool, quiet, "joy", 0.5).await;
    let next = store.read_snapshot("joy").await.expect("read_snapshot failed");
    assert_eq!(next.scores[&quiet], vec![0.5]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn generator_over_postgres_persists_and_renders_hotspots(pool: sqlx::PgPool) {
    let leith = insert_neighborhood(&pool, "Leith", "Edinburgh", &point(55.9755, -3.1665))
        .await
        .expect("insert_neighborhood failed");
    // Far from any venue; must be left out of the result.
    insert_neighborhood(&pool, "Camden", "London", &point(51.5390, -0.1427))
        .await
        .expect("insert_neighborhood failed");

    let shore = venue_at(&pool, "The Shore", 55.9760, -3.1700).await;
    scored_review(&pool, shore, "joy", 0.8).await;
    scored_review(&pool, shore, "joy", 0.6).await;

    let generator = HeatmapGenerator::new(PgHeatmapStore::new(pool.clone()), HeatmapConfig::default());
    let run = generator.run("joy").await;

    assert!(
        matches!(run.outcome, HeatmapOutcome::RealData { hotspots: 1, inserted: 1, updated: 0 }),
        "unexpected outcome: {:?}",
        run.outcome
    );
    assert_eq!(run.collection.features.len(), 1);
    let props = &run.collection.features[0].properties;
    assert_eq!(props.neighborhood, "Leith");
    assert!((props.score - 0.7).abs() < 1e-9);
    assert!((props.weight - 7.0).abs() < 1e-9);
    assert_eq!(props.review_count, 2);

    let rows = list_hotspots(&pool, Some("joy")).await.expect("list_hotspots failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].neighborhood_id, leith);
    assert_eq!(rows[0].review_count, 2);

    let again = generator.run("joy").await;
    assert!(matches!(
        again.outcome,
        HeatmapOutcome::RealData { inserted: 0, updated: 1, .. }
    ));
    assert_eq!(again.collection, run.collection);
}

#[sqlx::test(migrations = "../../migrations")]
async fn generator_over_empty_database_falls_back(pool: sqlx::PgPool) {
    let generator = HeatmapGenerator::new(PgHeatmapStore::new(pool.clone()), HeatmapConfig::default());
    let run = generator.run("joy").await;

    assert!(run.is_fallback());
    assert_eq!(run.collection.features.len(), 5);
    assert!(list_hotspots(&pool, None).await.expect("list failed").is_empty());
}
