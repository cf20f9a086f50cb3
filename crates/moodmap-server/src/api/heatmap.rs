use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use moodmap_core::resolve_emotion;
use moodmap_heatmap::FeatureCollection;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct EmotionQuery {
    pub emotion: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct HotspotItem {
    pub neighborhood_id: i64,
    pub neighborhood: String,
    pub emotion: String,
    pub average_score: f64,
    pub review_count: i32,
    pub last_updated: DateTime<Utc>,
}

/// Bare GeoJSON `FeatureCollection` for the requested emotion.
///
/// Always succeeds; storage failures are absorbed into the fallback dataset.
pub(super) async fn get_heatmap(
    State(state): State<AppState>,
    Query(params): Query<EmotionQuery>,
) -> Json<FeatureCollection> {
    let emotion = resolve_emotion(params.emotion.as_deref(), &state.default_emotion);
    Json(state.heatmap.generate(&emotion).await)
}

pub(super) async fn list_hotspots(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<EmotionQuery>,
) -> Result<Json<ApiResponse<Vec<HotspotItem>>>, ApiError> {
    let emotion = resolve_emotion(params.emotion.as_deref(), &state.default_emotion);

    let rows = moodmap_db::list_hotspots(&state.pool, Some(&emotion))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| HotspotItem {
            neighborhood_id: row.neighborhood_id,
            neighborhood: row.neighborhood_name,
            emotion: row.emotion,
            average_score: row.average_score,
            review_count: row.review_count,
            last_updated: row.last_updated,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
