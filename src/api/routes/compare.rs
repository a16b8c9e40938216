use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{parse_param, ApiError};
use crate::models::{DistributionKind, Segment, Selection};
use crate::present::{comparison_view, segment_views, ComparisonView};

// ── Compare Endpoint ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub left_race: String,
    pub left_year: String,
    pub left_athlete: String,
    pub left_distribution: Option<String>,
    pub left_value: Option<String>,
    pub right_race: String,
    pub right_year: String,
    pub right_athlete: String,
    pub right_distribution: Option<String>,
    pub right_value: Option<String>,
    pub metric: Option<String>,
    pub bins: Option<usize>,
}

fn selection(
    side: &str,
    race: String,
    year: String,
    athlete: String,
    distribution: Option<&str>,
    value: Option<String>,
) -> Result<Selection, ApiError> {
    let kind: DistributionKind =
        parse_param(&format!("{}_distribution", side), distribution)?.unwrap_or_default();
    let value = value.filter(|v| !v.trim().is_empty());
    Ok(Selection::new(race, year, athlete).with_distribution(kind, value))
}

/// Two-athlete comparison on one segment.
///
/// Always answers 200 once the parameters parse; sides that cannot be
/// ranked carry an error in their panel.
pub async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<ComparisonView>, ApiError> {
    let segment: Segment = parse_param("metric", params.metric.as_deref())?.unwrap_or(Segment::Finish);
    let bins = params
        .bins
        .unwrap_or(state.config.histogram.comparison_bins);
    if bins == 0 {
        return Err(ApiError::BadRequest("bins must be greater than 0".to_string()));
    }

    let left_distribution = params.left_distribution.as_deref();
    let right_distribution = params.right_distribution.as_deref();
    let left = selection(
        "left",
        params.left_race,
        params.left_year,
        params.left_athlete,
        left_distribution,
        params.left_value,
    )?;
    let right = selection(
        "right",
        params.right_race,
        params.right_year,
        params.right_athlete,
        right_distribution,
        params.right_value,
    )?;

    Ok(Json(comparison_view(&state.catalog, &left, &right, segment, bins)))
}

// ── Segments Endpoint ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SegmentsParams {
    pub race: String,
    pub year: String,
    pub left: String,
    pub right: String,
}

#[derive(Debug, Serialize)]
pub struct SegmentsResponse {
    pub race: String,
    pub year: String,
    pub views: Vec<ComparisonView>,
}

/// Every recorded segment for two athletes of one race-year.
pub async fn segments(
    State(state): State<AppState>,
    Query(params): Query<SegmentsParams>,
) -> Result<Json<SegmentsResponse>, ApiError> {
    let views = segment_views(
        &state.catalog,
        &params.race,
        &params.year,
        &params.left,
        &params.right,
        state.config.histogram.detail_bins,
    )?;

    Ok(Json(SegmentsResponse {
        race: params.race,
        year: params.year,
        views,
    }))
}
