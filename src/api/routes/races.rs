use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::catalog::RaceInfo;

#[derive(Debug, Serialize)]
pub struct RacesResponse {
    pub races: Vec<RaceInfo>,
}

pub async fn list_races(State(state): State<AppState>) -> Json<RacesResponse> {
    Json(RacesResponse {
        races: state.catalog.summary(),
    })
}
