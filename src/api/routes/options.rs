use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::{parse_param, ApiError};
use crate::resolve::{derive_options, AvailableChoices, PartialSelection};

#[derive(Debug, Deserialize)]
pub struct OptionsParams {
    pub race: Option<String>,
    pub year: Option<String>,
    pub athlete: Option<String>,
    pub distribution: Option<String>,
}

/// Dropdown choices for one side, reconciled against stale inputs.
pub async fn options(
    State(state): State<AppState>,
    Query(params): Query<OptionsParams>,
) -> Result<Json<AvailableChoices>, ApiError> {
    let partial = PartialSelection {
        race: params.race,
        year: params.year,
        athlete: params.athlete,
        distribution: parse_param("distribution", params.distribution.as_deref())?,
    };

    Ok(Json(derive_options(&state.catalog, &partial)))
}
