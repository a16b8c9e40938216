use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::present::{athlete_summary as summarize, AthleteSummary};

/// Published result card for one athlete.
pub async fn athlete_summary(
    State(state): State<AppState>,
    Path((race, year, name)): Path<(String, String, String)>,
) -> Result<Json<AthleteSummary>, ApiError> {
    Ok(Json(summarize(&state.catalog, &race, &year, &name)?))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_helpers::{get_json, test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_athlete_summary() {
        let app = build_router(test_state());
        let (status, json) = get_json(app, "/api/athletes/Hampton/2018/Jo%20Wu").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["place"], "3");
        assert_eq!(json["division_place"], "2");
        assert_eq!(json["times"][0]["segment"], "finish");
        assert_eq!(json["times"][0]["display"], "1:50:15");
        assert_eq!(json["times"][4]["display"], "—");
    }

    #[tokio::test]
    async fn test_athlete_summary_not_found() {
        let app = build_router(test_state());
        let (status, json) = get_json(app, "/api/athletes/Hampton/2018/Bob%20Ray").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "ATHLETE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_athlete_summary_unknown_year() {
        let app = build_router(test_state());
        let (status, json) = get_json(app, "/api/athletes/Hampton/2099/Jo%20Wu").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "UNKNOWN_RACE_YEAR");
    }
}
