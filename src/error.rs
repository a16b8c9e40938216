//! Analytics error types.
//!
//! Every variant is recoverable: the presentation layer turns each into a
//! placeholder rather than failing the whole view. Only catalog loading
//! (see [`crate::storage`]) is fatal.

use thiserror::Error;

use crate::models::Segment;

/// Result type alias for analytics operations.
pub type Result<T, E = AnalyticsError> = std::result::Result<T, E>;

/// Errors raised while resolving selections and computing comparisons.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    #[error("No results loaded for {race} {year}")]
    UnknownRaceYear { race: String, year: String },

    #[error("No row named {name:?}")]
    NotFound { name: String },

    #[error("{name} did not race in {race} {year}")]
    AthleteNotFound {
        name: String,
        race: String,
        year: String,
    },

    #[error("No {segment} time recorded for {athlete}")]
    MissingSegment { athlete: String, segment: Segment },

    #[error("No {segment} times in the selected distribution")]
    EmptyPopulation { segment: Segment },

    #[error("{count} rows named {name:?}")]
    Ambiguous { name: String, count: usize },
}

impl AnalyticsError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            AnalyticsError::UnknownRaceYear { .. } => "UNKNOWN_RACE_YEAR",
            AnalyticsError::NotFound { .. } => "NOT_FOUND",
            AnalyticsError::AthleteNotFound { .. } => "ATHLETE_NOT_FOUND",
            AnalyticsError::MissingSegment { .. } => "MISSING_SEGMENT",
            AnalyticsError::EmptyPopulation { .. } => "EMPTY_POPULATION",
            AnalyticsError::Ambiguous { .. } => "AMBIGUOUS",
        }
    }

    /// Relabel a failed name lookup as an athlete missing from a race-year.
    pub fn in_race_year(self, race: &str, year: &str) -> Self {
        match self {
            AnalyticsError::NotFound { name } => AnalyticsError::AthleteNotFound {
                name,
                race: race.to_string(),
                year: year.to_string(),
            },
            other => other,
        }
    }

    /// True when the error comes from a selection that has not caught up
    /// with an upstream change (race or year switched, athlete left over).
    pub fn is_stale_selection(&self) -> bool {
        matches!(
            self,
            AnalyticsError::UnknownRaceYear { .. } | AnalyticsError::AthleteNotFound { .. }
        )
    }
}
