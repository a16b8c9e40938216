//! Selection resolution.
//!
//! Turns a [`Selection`] into the race-year table and the distribution
//! subset the athlete is ranked in, and derives the dropdown choices the
//! dashboard offers for a partially filled selection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::RaceCatalog;
use crate::error::Result;
use crate::models::{DistributionKind, Selection};
use crate::table::ResultTable;

/// Value shown for the unfiltered distribution.
pub const ALL_DISTRIBUTION: &str = "All";

/// Tables a selection resolves to.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Every row of the race-year
    pub full: Arc<ResultTable>,
    /// Rows in the selected distribution
    pub subset: Arc<ResultTable>,
    /// Distribution value actually applied (`"All"` when unfiltered)
    pub distribution_value: String,
}

/// Resolve a selection to its race-year table and distribution subset.
///
/// A gender or division selection without an explicit value uses the
/// athlete's own value, which requires the athlete to be present.
pub fn resolve(catalog: &RaceCatalog, selection: &Selection) -> Result<Resolved> {
    let full = Arc::clone(catalog.get(&selection.race, &selection.year)?);

    let Some(column) = selection.distribution_kind.column() else {
        return Ok(Resolved {
            subset: Arc::clone(&full),
            full,
            distribution_value: ALL_DISTRIBUTION.to_string(),
        });
    };

    let value = match &selection.distribution_value {
        Some(value) => value.clone(),
        None => default_distribution_value(&full, &selection.athlete, selection.distribution_kind)
            .map_err(|err| err.in_race_year(&selection.race, &selection.year))?,
    };

    let subset = full.filter_equals_ignore_case(column, &value);
    debug!(
        race = %selection.race,
        year = %selection.year,
        column = %column,
        value = %value,
        rows = subset.len(),
        "Resolved distribution subset"
    );

    Ok(Resolved {
        full,
        subset: Arc::new(subset),
        distribution_value: value,
    })
}

/// The athlete's own value for a distribution kind (`"All"` for `All`).
pub fn default_distribution_value(
    table: &ResultTable,
    athlete: &str,
    kind: DistributionKind,
) -> Result<String> {
    let Some(column) = kind.column() else {
        return Ok(ALL_DISTRIBUTION.to_string());
    };
    let row = table.lookup_by_name(athlete)?;
    Ok(row
        .attribute(column)
        .map(|v| v.into_owned())
        .unwrap_or_default())
}

/// Selection state as entered so far; any field may be missing or stale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialSelection {
    pub race: Option<String>,
    pub year: Option<String>,
    pub athlete: Option<String>,
    pub distribution: Option<DistributionKind>,
}

/// Choices and reconciled defaults for every dropdown of one side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableChoices {
    pub races: Vec<String>,
    pub race: Option<String>,
    pub years: Vec<String>,
    pub year: Option<String>,
    pub athletes: Vec<String>,
    pub athlete: Option<String>,
    pub distribution: DistributionKind,
    pub distribution_values: Vec<String>,
    pub distribution_value: Option<String>,
}

/// Derive the available choices for a partial selection.
///
/// Upstream values drive downstream options: race → years → athletes →
/// distribution values. A value no longer offered (a year the race never
/// had, an athlete from a previous race) falls back to the first option.
pub fn derive_options(catalog: &RaceCatalog, partial: &PartialSelection) -> AvailableChoices {
    let races = catalog.races().to_vec();
    let race = pick(&races, partial.race.as_deref());

    let years = race.as_deref().map(|r| catalog.years(r)).unwrap_or_default();
    let year = pick(&years, partial.year.as_deref());

    let table = match (race.as_deref(), year.as_deref()) {
        (Some(r), Some(y)) => catalog.get(r, y).ok().cloned(),
        _ => None,
    };

    let athletes = table.as_ref().map(|t| t.names()).unwrap_or_default();
    let athlete = pick(&athletes, partial.athlete.as_deref());

    let distribution = partial.distribution.unwrap_or_default();
    let distribution_values = match (distribution.column(), table.as_ref()) {
        (None, _) => vec![ALL_DISTRIBUTION.to_string()],
        (Some(column), Some(table)) => table.column_values(column).into_iter().collect(),
        (Some(_), None) => Vec::new(),
    };
    let distribution_value = match (table.as_ref(), athlete.as_deref()) {
        (Some(table), Some(athlete)) => {
            default_distribution_value(table, athlete, distribution).ok()
        }
        _ if distribution == DistributionKind::All => Some(ALL_DISTRIBUTION.to_string()),
        _ => None,
    };

    AvailableChoices {
        races,
        race,
        years,
        year,
        athletes,
        athlete,
        distribution,
        distribution_values,
        distribution_value,
    }
}

/// Keep `wanted` when offered, else fall back to the first option.
fn pick(options: &[String], wanted: Option<&str>) -> Option<String> {
    match wanted {
        Some(w) if options.iter().any(|o| o == w) => Some(w.to_string()),
        Some(w) => {
            debug!(wanted = w, "Selection not offered, using default");
            options.first().cloned()
        }
        None => options.first().cloned(),
    }
}
