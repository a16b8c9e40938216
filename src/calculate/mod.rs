//! Comparison engine.
//!
//! Ranks each side's athlete within their own distribution subset and
//! compares the two times:
//! - rank is competition rank (strictly faster times + 1)
//! - percentile is rank over population size, rounded half-to-even
//! - lower time wins
//!
//! Every call is a fresh scan of the relevant subset; nothing is cached.

use tracing::debug;

use crate::catalog::RaceCatalog;
use crate::error::{AnalyticsError, Result};
use crate::models::{AthleteStat, ComparisonResult, ResultRow, Segment, Selection, Winner};
use crate::resolve::{resolve, Resolved};

/// Competition rank of `value` in `population`.
///
/// Ties share a rank: equal times all count only the strictly faster ones.
pub fn rank(value: f64, population: &[f64]) -> u32 {
    population.iter().filter(|&&v| v < value).count() as u32 + 1
}

/// Rank as a percentage of the population, rounded half-to-even.
///
/// Returns 0 for an empty population; callers check emptiness first.
pub fn percentile(rank: u32, population_size: u32) -> u32 {
    if population_size == 0 {
        return 0;
    }
    ((rank as f64 / population_size as f64) * 100.0).round_ties_even() as u32
}

/// Rank a known time within a population of times.
pub fn stat_for_value(value: f64, population: &[f64], segment: Segment) -> Result<AthleteStat> {
    if population.is_empty() {
        return Err(AnalyticsError::EmptyPopulation { segment });
    }

    let rank = rank(value, population);
    let population_size = population.len() as u32;

    Ok(AthleteStat {
        value,
        rank,
        population_size,
        percentile: percentile(rank, population_size),
    })
}

/// The selected athlete's row in the full race-year table.
///
/// A name missing from the race-year is reported as
/// [`AnalyticsError::AthleteNotFound`], the usual sign of a selection left
/// over from a previous race.
pub fn find_athlete<'a>(resolved: &'a Resolved, selection: &Selection) -> Result<&'a ResultRow> {
    resolved
        .full
        .lookup_by_name(&selection.athlete)
        .map_err(|err| err.in_race_year(&selection.race, &selection.year))
}

/// The selected athlete's time for a segment.
pub fn athlete_value(resolved: &Resolved, selection: &Selection, segment: Segment) -> Result<f64> {
    let row = find_athlete(resolved, selection)?;
    row.time(segment).ok_or_else(|| AnalyticsError::MissingSegment {
        athlete: row.name.clone(),
        segment,
    })
}

/// Rank one side's athlete on a segment.
pub fn athlete_stat(
    catalog: &RaceCatalog,
    selection: &Selection,
    segment: Segment,
) -> Result<AthleteStat> {
    let resolved = resolve(catalog, selection)?;
    stat_in(&resolved, selection, segment)
}

/// Rank one side's athlete within an already resolved selection.
pub fn stat_in(resolved: &Resolved, selection: &Selection, segment: Segment) -> Result<AthleteStat> {
    let value = athlete_value(resolved, selection, segment)?;
    let population = resolved.subset.segment_values(segment);
    let stat = stat_for_value(value, &population, segment)?;

    debug!(
        athlete = %selection.athlete,
        segment = %segment,
        rank = stat.rank,
        population = stat.population_size,
        percentile = stat.percentile,
        "Ranked athlete"
    );

    Ok(stat)
}

/// Combine two ranked sides into a comparison.
pub fn combine(left: AthleteStat, right: AthleteStat) -> ComparisonResult {
    ComparisonResult {
        difference_minutes: (left.value - right.value).abs(),
        winner: Winner::from_values(left.value, right.value),
        left,
        right,
    }
}

/// Compare two selections on one segment.
///
/// The left side is evaluated first and its error, if any, is returned.
pub fn compare(
    catalog: &RaceCatalog,
    left: &Selection,
    right: &Selection,
    segment: Segment,
) -> Result<ComparisonResult> {
    let left_stat = athlete_stat(catalog, left, segment)?;
    let right_stat = athlete_stat(catalog, right, segment)?;
    Ok(combine(left_stat, right_stat))
}
