//! Chart-ready views over comparison results.
//!
//! This is the boundary to whatever renders the dashboard. Analytics errors
//! never escape a view: each side degrades to a placeholder panel carrying
//! the error so the caller can wait for the selection to settle.

mod histogram;

pub use histogram::Histogram;

use serde::Serialize;
use tracing::debug;

use crate::calculate::{combine, find_athlete, stat_in};
use crate::catalog::RaceCatalog;
use crate::error::{AnalyticsError, Result};
use crate::format::{format_duration, format_ordinal};
use crate::models::{AthleteStat, ComparisonResult, Segment, Selection, Winner};
use crate::resolve::resolve;

/// Shown wherever a value cannot be computed.
pub const PLACEHOLDER: &str = "—";

/// Error attached to a degraded panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelError {
    pub code: &'static str,
    pub message: String,
}

impl From<&AnalyticsError> for PanelError {
    fn from(err: &AnalyticsError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Highlighted athlete on a histogram or box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteMarker {
    pub athlete: String,
    pub value: f64,
    /// Formatted time, e.g. `1:05:30`
    pub time: String,
    pub stat: AthleteStat,
    /// e.g. `50th percentile (2 out of 4)`
    pub legend: String,
}

/// Raw population values with the athlete's time highlighted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlot {
    pub values: Vec<f64>,
    pub highlight: Option<f64>,
}

/// Everything one side of the comparison chart shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidePanel {
    /// Series name, e.g. `Rockwood 2018: F30-39`
    pub label: String,
    pub athlete: String,
    pub histogram: Option<Histogram>,
    pub box_plot: Option<BoxPlot>,
    pub marker: Option<AthleteMarker>,
    pub error: Option<PanelError>,
}

/// Two-sided comparison of one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub segment: Segment,
    pub left: SidePanel,
    pub right: SidePanel,
    /// Tallest bin across both histograms, the height of marker lines
    pub y_max: usize,
    /// Sentence describing who was faster, or why it cannot be said
    pub summary: String,
    pub result: Option<ComparisonResult>,
}

impl ComparisonView {
    /// Both sides resolved and ranked.
    pub fn is_ready(&self) -> bool {
        self.result.is_some()
    }
}

/// Legend text for a ranked athlete.
pub fn stat_legend(stat: &AthleteStat) -> String {
    format!(
        "{} percentile ({} out of {})",
        format_ordinal(stat.percentile),
        stat.rank,
        stat.population_size
    )
}

/// Sentence stating who was faster and by how much.
pub fn comparison_sentence(left: &Selection, right: &Selection, result: &ComparisonResult) -> String {
    let describe = |s: &Selection| format!("{} ({} {})", s.athlete, s.race, s.year);
    let gap = format_duration(result.difference_minutes);

    match result.winner {
        Winner::Left => format!("{} was faster than {} by: {}", describe(left), describe(right), gap),
        Winner::Right => format!("{} was faster than {} by: {}", describe(right), describe(left), gap),
        Winner::Tie => format!("{} was the same speed as {}!", describe(left), describe(right)),
    }
}

fn series_label(selection: &Selection, distribution_value: &str) -> String {
    format!("{} {}: {}", selection.race, selection.year, distribution_value)
}

/// One side's panel and its stat when ranking succeeded.
fn side_panel(
    catalog: &RaceCatalog,
    selection: &Selection,
    segment: Segment,
    bins: usize,
) -> (SidePanel, Result<AthleteStat>) {
    let resolved = match resolve(catalog, selection) {
        Ok(resolved) => resolved,
        Err(err) => {
            debug!(selection = %selection, error = %err, "Selection did not resolve");
            let value = selection.distribution_value.as_deref().unwrap_or(PLACEHOLDER);
            let panel = SidePanel {
                label: series_label(selection, value),
                athlete: selection.athlete.clone(),
                histogram: None,
                box_plot: None,
                marker: None,
                error: Some(PanelError::from(&err)),
            };
            return (panel, Err(err));
        }
    };

    let population = resolved.subset.segment_values(segment);
    let stat = stat_in(&resolved, selection, segment);
    let marker = stat.as_ref().ok().map(|stat| marker_for(selection, stat));
    if let Err(err) = &stat {
        debug!(selection = %selection, error = %err, "Athlete could not be ranked");
    }

    let panel = SidePanel {
        label: series_label(selection, &resolved.distribution_value),
        athlete: selection.athlete.clone(),
        histogram: Histogram::new(&population, bins),
        box_plot: (!population.is_empty()).then(|| BoxPlot {
            values: population.clone(),
            highlight: stat.as_ref().ok().map(|s| s.value),
        }),
        marker,
        error: stat.as_ref().err().map(PanelError::from),
    };

    (panel, stat)
}

fn marker_for(selection: &Selection, stat: &AthleteStat) -> AthleteMarker {
    AthleteMarker {
        athlete: selection.athlete.clone(),
        value: stat.value,
        time: format_duration(stat.value),
        stat: *stat,
        legend: stat_legend(stat),
    }
}

/// Build the comparison view for two selections.
///
/// Each side is resolved independently, so a stale right-hand selection
/// still leaves the left panel fully drawn.
pub fn comparison_view(
    catalog: &RaceCatalog,
    left: &Selection,
    right: &Selection,
    segment: Segment,
    bins: usize,
) -> ComparisonView {
    let (left_panel, left_stat) = side_panel(catalog, left, segment, bins);
    let (right_panel, right_stat) = side_panel(catalog, right, segment, bins);

    let y_max = [&left_panel, &right_panel]
        .iter()
        .filter_map(|p| p.histogram.as_ref().map(Histogram::max_count))
        .max()
        .unwrap_or(0);

    let (summary, result) = match (left_stat, right_stat) {
        (Ok(l), Ok(r)) => {
            let result = combine(l, r);
            (comparison_sentence(left, right, &result), Some(result))
        }
        (Err(err), _) | (_, Err(err)) => (format!("{} {}", PLACEHOLDER, err), None),
    };

    ComparisonView {
        segment,
        left: left_panel,
        right: right_panel,
        y_max,
        summary,
        result,
    }
}

/// Per-segment views for two athletes of the same race-year.
///
/// Covers every segment the race recorded, in dashboard order.
pub fn segment_views(
    catalog: &RaceCatalog,
    race: &str,
    year: &str,
    left_athlete: &str,
    right_athlete: &str,
    bins: usize,
) -> Result<Vec<ComparisonView>> {
    let table = catalog.get(race, year)?;
    let recorded = table.segments();
    let left = Selection::new(race, year, left_athlete);
    let right = Selection::new(race, year, right_athlete);

    Ok(Segment::ALL
        .iter()
        .filter(|s| recorded.contains(*s))
        .map(|&segment| comparison_view(catalog, &left, &right, segment, bins))
        .collect())
}

/// One line of an athlete summary card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentTime {
    pub segment: Segment,
    pub label: &'static str,
    pub minutes: Option<f64>,
    pub display: String,
}

/// Published result of one athlete in one race-year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteSummary {
    pub name: String,
    pub race: String,
    pub year: String,
    pub gender: String,
    pub division: String,
    pub place: String,
    pub division_place: String,
    pub times: Vec<SegmentTime>,
}

/// Summary card for an athlete; unrecorded values show as placeholders.
pub fn athlete_summary(
    catalog: &RaceCatalog,
    race: &str,
    year: &str,
    name: &str,
) -> Result<AthleteSummary> {
    let selection = Selection::new(race, year, name);
    let resolved = resolve(catalog, &selection)?;
    let row = find_athlete(&resolved, &selection)?;

    let show = |v: Option<u32>| v.map_or_else(|| PLACEHOLDER.to_string(), |p| p.to_string());

    Ok(AthleteSummary {
        name: row.name.clone(),
        race: race.to_string(),
        year: year.to_string(),
        gender: row.gender.clone(),
        division: row.division.clone(),
        place: show(row.place),
        division_place: show(row.division_place),
        times: Segment::ALL
            .iter()
            .map(|&segment| {
                let minutes = row.time(segment);
                SegmentTime {
                    segment,
                    label: segment.label(),
                    minutes,
                    display: minutes.map_or_else(|| PLACEHOLDER.to_string(), format_duration),
                }
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DistributionKind;
    use crate::test_support::sample_catalog;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stat_legend() {
        let stat = AthleteStat {
            value: 12.0,
            rank: 2,
            population_size: 4,
            percentile: 50,
        };
        assert_eq!(stat_legend(&stat), "50th percentile (2 out of 4)");
    }

    #[test]
    fn test_comparison_view_ready() {
        let catalog = sample_catalog();
        let left = Selection::new("Rockwood", "2018", "Bob Ray");
        let right = Selection::new("Rockwood", "2017", "Ann Lee");
        let view = comparison_view(&catalog, &left, &right, Segment::Finish, 12);

        assert!(view.is_ready());
        assert_eq!(
            view.summary,
            "Bob Ray (Rockwood 2018) was faster than Ann Lee (Rockwood 2017) by: 09:00"
        );
        assert_eq!(view.left.label, "Rockwood 2018: All");
        assert_eq!(view.left.marker.as_ref().unwrap().legend, "20th percentile (1 out of 5)");
        assert_eq!(view.right.marker.as_ref().unwrap().time, "1:24:00");
        assert_eq!(view.left.histogram.as_ref().unwrap().counts.len(), 12);
        assert_eq!(view.left.box_plot.as_ref().unwrap().values.len(), 5);
        assert!(view.y_max >= 1);
    }

    #[test]
    fn test_comparison_view_right_wins_sentence() {
        let catalog = sample_catalog();
        let left = Selection::new("Rockwood", "2018", "Cat Poe");
        let right = Selection::new("Hampton", "2018", "Cat Poe");
        let view = comparison_view(&catalog, &left, &right, Segment::Finish, 12);

        assert_eq!(view.result.as_ref().unwrap().winner, Winner::Right);
        assert_eq!(
            view.summary,
            "Cat Poe (Hampton 2018) was faster than Cat Poe (Rockwood 2018) by: 02:00"
        );
    }

    #[test]
    fn test_comparison_view_tie_sentence() {
        let catalog = sample_catalog();
        let left = Selection::new("Rockwood", "2018", "Ann Lee");
        let right = Selection::new("Rockwood", "2018", "Eve Kim");
        let view = comparison_view(&catalog, &left, &right, Segment::Finish, 12);

        assert_eq!(
            view.summary,
            "Ann Lee (Rockwood 2018) was the same speed as Eve Kim (Rockwood 2018)!"
        );
    }

    #[test]
    fn test_comparison_view_stale_side_degrades() {
        let catalog = sample_catalog();
        let left = Selection::new("Rockwood", "2018", "Ann Lee")
            .with_distribution(DistributionKind::Division, None);
        let right = Selection::new("Hampton", "2018", "Bob Ray");
        let view = comparison_view(&catalog, &left, &right, Segment::Finish, 12);

        assert!(!view.is_ready());
        assert!(view.left.marker.is_some());
        assert_eq!(view.left.label, "Rockwood 2018: F30-39");
        assert!(view.right.marker.is_none());
        assert!(view.right.histogram.is_some());
        assert_eq!(view.right.error.as_ref().unwrap().code, "ATHLETE_NOT_FOUND");
        assert!(view.summary.starts_with(PLACEHOLDER));
    }

    #[test]
    fn test_comparison_view_stale_gender_side_degrades() {
        let catalog = sample_catalog();
        let left = Selection::new("Rockwood", "2018", "Ann Lee");
        let right = Selection::new("Hampton", "2018", "Bob Ray")
            .with_distribution(DistributionKind::Gender, None);
        let view = comparison_view(&catalog, &left, &right, Segment::Finish, 12);

        assert!(!view.is_ready());
        assert!(view.left.marker.is_some());
        assert!(view.right.histogram.is_none());
        assert_eq!(view.right.error.as_ref().unwrap().code, "ATHLETE_NOT_FOUND");
    }

    #[test]
    fn test_comparison_view_unknown_race_year() {
        let catalog = sample_catalog();
        let left = Selection::new("Rockwood", "2099", "Ann Lee");
        let right = Selection::new("Rockwood", "2018", "Ann Lee");
        let view = comparison_view(&catalog, &left, &right, Segment::Finish, 12);

        assert_eq!(view.left.label, "Rockwood 2099: —");
        assert!(view.left.histogram.is_none());
        assert_eq!(view.left.error.as_ref().unwrap().code, "UNKNOWN_RACE_YEAR");
        assert!(view.right.marker.is_some());
    }

    #[test]
    fn test_comparison_view_missing_segment() {
        let catalog = sample_catalog();
        let left = Selection::new("Hampton", "2018", "Cat Poe");
        let right = Selection::new("Rockwood", "2018", "Cat Poe");
        let view = comparison_view(&catalog, &left, &right, Segment::T1, 12);

        assert!(!view.is_ready());
        assert!(view.left.histogram.is_none());
        assert_eq!(view.left.error.as_ref().unwrap().code, "MISSING_SEGMENT");
        assert!(view.right.marker.is_some());
    }

    #[test]
    fn test_segment_views_skip_unrecorded() {
        let catalog = sample_catalog();
        let views = segment_views(&catalog, "Hampton", "2018", "Cat Poe", "Jo Wu", 16).unwrap();
        let segments: Vec<Segment> = views.iter().map(|v| v.segment).collect();

        assert_eq!(
            segments,
            vec![Segment::Finish, Segment::Swim, Segment::Bike, Segment::Run]
        );
        assert!(views.iter().all(|v| v.is_ready()));
        assert_eq!(views[0].left.histogram.as_ref().unwrap().counts.len(), 16);
    }

    #[test]
    fn test_segment_views_unknown_race() {
        let catalog = sample_catalog();
        assert!(segment_views(&catalog, "Hampton", "2017", "Cat Poe", "Jo Wu", 16).is_err());
    }

    #[test]
    fn test_athlete_summary() {
        let catalog = sample_catalog();
        let summary = athlete_summary(&catalog, "Rockwood", "2018", "Dee Fox").unwrap();

        assert_eq!(summary.place, "4");
        assert_eq!(summary.division, "F40-49");
        assert_eq!(summary.times[0].display, "1:25:30");
        let t1 = summary.times.iter().find(|t| t.segment == Segment::T1).unwrap();
        assert_eq!(t1.display, PLACEHOLDER);
        assert_eq!(t1.minutes, None);
    }

    #[test]
    fn test_athlete_summary_unknown_athlete() {
        let catalog = sample_catalog();
        let err = athlete_summary(&catalog, "Rockwood", "2018", "Nobody").unwrap_err();
        assert!(matches!(err, AnalyticsError::AthleteNotFound { .. }));
    }
}
