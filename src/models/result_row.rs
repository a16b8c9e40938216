//! Per-athlete race result record.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Segment;

/// Categorical and rank attributes of a result row.
///
/// Segment times are addressed separately through [`Segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Gender,
    Division,
    Place,
    DivisionPlace,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Gender => "gender",
            Column::Division => "division",
            Column::Place => "place",
            Column::DivisionPlace => "div_place",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Column::Name),
            "gender" => Ok(Column::Gender),
            "division" | "div" => Ok(Column::Division),
            "place" => Ok(Column::Place),
            "div_place" | "division_place" => Ok(Column::DivisionPlace),
            other => Err(format!("unknown column: {}", other)),
        }
    }
}

/// One athlete's record in one race-year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Athlete name, unique within a race-year table
    pub name: String,

    pub gender: String,

    /// Age-group division (e.g., "F30-39")
    pub division: String,

    /// Overall place as published
    pub place: Option<u32>,

    /// Division place as published
    pub division_place: Option<u32>,

    /// Segment durations in decimal minutes. Absent means not recorded.
    pub segment_times: BTreeMap<Segment, f64>,
}

impl ResultRow {
    /// Create a row with no segment times.
    pub fn new(name: impl Into<String>, gender: impl Into<String>, division: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gender: gender.into(),
            division: division.into(),
            place: None,
            division_place: None,
            segment_times: BTreeMap::new(),
        }
    }

    /// Set published overall and division places.
    pub fn with_places(mut self, place: u32, division_place: u32) -> Self {
        self.place = Some(place);
        self.division_place = Some(division_place);
        self
    }

    /// Record a segment time. Non-finite values are treated as missing.
    pub fn with_time(mut self, segment: Segment, minutes: f64) -> Self {
        if minutes.is_finite() {
            self.segment_times.insert(segment, minutes);
        }
        self
    }

    /// Time for a segment, `None` when the race did not record it.
    pub fn time(&self, segment: Segment) -> Option<f64> {
        self.segment_times.get(&segment).copied()
    }

    /// Text value of an attribute column, `None` for an unpublished place.
    pub fn attribute(&self, column: Column) -> Option<Cow<'_, str>> {
        match column {
            Column::Name => Some(Cow::Borrowed(&self.name)),
            Column::Gender => Some(Cow::Borrowed(&self.gender)),
            Column::Division => Some(Cow::Borrowed(&self.division)),
            Column::Place => self.place.map(|p| Cow::Owned(p.to_string())),
            Column::DivisionPlace => self.division_place.map(|p| Cow::Owned(p.to_string())),
        }
    }
}
