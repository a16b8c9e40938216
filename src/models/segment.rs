//! Timed race segments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One timed portion of a race.
///
/// `Ord` follows race order with the overall finish first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    /// Overall finish time (`finish`, or `time_total` in older exports)
    #[serde(alias = "time_total")]
    Finish,
    Swim,
    T1,
    Bike,
    T2,
    Run,
}

impl Segment {
    /// All segments in the order the dashboard offers them.
    pub const ALL: [Segment; 6] = [
        Segment::Finish,
        Segment::Swim,
        Segment::Bike,
        Segment::Run,
        Segment::T1,
        Segment::T2,
    ];

    /// Canonical column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Finish => "finish",
            Segment::Swim => "swim",
            Segment::T1 => "t1",
            Segment::Bike => "bike",
            Segment::T2 => "t2",
            Segment::Run => "run",
        }
    }

    /// Human label used in summaries ("Total time", "Swim", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Segment::Finish => "Total time",
            Segment::Swim => "Swim",
            Segment::T1 => "T1",
            Segment::Bike => "Bike",
            Segment::T2 => "T2",
            Segment::Run => "Run",
        }
    }

    /// Resolve a column header to a segment, accepting the `time_total` alias.
    pub fn from_column(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "finish" | "time_total" => Some(Segment::Finish),
            "swim" => Some(Segment::Swim),
            "t1" => Some(Segment::T1),
            "bike" => Some(Segment::Bike),
            "t2" => Some(Segment::T2),
            "run" => Some(Segment::Run),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Segment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Segment::from_column(s).ok_or_else(|| format!("unknown segment: {}", s))
    }
}
