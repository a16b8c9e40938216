//! Comparison engine output.

use serde::{Deserialize, Serialize};

/// Which side of a comparison was faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Left,
    Right,
    Tie,
}

impl Winner {
    /// Lower time wins.
    pub fn from_values(left: f64, right: f64) -> Self {
        if left < right {
            Winner::Left
        } else if right < left {
            Winner::Right
        } else {
            Winner::Tie
        }
    }

    /// The outcome seen with the sides swapped.
    pub fn mirror(self) -> Self {
        match self {
            Winner::Left => Winner::Right,
            Winner::Right => Winner::Left,
            Winner::Tie => Winner::Tie,
        }
    }
}

/// One athlete's standing within their ranking population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AthleteStat {
    /// Segment time in decimal minutes
    pub value: f64,

    /// 1-based competition rank (count of strictly faster times + 1)
    pub rank: u32,

    /// Number of non-missing times in the population
    pub population_size: u32,

    /// rank / population_size as a rounded percentage
    pub percentile: u32,
}

/// Result of comparing two selections on one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub left: AthleteStat,
    pub right: AthleteStat,

    /// Absolute time gap in decimal minutes
    pub difference_minutes: f64,

    pub winner: Winner,
}
