//! Request-scoped athlete selections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Column;

/// Which population an athlete's time is ranked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistributionKind {
    /// Every finisher in the race-year
    #[default]
    All,
    /// Finishers sharing a gender value
    Gender,
    /// Finishers sharing a division value
    Division,
}

impl DistributionKind {
    /// Attribute column the distribution filters on, `None` for `All`.
    pub fn column(&self) -> Option<Column> {
        match self {
            DistributionKind::All => None,
            DistributionKind::Gender => Some(Column::Gender),
            DistributionKind::Division => Some(Column::Division),
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionKind::All => write!(f, "All"),
            DistributionKind::Gender => write!(f, "Gender"),
            DistributionKind::Division => write!(f, "Division"),
        }
    }
}

impl FromStr for DistributionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(DistributionKind::All),
            "gender" => Ok(DistributionKind::Gender),
            "division" | "div" => Ok(DistributionKind::Division),
            other => Err(format!("unknown distribution: {}", other)),
        }
    }
}

/// One side of a comparison: a race-year, an athlete and the population
/// to rank them in.
///
/// Rebuilt from user input on every request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub race: String,
    pub year: String,
    pub athlete: String,
    #[serde(default)]
    pub distribution_kind: DistributionKind,
    /// Gender or division value; `None` means "the athlete's own"
    #[serde(default)]
    pub distribution_value: Option<String>,
}

impl Selection {
    /// Select an athlete ranked against the whole field.
    pub fn new(race: impl Into<String>, year: impl Into<String>, athlete: impl Into<String>) -> Self {
        Self {
            race: race.into(),
            year: year.into(),
            athlete: athlete.into(),
            distribution_kind: DistributionKind::All,
            distribution_value: None,
        }
    }

    /// Rank against a gender or division subset.
    pub fn with_distribution(mut self, kind: DistributionKind, value: Option<String>) -> Self {
        self.distribution_kind = kind;
        self.distribution_value = value;
        self
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.race, self.year, self.athlete, self.distribution_kind)?;
        if let Some(value) = &self.distribution_value {
            write!(f, "/{}", value)?;
        }
        Ok(())
    }
}

/// Parses `race/year/athlete[/kind[/value]]`.
impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').map(str::trim).collect();
        if parts.len() < 3 || parts.len() > 5 {
            return Err(format!(
                "expected race/year/athlete[/kind[/value]], got: {}",
                s
            ));
        }
        if parts[..3].iter().any(|p| p.is_empty()) {
            return Err(format!("race, year and athlete must be non-empty: {}", s));
        }

        let kind = match parts.get(3) {
            Some(k) => k.parse()?,
            None => DistributionKind::All,
        };
        let value = parts
            .get(4)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string());

        Ok(Selection::new(parts[0], parts[1], parts[2]).with_distribution(kind, value))
    }
}
