//! Race catalog: every loaded result table keyed by race and year.
//!
//! Built once at startup and shared read-only afterwards.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{AnalyticsError, Result};
use crate::table::ResultTable;

/// Summary of one loaded race-year.
#[derive(Debug, Clone, Serialize)]
pub struct RaceYearInfo {
    pub year: String,
    pub athletes: usize,
}

/// Summary of one race and its years (newest first).
#[derive(Debug, Clone, Serialize)]
pub struct RaceInfo {
    pub name: String,
    pub years: Vec<RaceYearInfo>,
}

/// Mapping from race name to year to result table.
#[derive(Debug, Clone, Default)]
pub struct RaceCatalog {
    races: Vec<String>,
    tables: BTreeMap<String, BTreeMap<String, Arc<ResultTable>>>,
}

impl RaceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table. A second table for the same race-year replaces the first.
    ///
    /// Races keep the order in which they were first inserted.
    pub fn insert(&mut self, race: impl Into<String>, year: impl Into<String>, table: ResultTable) {
        let race = race.into();
        if !self.tables.contains_key(&race) {
            self.races.push(race.clone());
        }
        self.tables
            .entry(race)
            .or_default()
            .insert(year.into(), Arc::new(table));
    }

    /// Builder-style [`RaceCatalog::insert`].
    pub fn with_table(
        mut self,
        race: impl Into<String>,
        year: impl Into<String>,
        table: ResultTable,
    ) -> Self {
        self.insert(race, year, table);
        self
    }

    /// Table for a race-year.
    pub fn get(&self, race: &str, year: &str) -> Result<&Arc<ResultTable>> {
        self.tables
            .get(race)
            .and_then(|years| years.get(year))
            .ok_or_else(|| AnalyticsError::UnknownRaceYear {
                race: race.to_string(),
                year: year.to_string(),
            })
    }

    /// Race names in insertion order.
    pub fn races(&self) -> &[String] {
        &self.races
    }

    /// Years available for a race, newest first. Empty for an unknown race.
    pub fn years(&self, race: &str) -> Vec<String> {
        self.tables
            .get(race)
            .map(|years| years.keys().rev().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains_race(&self, race: &str) -> bool {
        self.tables.contains_key(race)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of race-year tables.
    pub fn table_count(&self) -> usize {
        self.tables.values().map(BTreeMap::len).sum()
    }

    /// Races with their years and field sizes.
    pub fn summary(&self) -> Vec<RaceInfo> {
        self.races
            .iter()
            .map(|race| RaceInfo {
                name: race.clone(),
                years: self
                    .years(race)
                    .into_iter()
                    .map(|year| {
                        let athletes = self.get(race, &year).map(|t| t.len()).unwrap_or(0);
                        RaceYearInfo { year, athletes }
                    })
                    .collect(),
            })
            .collect()
    }
}
