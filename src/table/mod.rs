//! In-memory result table for one race-year.
//!
//! Tables are built once at load time and never mutated. Filtering returns
//! a new table holding the matching rows in their original order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{AnalyticsError, Result};
use crate::models::{Column, ResultRow, Segment};

/// Ordered collection of [`ResultRow`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Build a table from rows without checking name uniqueness.
    ///
    /// [`crate::storage`] rejects duplicate names at load time.
    pub fn from_rows(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows matching an arbitrary predicate.
    pub fn filter<F>(&self, predicate: F) -> ResultTable
    where
        F: Fn(&ResultRow) -> bool,
    {
        ResultTable {
            rows: self.rows.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }

    /// Rows whose column equals `value` exactly (case-sensitive).
    ///
    /// No match yields an empty table, not an error.
    pub fn filter_equals(&self, column: Column, value: &str) -> ResultTable {
        self.filter(|row| row.attribute(column).as_deref() == Some(value))
    }

    /// Rows whose column equals `value` ignoring ASCII case.
    pub fn filter_equals_ignore_case(&self, column: Column, value: &str) -> ResultTable {
        self.filter(|row| {
            row.attribute(column)
                .is_some_and(|v| v.eq_ignore_ascii_case(value))
        })
    }

    /// Distinct values of a column, sorted.
    pub fn column_values(&self, column: Column) -> BTreeSet<String> {
        self.rows
            .iter()
            .filter_map(|row| row.attribute(column).map(|v| v.into_owned()))
            .collect()
    }

    /// Find the row for an athlete by exact name.
    pub fn lookup_by_name(&self, name: &str) -> Result<&ResultRow> {
        let mut matches = self.rows.iter().filter(|row| row.name == name);
        let first = matches.next().ok_or_else(|| AnalyticsError::NotFound {
            name: name.to_string(),
        })?;

        let extra = matches.count();
        if extra > 0 {
            return Err(AnalyticsError::Ambiguous {
                name: name.to_string(),
                count: extra + 1,
            });
        }

        Ok(first)
    }

    /// Recorded times for a segment in row order, skipping missing ones.
    pub fn segment_values(&self, segment: Segment) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.time(segment))
            .filter(|v| !v.is_nan())
            .collect()
    }

    /// Athlete names sorted ascending.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rows.iter().map(|r| r.name.clone()).collect();
        names.sort();
        names
    }

    /// Segments recorded for at least one row.
    pub fn segments(&self) -> BTreeSet<Segment> {
        self.rows
            .iter()
            .flat_map(|row| row.segment_times.keys().copied())
            .collect()
    }
}

impl FromIterator<ResultRow> for ResultTable {
    fn from_iter<I: IntoIterator<Item = ResultRow>>(iter: I) -> Self {
        Self::from_rows(iter.into_iter().collect())
    }
}
