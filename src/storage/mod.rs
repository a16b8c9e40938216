//! Race results storage.
//!
//! Loads one CSV file per race-year into the [`RaceCatalog`] at startup:
//! - explicit `[[races]]` entries from the config, or
//! - files discovered as `<data_dir>/<Race>/<year>.csv`
//!
//! Any failure here is fatal to startup.

mod csv_file;

pub use csv_file::{load_table, read_table};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::catalog::RaceCatalog;
use crate::config::{AppConfig, RaceSource};

/// Errors that can occur while loading race results.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: missing required column {column:?}")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{path} line {line}: invalid {column} value {value:?}")]
    InvalidValue {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    #[error("{path}: athlete {name:?} appears more than once")]
    DuplicateName { path: PathBuf, name: String },

    #[error("Invalid discovery pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("No race results found under {0}")]
    NoResults(PathBuf),
}

/// Find `<data_dir>/<Race>/<year>.csv` files, sorted by race then year.
pub fn discover(data_dir: &Path) -> Result<Vec<RaceSource>, StorageError> {
    let pattern = data_dir.join("*").join("*.csv");
    let mut sources: Vec<RaceSource> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .filter_map(|path| {
            let year = path.file_stem()?.to_str()?.to_string();
            let race = path.parent()?.file_name()?.to_str()?.to_string();
            Some(RaceSource {
                name: race,
                year,
                file: path,
            })
        })
        .collect();

    sources.sort_by(|a, b| (&a.name, &a.year).cmp(&(&b.name, &b.year)));
    Ok(sources)
}

/// Build the catalog from the configured or discovered sources.
pub fn load_catalog(config: &AppConfig) -> Result<RaceCatalog, StorageError> {
    let sources = if config.races.is_empty() {
        discover(&config.data_dir)?
    } else {
        config.races.clone()
    };

    if sources.is_empty() {
        return Err(StorageError::NoResults(config.data_dir.clone()));
    }

    let mut catalog = RaceCatalog::new();
    for source in &sources {
        let path = config.race_path(source);
        let table = load_table(&path)?;
        info!(
            race = %source.name,
            year = %source.year,
            athletes = table.len(),
            "Loaded results from {:?}",
            path
        );
        catalog.insert(source.name.clone(), source.year.clone(), table);
    }

    info!(
        "Race catalog ready: {} races, {} tables",
        catalog.races().len(),
        catalog.table_count()
    );
    Ok(catalog)
}
