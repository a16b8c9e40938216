//! CSV result files.
//!
//! Headers are matched case-insensitively. `name`, `gender` and `division`
//! (or `div`) are required; everything else is optional. Empty, `NaN` and
//! `NA` cells mean "not recorded".

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use super::StorageError;
use crate::models::{Column, ResultRow, Segment};
use crate::table::ResultTable;

/// Column positions resolved from a header row.
struct Layout {
    name: usize,
    gender: usize,
    division: usize,
    place: Option<usize>,
    division_place: Option<usize>,
    segments: Vec<(Segment, usize)>,
}

impl Layout {
    fn from_headers(headers: &StringRecord, path: &Path) -> Result<Self, StorageError> {
        let mut name = None;
        let mut gender = None;
        let mut division = None;
        let mut place = None;
        let mut division_place = None;
        let mut segments = Vec::new();

        for (idx, header) in headers.iter().enumerate() {
            if let Some(segment) = Segment::from_column(header) {
                if !segments.iter().any(|(s, _)| *s == segment) {
                    segments.push((segment, idx));
                }
                continue;
            }
            match header.parse::<Column>() {
                Ok(Column::Name) => name = name.or(Some(idx)),
                Ok(Column::Gender) => gender = gender.or(Some(idx)),
                Ok(Column::Division) => division = division.or(Some(idx)),
                Ok(Column::Place) => place = place.or(Some(idx)),
                Ok(Column::DivisionPlace) => division_place = division_place.or(Some(idx)),
                Err(_) => debug!("Ignoring column {:?} in {:?}", header, path),
            }
        }

        let require = |idx: Option<usize>, column: &'static str| {
            idx.ok_or_else(|| StorageError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })
        };

        Ok(Self {
            name: require(name, "name")?,
            gender: require(gender, "gender")?,
            division: require(division, "division")?,
            place,
            division_place,
            segments,
        })
    }
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("na")
}

fn invalid(path: &Path, record: &StringRecord, column: &str, value: &str) -> StorageError {
    StorageError::InvalidValue {
        path: path.to_path_buf(),
        line: record.position().map(|p| p.line()).unwrap_or(0),
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Integer place; pandas writes float columns with NaNs as `3.0`.
fn parse_place(
    record: &StringRecord,
    idx: Option<usize>,
    column: &str,
    path: &Path,
) -> Result<Option<u32>, StorageError> {
    let Some(cell) = idx.and_then(|i| record.get(i)) else {
        return Ok(None);
    };
    if is_missing(cell) {
        return Ok(None);
    }
    if let Ok(place) = cell.parse::<u32>() {
        return Ok(Some(place));
    }
    match cell.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(Some(v as u32)),
        _ => Err(invalid(path, record, column, cell)),
    }
}

/// Read a result table from any reader. `path` is used in error messages.
pub fn read_table<R: Read>(reader: R, path: &Path) -> Result<ResultTable, StorageError> {
    let csv_err = |source: csv::Error| StorageError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_err)?.clone();
    let layout = Layout::from_headers(&headers, path)?;

    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let name = cell(layout.name);
        if name.is_empty() {
            debug!("Skipping unnamed row in {:?}", path);
            continue;
        }
        if !seen.insert(name.to_string()) {
            return Err(StorageError::DuplicateName {
                path: path.to_path_buf(),
                name: name.to_string(),
            });
        }

        let mut row = ResultRow::new(name, cell(layout.gender), cell(layout.division));
        row.place = parse_place(&record, layout.place, "place", path)?;
        row.division_place = parse_place(&record, layout.division_place, "div_place", path)?;

        for &(segment, idx) in &layout.segments {
            let value = cell(idx);
            if is_missing(value) {
                continue;
            }
            let minutes: f64 = value
                .parse()
                .map_err(|_| invalid(path, &record, segment.as_str(), value))?;
            if !minutes.is_finite() || minutes < 0.0 {
                return Err(invalid(path, &record, segment.as_str(), value));
            }
            row = row.with_time(segment, minutes);
        }

        rows.push(row);
    }

    Ok(ResultTable::from_rows(rows))
}

/// Load a result table from a CSV file.
pub fn load_table(path: &Path) -> Result<ResultTable, StorageError> {
    let file = std::fs::File::open(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(file, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<ResultTable, StorageError> {
        read_table(text.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn test_read_full_table() {
        let table = parse(
            "name,gender,division,place,div_place,finish,swim,bike,run,t1,t2\n\
             Ann Lee,F,F30-39,2,1,80.0,12.0,40.0,25.0,1.5,1.5\n\
             Bob Ray,M,M40-49,1,1,75.0,11.0,38.0,23.5,1.2,1.3\n",
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        let ann = table.lookup_by_name("Ann Lee").unwrap();
        assert_eq!(ann.place, Some(2));
        assert_eq!(ann.division_place, Some(1));
        assert_eq!(ann.time(Segment::T2), Some(1.5));
    }

    #[test]
    fn test_read_alias_headers() {
        let table = parse(
            "Name,Gender,div,place,div_place,time_total,swim,bike,run\n\
             Ivy Day,f,f20-29,2.0,1.0,100.5,18.0,50.0,32.5\n",
        )
        .unwrap();

        let ivy = table.lookup_by_name("Ivy Day").unwrap();
        assert_eq!(ivy.division, "f20-29");
        assert_eq!(ivy.place, Some(2));
        assert_eq!(ivy.time(Segment::Finish), Some(100.5));
        assert_eq!(ivy.time(Segment::T1), None);
    }

    #[test]
    fn test_missing_cells_are_absent_not_zero() {
        let table = parse(
            "name,gender,division,finish,t1\n\
             Dee Fox,F,F40-49,85.5,\n\
             Eve Kim,F,F30-39,NaN,1.4\n",
        )
        .unwrap();

        assert_eq!(table.segment_values(Segment::T1), vec![1.4]);
        assert_eq!(table.segment_values(Segment::Finish), vec![85.5]);
    }

    #[test]
    fn test_missing_required_column() {
        let err = parse("name,gender,finish\nAnn Lee,F,80\n").unwrap_err();
        assert!(matches!(
            err,
            StorageError::MissingColumn {
                column: "division",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_time() {
        let err = parse("name,gender,division,swim\nAnn Lee,F,F30-39,fast\n").unwrap_err();
        match err {
            StorageError::InvalidValue { line, column, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, "swim");
                assert_eq!(value, "fast");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_finite_time_rejected() {
        let err = parse("name,gender,division,bike\nAnn Lee,F,F30-39,inf\n").unwrap_err();
        assert!(matches!(
            err,
            StorageError::InvalidValue { ref column, ref value, .. } if column == "bike" && value == "inf"
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = parse(
            "name,gender,division\nAnn Lee,F,F30-39\nAnn Lee,F,F40-49\n",
        )
        .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateName { .. }));
    }

    #[test]
    fn test_load_table_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("results.csv");
        std::fs::write(&path, "name,gender,division,run\nJo Wu,F,F30-39,35.25\n").unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.segment_values(Segment::Run), vec![35.25]);
    }
}
