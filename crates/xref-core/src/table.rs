//! Delimited table loading.
//!
//! Source tables are semicolon-separated UTF-8 text, exported from
//! spreadsheets and therefore messy: a leading BOM, ragged row widths, blank
//! lines. The csv reader consumes a leading BOM itself; the normalizer
//! strips any that survive elsewhere in a field. Rows that are too short
//! are dropped here; column-level cleaning and empty-field checks happen in
//! the index builders. The only reportable failure is an unreadable file.

use crate::error::{Result, XrefError};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| XrefError::from(e).with_path(path))
}

/// Read the primary table: at least two columns per row, (Turbo P/N, E&E P/N).
///
/// Rows with fewer than two fields are skipped silently; this is data-quality
/// tolerance, not an error. Fields are returned uncleaned; the index builder
/// trims and normalizes them.
pub fn read_pair_rows(path: &Path) -> Result<Vec<(String, String)>> {
    let mut reader = open_reader(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(XrefError::from(e).with_path(path)),
            Err(e) => {
                debug!("Skipping malformed row in {}: {}", path.display(), e);
                continue;
            }
        };
        if record.len() < 2 {
            debug!(
                "Skipping row with {} column(s) in {}",
                record.len(),
                path.display()
            );
            continue;
        }
        rows.push((record[0].to_string(), record[1].to_string()));
    }
    Ok(rows)
}

/// Read the cross-reference table: at least three columns per row,
/// (foreign code, internal code, internal label).
pub fn read_xref_rows(path: &Path) -> Result<Vec<(String, String, String)>> {
    let mut reader = open_reader(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(XrefError::from(e).with_path(path)),
            Err(e) => {
                debug!("Skipping malformed row in {}: {}", path.display(), e);
                continue;
            }
        };
        if record.len() < 3 {
            debug!(
                "Skipping row with {} column(s) in {}",
                record.len(),
                path.display()
            );
            continue;
        }
        rows.push((
            record[0].to_string(),
            record[1].to_string(),
            record[2].to_string(),
        ));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_table(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_pair_rows() {
        let file = write_table("17201-52010;CT-VNT11B\n17201-97010;CT-12B\n");
        let rows = read_pair_rows(file.path()).unwrap();
        assert_eq!(
            rows,
            vec![
                ("17201-52010".to_string(), "CT-VNT11B".to_string()),
                ("17201-97010".to_string(), "CT-12B".to_string()),
            ]
        );
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let file = write_table("17201-52010;CT-VNT11B\nonly-one-column\n\n");
        let rows = read_pair_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_leading_bom_is_tolerated() {
        // The csv reader consumes a leading BOM before the first field.
        let file = write_table("\u{feff}17201-52010;CT-VNT11B\n");
        let rows = read_pair_rows(file.path()).unwrap();
        assert_eq!(rows[0].0, "17201-52010");
    }

    #[test]
    fn test_extra_columns_are_tolerated() {
        let file = write_table("A;B;extra;more\n");
        let rows = read_pair_rows(file.path()).unwrap();
        assert_eq!(rows, vec![("A".to_string(), "B".to_string())]);
    }

    #[test]
    fn test_missing_file_is_data_source_error() {
        let err = read_pair_rows(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(err.is_fatal());
        match err {
            XrefError::DataSource { path, .. } => {
                assert_eq!(path.as_deref(), Some(Path::new("/nonexistent/data.csv")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_xref_rows() {
        let file = write_table("JRN101;100-200;17201-52010\nJRN102;100-201\n");
        let rows = read_xref_rows(file.path()).unwrap();
        // The two-column row is dropped.
        assert_eq!(
            rows,
            vec![(
                "JRN101".to_string(),
                "100-200".to_string(),
                "17201-52010".to_string()
            )]
        );
    }
}
