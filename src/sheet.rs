//! Tabular input/output collaborator
//!
//! Reads one input string per row from a named column of a CSV file and
//! writes one annotated result row per input, keyed by original row
//! position. The discovery engine itself is agnostic to this format.

use crate::engine::{DiscoveryOutcome, DiscoveryStatus};
use crate::{Result, ScoutError};
use serde::Serialize;
use std::path::Path;

/// One annotated output row
#[derive(Debug, Serialize)]
pub struct ResultRow {
    #[serde(rename = "Row")]
    pub row_number: usize,
    #[serde(rename = "Original_Value")]
    pub original_value: String,
    #[serde(rename = "Instagram_URL")]
    pub instagram_url: String,
    #[serde(rename = "Instagram_Username")]
    pub instagram_username: String,
    #[serde(rename = "Status")]
    pub status: DiscoveryStatus,
    #[serde(rename = "Pages_Scanned")]
    pub pages_scanned: u32,
    #[serde(rename = "Found_On_Page")]
    pub found_on_page: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl ResultRow {
    /// Builds a row from a 1-based row number and its discovery outcome
    pub fn from_outcome(row_number: usize, outcome: &DiscoveryOutcome) -> Self {
        Self {
            row_number,
            original_value: outcome.original_input.clone(),
            instagram_url: outcome.handle_url.clone(),
            instagram_username: outcome.username.clone(),
            status: outcome.status,
            pages_scanned: outcome.pages_scanned,
            found_on_page: outcome.found_on_page.clone(),
            notes: outcome.notes.clone(),
        }
    }
}

/// Reads the values of one named column, one string per row
///
/// Rows missing the column yield an empty string so that row numbering
/// stays aligned with the input file.
pub fn read_rows(path: &Path, column: &str) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)?;

    let column_index = reader
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| ScoutError::MissingColumn(column.to_string()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.get(column_index).unwrap_or("").to_string());
    }

    tracing::info!("loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Writes the annotated results, ordered as given
pub fn write_results(path: &Path, rows: &[ResultRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    tracing::info!("wrote {} result rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[test]
    fn test_read_named_column() {
        let file = write_temp_csv("Name,Website\nAcme,https://acme.com\nBeta,@beta\n");
        let rows = read_rows(file.path(), "Website").unwrap();
        assert_eq!(rows, vec!["https://acme.com".to_string(), "@beta".to_string()]);
    }

    #[test]
    fn test_missing_column_errors() {
        let file = write_temp_csv("Name\nAcme\n");
        let err = read_rows(file.path(), "Website").unwrap_err();
        assert!(matches!(err, ScoutError::MissingColumn(_)));
    }

    #[test]
    fn test_short_record_yields_empty() {
        let file = write_temp_csv("Name,Website\nAcme,https://acme.com\n");
        let rows = read_rows(file.path(), "Website").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_write_and_reread_results() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.csv");

        let outcome = DiscoveryOutcome {
            original_input: "@john.doe".to_string(),
            handle_url: "https://www.instagram.com/john.doe/".to_string(),
            username: "john.doe".to_string(),
            status: DiscoveryStatus::FoundDirect,
            notes: "direct Instagram link".to_string(),
            pages_scanned: 0,
            found_on_page: String::new(),
        };
        let rows = vec![ResultRow::from_outcome(1, &outcome)];
        write_results(&path, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(0), Some("Row"));
        assert_eq!(headers.get(4), Some("Status"));

        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.get(3), Some("john.doe"));
        assert_eq!(record.get(4), Some("found_direct"));
    }
}
