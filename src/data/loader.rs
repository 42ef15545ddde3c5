use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::model::{Dataset, Observation};
use crate::error::LoadError;

/// Token Eurostat writes for "not available".
pub const MISSING_SENTINEL: &str = ":";
/// Substring marking supranational rollups ("Euro area (19 countries)",
/// "European Union (28 countries)", ...).
pub const AGGREGATE_MARKER: &str = "Euro";
/// Prefix of the chain-linked volume units ("Chain linked volumes (2010), million euro").
pub const CHAIN_LINKED_PREFIX: &str = "Chain";

const REQUIRED_COLUMNS: [&str; 5] = ["GEO", "TIME", "NA_ITEM", "UNIT", "Value"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean the GDP table at `path`.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path)?;
    load_reader(file)
}

/// Load and clean a GDP table from any reader.
///
/// Cleaning runs in a single pass, in this order:
/// 1. strip `.` thousands separators and turn the `,` decimal separator into `.`
/// 2. drop missing (`:` or empty) and zero values
/// 3. parse to `f64` (fatal on failure)
/// 4. drop supranational aggregates
/// 5. drop chain-linked units, keeping current prices
pub fn load_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let (dataset, report) = clean(reader)?;
    log::info!("Loaded GDP table: {report}");
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Load report
// ---------------------------------------------------------------------------

/// Row counts gathered while cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub dropped_missing: usize,
    pub dropped_zero: usize,
    pub dropped_aggregate: usize,
    pub dropped_chain_linked: usize,
    pub kept: usize,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows read, {} kept (missing: {}, zero: {}, aggregates: {}, chain-linked: {})",
            self.rows_read,
            self.kept,
            self.dropped_missing,
            self.dropped_zero,
            self.dropped_aggregate,
            self.dropped_chain_linked,
        )
    }
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "GEO")]
    geo: String,
    #[serde(rename = "TIME")]
    time: String,
    #[serde(rename = "NA_ITEM")]
    na_item: String,
    #[serde(rename = "UNIT")]
    unit: String,
    #[serde(rename = "Value")]
    value: String,
}

/// Outcome of steps 1-3 for a single value cell.
#[derive(Debug, PartialEq)]
enum CellValue {
    Missing,
    Zero,
    Number(f64),
}

fn clean<R: Read>(reader: R) -> Result<(Dataset, LoadReport), LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut report = LoadReport::default();
    let mut observations = Vec::new();

    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let record = result?;
        report.rows_read += 1;

        let value = match parse_cell(&record.value, row_no)? {
            CellValue::Missing => {
                report.dropped_missing += 1;
                continue;
            }
            CellValue::Zero => {
                report.dropped_zero += 1;
                continue;
            }
            CellValue::Number(v) => v,
        };

        let geography = record.geo.trim().to_string();
        if geography.contains(AGGREGATE_MARKER) {
            report.dropped_aggregate += 1;
            continue;
        }

        let unit = record.unit.trim().to_string();
        if unit.starts_with(CHAIN_LINKED_PREFIX) {
            report.dropped_chain_linked += 1;
            continue;
        }

        let time = record
            .time
            .trim()
            .parse::<i32>()
            .map_err(|_| LoadError::InvalidYear {
                row: row_no,
                raw: record.time.clone(),
            })?;

        observations.push(Observation {
            geography,
            time,
            indicator: record.na_item.trim().to_string(),
            unit,
            value,
        });
    }

    report.kept = observations.len();
    if observations.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok((Dataset::from_observations(observations), report))
}

/// Convert Eurostat's locale formatting ("1.234,5") to a plain decimal ("1234.5").
pub fn normalize_value(raw: &str) -> String {
    raw.trim().replace('.', "").replace(',', ".")
}

fn parse_cell(raw: &str, row: usize) -> Result<CellValue, LoadError> {
    let cleaned = normalize_value(raw);
    if cleaned.is_empty() || cleaned == MISSING_SENTINEL {
        return Ok(CellValue::Missing);
    }
    let value = cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::MalformedValue {
            row,
            raw: raw.to_string(),
        })?;
    if value == 0.0 {
        return Ok(CellValue::Zero);
    }
    Ok(CellValue::Number(value))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "TIME,GEO,UNIT,NA_ITEM,Value,Flag and Footnotes\n";

    fn table(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    #[test]
    fn normalizes_locale_formatted_numbers() {
        assert_eq!(normalize_value("1.234,5"), "1234.5");
        assert_eq!(normalize_value(" 12.345.678,9 "), "12345678.9");
        assert_eq!(normalize_value("42"), "42");
        assert_eq!(normalize_value(":"), ":");
    }

    #[test]
    fn cleans_belgium_row_end_to_end() {
        let csv = table(&[r#"2015,Belgium,"Current prices, million euro",GDP,"1.234,5","#]);
        let ds = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            ds.observations(),
            &[Observation {
                geography: "Belgium".into(),
                time: 2015,
                indicator: "GDP".into(),
                unit: "Current prices, million euro".into(),
                value: 1234.5,
            }]
        );
    }

    #[test]
    fn drops_missing_and_zero_values() {
        let csv = table(&[
            r#"2015,Belgium,"Current prices, million euro",GDP,:,"#,
            r#"2015,France,"Current prices, million euro",GDP,"0,0","#,
            r#"2015,Spain,"Current prices, million euro",GDP,0,"#,
            r#"2015,Italy,"Current prices, million euro",GDP,,"#,
            r#"2015,Malta,"Current prices, million euro",GDP,"9.876,1","#,
        ]);
        let (ds, report) = clean(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.observations()[0].geography, "Malta");
        assert_eq!(report.dropped_missing, 2);
        assert_eq!(report.dropped_zero, 2);
        assert_eq!(report.rows_read, 5);
        assert_eq!(report.kept, 1);
    }

    #[test]
    fn drops_aggregates_and_chain_linked_units() {
        let csv = table(&[
            r#"2016,Euro area (19 countries),"Current prices, million euro",GDP,"10.000,0","#,
            r#"2016,European Union (28 countries),"Current prices, million euro",GDP,"14.000,0","#,
            r#"2016,Austria,"Chain linked volumes (2010), million euro",GDP,"310,2","#,
            r#"2016,Austria,"Current prices, million euro",GDP,"353,3","#,
        ]);
        let (ds, report) = clean(csv.as_bytes()).unwrap();
        assert_eq!(report.dropped_aggregate, 2);
        assert_eq!(report.dropped_chain_linked, 1);
        assert!(ds
            .observations()
            .iter()
            .all(|o| !o.geography.contains(AGGREGATE_MARKER)));
        assert!(ds
            .observations()
            .iter()
            .all(|o| !o.unit.starts_with(CHAIN_LINKED_PREFIX)));
        assert_eq!(ds.observations()[0].value, 353.3);
    }

    #[test]
    fn malformed_value_is_fatal() {
        let csv = table(&[
            r#"2015,Belgium,"Current prices, million euro",GDP,"12,5","#,
            r#"2015,France,"Current prices, million euro",GDP,n/a,"#,
        ]);
        match load_reader(csv.as_bytes()) {
            Err(LoadError::MalformedValue { row, raw }) => {
                assert_eq!(row, 1);
                assert_eq!(raw, "n/a");
            }
            other => panic!("expected MalformedValue, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_value_is_fatal() {
        let csv = table(&[r#"2015,Belgium,"Current prices, million euro",GDP,NaN,"#]);
        assert!(matches!(
            load_reader(csv.as_bytes()),
            Err(LoadError::MalformedValue { .. })
        ));
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "TIME,GEO,NA_ITEM,Value\n2015,Belgium,GDP,\"1,0\"\n";
        assert!(matches!(
            load_reader(csv.as_bytes()),
            Err(LoadError::MissingColumn("UNIT"))
        ));
    }

    #[test]
    fn non_integer_year_is_fatal() {
        let csv = table(&[r#"2015Q1,Belgium,"Current prices, million euro",GDP,"1,0","#]);
        assert!(matches!(
            load_reader(csv.as_bytes()),
            Err(LoadError::InvalidYear { row: 0, .. })
        ));
    }

    #[test]
    fn fully_filtered_table_is_fatal() {
        let csv = table(&[r#"2015,Belgium,"Current prices, million euro",GDP,:,"#]);
        assert!(matches!(load_reader(csv.as_bytes()), Err(LoadError::Empty)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let csv = table(&[
            r#"2014,Germany,"Current prices, million euro",GDP,"2.932.470,0","#,
            r#"2015,Germany,"Current prices, million euro",GDP,"3.043.650,0","#,
        ]);
        file.write_all(csv.as_bytes()).unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.observations()[1].value, 3_043_650.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
