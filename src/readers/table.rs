use serde_json::Value;

use crate::error::{PeakError, Result};

/// Tabular source format, resolved exactly once per source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    Csv { delimiter: u8 },
    Json,
}

impl TabularFormat {
    /// Resolve the format from the source extension, sniffing the CSV
    /// delimiter from the header line in the same pass. No speculative
    /// re-parse happens later.
    pub fn detect(source: &str, bytes: &[u8]) -> Result<Self> {
        let extension = source
            .rsplit('.')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "csv" => Ok(TabularFormat::Csv {
                delimiter: sniff_delimiter(bytes),
            }),
            "json" => Ok(TabularFormat::Json),
            other => Err(PeakError::InvalidFormat(format!(
                "unsupported dataset extension: '{}'",
                other
            ))),
        }
    }
}

/// Pick the CSV delimiter from the header line: ';' or ',', whichever
/// occurs more often outside quoted fields. Ties fall to ';', the
/// delimiter the project's exported datasets use.
fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let header = bytes.split(|&b| b == b'\n').next().unwrap_or(&[]);

    let mut semicolons = 0usize;
    let mut commas = 0usize;
    let mut in_quotes = false;
    for &b in header {
        match b {
            b'"' => in_quotes = !in_quotes,
            b';' if !in_quotes => semicolons += 1,
            b',' if !in_quotes => commas += 1,
            _ => {}
        }
    }

    if semicolons >= commas {
        b';'
    } else {
        b','
    }
}

fn normalize_header(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Column-addressable view of a parsed CSV or JSON dataset.
///
/// Headers are normalized (trimmed, lowercased); cells keep their source
/// representation and coerce to numbers on access.
#[derive(Debug, Clone)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RawTable {
    pub fn parse(source: &str, bytes: &[u8]) -> Result<Self> {
        let format = TabularFormat::detect(source, bytes)?;
        Self::parse_with(format, bytes)
    }

    pub fn parse_with(format: TabularFormat, bytes: &[u8]) -> Result<Self> {
        match format {
            TabularFormat::Csv { delimiter } => Self::from_csv(bytes, delimiter),
            TabularFormat::Json => Self::from_json(bytes),
        }
    }

    fn from_csv(bytes: &[u8], delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(bytes);

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(normalize_header)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|cell| Value::String(cell.to_string()))
                    .collect(),
            );
        }

        Ok(Self { columns, rows })
    }

    /// Accepts both JSON orientations the exported datasets use: an array
    /// of record objects, or an object of column -> {row: value}.
    fn from_json(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;

        match value {
            Value::Array(records) => Self::from_json_records(records),
            Value::Object(columns) => Self::from_json_columns(columns),
            _ => Err(PeakError::InvalidFormat(
                "JSON dataset must be an array of records or an object of columns".to_string(),
            )),
        }
    }

    fn from_json_records(records: Vec<Value>) -> Result<Self> {
        let maps: Vec<&serde_json::Map<String, Value>> = records
            .iter()
            .map(|record| {
                record.as_object().ok_or_else(|| {
                    PeakError::InvalidFormat("JSON record rows must be objects".to_string())
                })
            })
            .collect::<Result<_>>()?;

        let mut columns: Vec<String> = Vec::new();
        for map in &maps {
            for key in map.keys() {
                let name = normalize_header(key);
                if !columns.contains(&name) {
                    columns.push(name);
                }
            }
        }

        let rows = maps
            .iter()
            .map(|map| {
                columns
                    .iter()
                    .map(|column| {
                        map.iter()
                            .find(|(key, _)| normalize_header(key) == *column)
                            .map(|(_, value)| value.clone())
                            .unwrap_or(Value::Null)
                    })
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    fn from_json_columns(column_map: serde_json::Map<String, Value>) -> Result<Self> {
        let mut columns = Vec::with_capacity(column_map.len());
        let mut series = Vec::with_capacity(column_map.len());
        for (name, cells) in &column_map {
            let cells = cells.as_object().ok_or_else(|| {
                PeakError::InvalidFormat(format!(
                    "column '{}' of a column-oriented JSON dataset must be an object",
                    name
                ))
            })?;
            columns.push(normalize_header(name));
            series.push(cells);
        }

        // Row labels come from the union of every column's keys, in
        // numeric order where the labels are numeric.
        let mut row_keys: Vec<String> = Vec::new();
        for cells in &series {
            for key in cells.keys() {
                if !row_keys.contains(key) {
                    row_keys.push(key.clone());
                }
            }
        }
        row_keys.sort_by(|a, b| match (a.parse::<i64>(), b.parse::<i64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.cmp(b),
        });

        let rows = row_keys
            .iter()
            .map(|key| {
                series
                    .iter()
                    .map(|cells| cells.get(key).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column matching any of the given aliases
    pub fn column_index(&self, aliases: &[&str]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| self.columns.iter().position(|column| column == alias))
    }

    pub fn f64_at(&self, row: usize, column: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(column)).and_then(value_to_f64)
    }

    pub fn i64_at(&self, row: usize, column: usize) -> Option<i64> {
        self.rows.get(row).and_then(|r| r.get(column)).and_then(value_to_i64)
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

/// 64-bit integer coercion; float identifiers truncate
fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
            }
        }
        _ => None,
    }
}
