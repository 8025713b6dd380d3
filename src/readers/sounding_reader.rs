use tracing::debug;
use validator::Validate;

use crate::error::{PeakError, Result};
use crate::models::SoundingRecord;
use crate::readers::table::RawTable;
use crate::utils::constants::{DEFAULT_SURFACE_PRESSURE, DEFAULT_TCWV};

pub struct SoundingReader;

impl SoundingReader {
    pub fn new() -> Self {
        Self
    }

    /// Load the soundings of a peak detail dataset.
    ///
    /// `source` names the file or URL the bytes came from; it drives format
    /// detection. Requires latitude/longitude/xco2 columns (alias-aware);
    /// `tcwv` and `surface_pressure` default to 25 and 979 when the source
    /// does not carry them.
    pub fn read_soundings(&self, source: &str, bytes: &[u8]) -> Result<Vec<SoundingRecord>> {
        let table = RawTable::parse(source, bytes)?;
        self.from_table(&table)
    }

    pub fn from_table(&self, table: &RawTable) -> Result<Vec<SoundingRecord>> {
        let lat = self.required_column(table, &["latitude", "lat"])?;
        let lon = self.required_column(table, &["longitude", "lon", "lng"])?;
        let xco2 = self.required_column(table, &["xco2", "co2"])?;

        let id = table.column_index(&["sounding_id"]);
        let tcwv = table.column_index(&["tcwv"]);
        let psurf = table.column_index(&["surface_pressure"]);

        let mut records = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            // Rows with unparseable coordinates are skipped
            let (Some(latitude), Some(longitude)) =
                (table.f64_at(row, lat), table.f64_at(row, lon))
            else {
                continue;
            };

            let record = SoundingRecord::new(
                id.and_then(|column| table.i64_at(row, column)),
                latitude,
                longitude,
                table.f64_at(row, xco2).unwrap_or(f64::NAN),
                tcwv.and_then(|column| table.f64_at(row, column))
                    .unwrap_or(DEFAULT_TCWV),
                psurf
                    .and_then(|column| table.f64_at(row, column))
                    .unwrap_or(DEFAULT_SURFACE_PRESSURE),
            );

            // Out-of-range coordinates are skipped like unparseable ones
            if record.validate().is_err() {
                debug!(row, latitude, longitude, "skipping out-of-range sounding");
                continue;
            }

            records.push(record);
        }

        Ok(records)
    }

    fn required_column(&self, table: &RawTable, aliases: &[&str]) -> Result<usize> {
        table
            .column_index(aliases)
            .ok_or_else(|| PeakError::MissingColumn {
                column: aliases[0].to_string(),
            })
    }
}

impl Default for SoundingReader {
    fn default() -> Self {
        Self::new()
    }
}
