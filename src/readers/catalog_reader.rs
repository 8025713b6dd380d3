use crate::error::{PeakError, Result};
use crate::models::{PeakCatalog, PeakParams};
use crate::readers::table::RawTable;

pub struct CatalogReader;

impl CatalogReader {
    pub fn new() -> Self {
        Self
    }

    /// Load a peaks-detected catalog into a parameter table.
    ///
    /// Every parameter column is optional; rows without a sounding
    /// identifier cannot be looked up and are skipped.
    pub fn read_catalog(&self, source: &str, bytes: &[u8]) -> Result<PeakCatalog> {
        let table = RawTable::parse(source, bytes)?;
        self.from_table(&table)
    }

    pub fn from_table(&self, table: &RawTable) -> Result<PeakCatalog> {
        let id = table
            .column_index(&["sounding_id"])
            .ok_or_else(|| PeakError::MissingColumn {
                column: "sounding_id".to_string(),
            })?;

        let slope = table.column_index(&["slope"]);
        let intercept = table.column_index(&["intercept"]);
        let amplitude = table.column_index(&["amplitude"]);
        let sigma = table.column_index(&["sigma"]);
        let delta = table.column_index(&["delta"]);
        let r = table.column_index(&["r"]);
        let windspeed_u = table.column_index(&["windspeed_u"]);
        let windspeed_v = table.column_index(&["windspeed_v"]);
        let tcwv = table.column_index(&["tcwv"]);
        let surface_pressure = table.column_index(&["surface_pressure"]);
        let latitude = table.column_index(&["latitude", "lat"]);
        let longitude = table.column_index(&["longitude", "lon", "lng"]);

        let field = |column: Option<usize>, row: usize| column.and_then(|c| table.f64_at(row, c));

        let mut records = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            let Some(sounding_id) = table.i64_at(row, id) else {
                continue;
            };

            records.push(PeakParams {
                sounding_id: Some(sounding_id),
                slope: field(slope, row),
                intercept: field(intercept, row),
                amplitude: field(amplitude, row),
                sigma: field(sigma, row),
                delta: field(delta, row),
                r: field(r, row),
                windspeed_u: field(windspeed_u, row),
                windspeed_v: field(windspeed_v, row),
                tcwv: field(tcwv, row),
                surface_pressure: field(surface_pressure, row),
                latitude: field(latitude, row),
                longitude: field(longitude, row),
            });
        }

        Ok(PeakCatalog::new(records))
    }
}

impl Default for CatalogReader {
    fn default() -> Self {
        Self::new()
    }
}
