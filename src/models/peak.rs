use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PeakError, Result};

/// Gaussian-fit parameters for one detected peak, keyed by sounding identifier.
///
/// All scalar fields are optional: a record loaded from a sparse catalog may
/// carry only a subset, and the empty record is the degraded result of a
/// failed catalog lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakParams {
    pub sounding_id: Option<i64>,
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
    pub amplitude: Option<f64>,
    pub sigma: Option<f64>,
    pub delta: Option<f64>,
    #[serde(rename = "R")]
    pub r: Option<f64>,
    pub windspeed_u: Option<f64>,
    pub windspeed_v: Option<f64>,
    pub tcwv: Option<f64>,
    pub surface_pressure: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PeakParams {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sounding_id.is_none()
            && self.slope.is_none()
            && self.intercept.is_none()
            && self.amplitude.is_none()
            && self.sigma.is_none()
            && self.delta.is_none()
            && self.r.is_none()
            && self.windspeed_u.is_none()
            && self.windspeed_v.is_none()
            && self.tcwv.is_none()
            && self.surface_pressure.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    /// Fetch a named scalar field, failing if the record does not carry it
    pub fn require(&self, field: &'static str) -> Result<f64> {
        let value = match field {
            "slope" => self.slope,
            "intercept" => self.intercept,
            "amplitude" => self.amplitude,
            "sigma" => self.sigma,
            "delta" => self.delta,
            "R" => self.r,
            "windspeed_u" => self.windspeed_u,
            "windspeed_v" => self.windspeed_v,
            "tcwv" => self.tcwv,
            "surface_pressure" => self.surface_pressure,
            "latitude" => self.latitude,
            "longitude" => self.longitude,
            _ => None,
        };

        value.ok_or(PeakError::MissingField { field })
    }
}

/// In-memory peak parameter table, one record per sounding identifier
#[derive(Debug, Clone, Default)]
pub struct PeakCatalog {
    records: Vec<PeakParams>,
}

impl PeakCatalog {
    pub fn new(records: Vec<PeakParams>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PeakParams] {
        &self.records
    }

    /// Look up the parameter record for a sounding identifier.
    ///
    /// A miss is a caller-visible degraded state, not a failure: it is logged
    /// and the empty record is returned. Callers must branch on
    /// [`PeakParams::is_empty`] explicitly. At most one record exists per
    /// identifier; the first match wins.
    pub fn params_for(&self, sounding_id: i64) -> PeakParams {
        match self
            .records
            .iter()
            .find(|p| p.sounding_id == Some(sounding_id))
        {
            Some(params) => params.clone(),
            None => {
                warn!(sounding_id, "sounding not found in peak catalog");
                PeakParams::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params(sounding_id: i64) -> PeakParams {
        PeakParams {
            sounding_id: Some(sounding_id),
            slope: Some(2.5),
            intercept: Some(-4.98),
            amplitude: Some(-50.0),
            sigma: Some(0.4),
            delta: Some(1.2),
            r: Some(0.87),
            windspeed_u: Some(3.0),
            windspeed_v: Some(4.0),
            tcwv: Some(25.0),
            surface_pressure: Some(979.0),
            latitude: Some(44.2),
            longitude: Some(14.5),
        }
    }

    #[test]
    fn test_require_present_field() {
        let params = sample_params(1);
        assert_eq!(params.require("tcwv").unwrap(), 25.0);
        assert_eq!(params.require("R").unwrap(), 0.87);
    }

    #[test]
    fn test_require_missing_field() {
        let params = PeakParams::empty();
        let err = params.require("windspeed_u").unwrap_err();
        assert!(matches!(
            err,
            PeakError::MissingField {
                field: "windspeed_u"
            }
        ));
    }

    #[test]
    fn test_require_unknown_field() {
        let params = sample_params(1);
        assert!(params.require("nonexistent").is_err());
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = PeakCatalog::new(vec![sample_params(10), sample_params(20)]);

        let hit = catalog.params_for(20);
        assert_eq!(hit.sounding_id, Some(20));
        assert!(!hit.is_empty());
    }

    #[test]
    fn test_catalog_miss_returns_empty_record() {
        let catalog = PeakCatalog::new(vec![sample_params(10)]);

        let miss = catalog.params_for(999);
        assert!(miss.is_empty());
    }

    #[test]
    fn test_catalog_first_match_wins() {
        let mut second = sample_params(10);
        second.amplitude = Some(-99.0);
        let catalog = PeakCatalog::new(vec![sample_params(10), second]);

        let hit = catalog.params_for(10);
        assert_eq!(hit.amplitude, Some(-50.0));
    }

    #[test]
    fn test_empty_record_roundtrip() {
        let empty = PeakParams::empty();
        assert!(empty.is_empty());
        assert!(!sample_params(1).is_empty());
    }
}
