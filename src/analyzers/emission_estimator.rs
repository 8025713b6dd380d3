use nalgebra::Vector2;

use crate::error::{PeakError, Result};
use crate::models::{EmissionEstimate, PeakParams, SoundingRecord};
use crate::utils::constants::{MOLAR_MASS_CO2, MOLAR_MASS_DRY_AIR, STANDARD_GRAVITY};

/// Ordinary-least-squares fit of longitude = slope * latitude + intercept
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Fit the satellite-track line through a cluster of soundings.
///
/// Closed-form normal equations, no regularization. With zero latitude
/// variance the system is collinear; the minimum-norm solution (slope 0
/// through the longitude mean) is returned.
pub fn fit_track(points: &[SoundingRecord]) -> Result<TrackFit> {
    if points.is_empty() {
        return Err(PeakError::EmptyPointCloud);
    }

    let n = points.len() as f64;
    let mean_lat = points.iter().map(|p| p.latitude).sum::<f64>() / n;
    let mean_lon = points.iter().map(|p| p.longitude).sum::<f64>() / n;

    let mut s_xx = 0.0;
    let mut s_xy = 0.0;
    for p in points {
        let dx = p.latitude - mean_lat;
        s_xx += dx * dx;
        s_xy += dx * (p.longitude - mean_lon);
    }

    let slope = if s_xx == 0.0 { 0.0 } else { s_xy / s_xx };
    let intercept = mean_lon - slope * mean_lat;

    Ok(TrackFit { slope, intercept })
}

pub struct EmissionEstimator;

impl EmissionEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Estimate the CO2 emission rate of a peak from its sounding cluster
    /// and fitted peak parameters.
    ///
    /// Only latitude and longitude feed the regression; `xco2` is carried
    /// for display. The parameter record must supply `tcwv`,
    /// `surface_pressure`, `windspeed_u`, `windspeed_v` and `amplitude`;
    /// a missing field is fatal to the call and no partial result is
    /// returned.
    pub fn estimate(
        &self,
        points: &[SoundingRecord],
        peak_params: &PeakParams,
    ) -> Result<EmissionEstimate> {
        let fit = fit_track(points)?;

        let tcwv = peak_params.require("tcwv")?;
        let psurf = peak_params.require("surface_pressure")?;
        let u10 = peak_params.require("windspeed_u")?;
        let v10 = peak_params.require("windspeed_v")?;
        let amplitude = peak_params.require("amplitude")?;

        let vec_track = Vector2::new(fit.slope, 1.0);
        let norm = vec_track.norm();
        if norm == 0.0 {
            // Unreachable with the (slope, 1.0) construction, checked anyway
            return Err(PeakError::DegenerateTrack);
        }
        let unit_track = vec_track / norm;

        // Unit vector orthogonal to the satellite track
        let vec_orth = Vector2::new(unit_track.y, -unit_track.x);
        let vec_wind = Vector2::new(u10, v10);

        // Clockwise angle from north of the wind direction; reported but
        // not part of the emission arithmetic
        let wind_angle_deg = u10.atan2(v10).to_degrees();

        // Project the wind vector across the track
        let wind_proj = vec_orth.dot(&vec_wind).abs();

        // ppm km -> kg CO2 per metre of track
        let density = (amplitude * 1e-3).abs() * MOLAR_MASS_CO2 / MOLAR_MASS_DRY_AIR
            * (psurf / STANDARD_GRAVITY - tcwv);

        let g_co2_per_s = density * 1000.0 * wind_proj;
        let kt_co2_per_h = g_co2_per_s / 1e9 * 3600.0;

        Ok(EmissionEstimate {
            track_slope: fit.slope,
            track_intercept: fit.intercept,
            track_dir_u: unit_track.x,
            track_dir_v: unit_track.y,
            wind_u: u10,
            wind_v: v10,
            wind_angle_deg,
            g_co2_per_s,
            kt_co2_per_h,
        })
    }
}

impl Default for EmissionEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sounding(latitude: f64, longitude: f64) -> SoundingRecord {
        SoundingRecord::new(None, latitude, longitude, 405.0, 25.0, 979.0)
    }

    fn reference_params() -> PeakParams {
        PeakParams {
            sounding_id: Some(2018082510210384),
            amplitude: Some(-50.0),
            windspeed_u: Some(3.0),
            windspeed_v: Some(4.0),
            tcwv: Some(25.0),
            surface_pressure: Some(979.0),
            ..PeakParams::default()
        }
    }

    fn reference_points() -> Vec<SoundingRecord> {
        vec![
            sounding(10.0, 20.0),
            sounding(10.1, 20.3),
            sounding(10.2, 20.5),
        ]
    }

    #[test]
    fn test_fit_track_normal_equations() {
        let fit = fit_track(&reference_points()).unwrap();

        assert!((fit.slope - 2.5).abs() < 1e-9);
        assert!((fit.intercept - (-4.983333333333333)).abs() < 1e-9);
    }

    #[test]
    fn test_fit_track_empty_cloud() {
        assert!(matches!(
            fit_track(&[]).unwrap_err(),
            PeakError::EmptyPointCloud
        ));
    }

    #[test]
    fn test_fit_track_constant_latitude() {
        let points = vec![sounding(10.0, 20.0), sounding(10.0, 21.0)];
        let fit = fit_track(&points).unwrap();

        assert_eq!(fit.slope, 0.0);
        assert!((fit.intercept - 20.5).abs() < 1e-12);
    }

    #[test]
    fn test_reference_estimate() {
        let estimator = EmissionEstimator::new();
        let estimate = estimator
            .estimate(&reference_points(), &reference_params())
            .unwrap();

        assert!((estimate.track_slope - 2.5).abs() < 1e-9);
        assert!((estimate.wind_angle_deg - 36.86989764584402).abs() < 1e-9);
        assert!((estimate.g_co2_per_s - 14781.852289436574).abs() < 1e-6);
        assert!((estimate.kt_co2_per_h - 0.053214668241971665).abs() < 1e-12);
    }

    #[test]
    fn test_track_direction_is_unit_length() {
        let estimator = EmissionEstimator::new();
        let estimate = estimator
            .estimate(&reference_points(), &reference_params())
            .unwrap();

        let norm = (estimate.track_dir_u * estimate.track_dir_u
            + estimate.track_dir_v * estimate.track_dir_v)
            .sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_identity() {
        let estimator = EmissionEstimator::new();
        let estimate = estimator
            .estimate(&reference_points(), &reference_params())
            .unwrap();

        assert_eq!(
            estimate.kt_co2_per_h,
            estimate.g_co2_per_s / 1e9 * 3600.0
        );
    }

    #[test]
    fn test_zero_amplitude_yields_zero_rates() {
        let mut params = reference_params();
        params.amplitude = Some(0.0);

        let estimator = EmissionEstimator::new();
        let estimate = estimator.estimate(&reference_points(), &params).unwrap();

        assert_eq!(estimate.g_co2_per_s, 0.0);
        assert_eq!(estimate.kt_co2_per_h, 0.0);
    }

    #[test]
    fn test_zero_wind_yields_zero_rates() {
        let mut params = reference_params();
        params.windspeed_u = Some(0.0);
        params.windspeed_v = Some(0.0);

        let estimator = EmissionEstimator::new();
        let estimate = estimator.estimate(&reference_points(), &params).unwrap();

        assert_eq!(estimate.g_co2_per_s, 0.0);
        assert_eq!(estimate.kt_co2_per_h, 0.0);
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let mut params = reference_params();
        params.amplitude = None;

        let estimator = EmissionEstimator::new();
        let err = estimator
            .estimate(&reference_points(), &params)
            .unwrap_err();

        assert!(matches!(
            err,
            PeakError::MissingField { field: "amplitude" }
        ));
    }
}
