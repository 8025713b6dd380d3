use serde::{Deserialize, Serialize};

/// Result of one emission estimation, computed fresh on every call.
///
/// `track_slope`/`track_intercept` are the raw OLS fit of the satellite
/// track (what track-line rendering consumes); `track_dir_u`/`track_dir_v`
/// are the normalized unit direction along that track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionEstimate {
    pub track_slope: f64,
    pub track_intercept: f64,
    pub track_dir_u: f64,
    pub track_dir_v: f64,
    pub wind_u: f64,
    pub wind_v: f64,
    /// Clockwise angle of the wind from north, degrees
    pub wind_angle_deg: f64,
    pub g_co2_per_s: f64,
    pub kt_co2_per_h: f64,
}

impl EmissionEstimate {
    pub fn summary(&self) -> String {
        format!(
            "Satellite track: longitude = {:.4} x latitude + {:.4}\n\
             Wind: ({:.2}, {:.2}) m/s, {:.1} deg from north\n\
             Estimated emission: {:.1} gCO2/s ({:.4} ktCO2/h)",
            self.track_slope,
            self.track_intercept,
            self.wind_u,
            self.wind_v,
            self.wind_angle_deg,
            self.g_co2_per_s,
            self.kt_co2_per_h
        )
    }
}
