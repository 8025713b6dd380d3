use serde_json::{json, Value};
use std::path::Path;

use crate::error::{PeakError, Result};
use crate::models::{EmissionEstimate, PeakParams, SoundingRecord};
use crate::utils::constants::TRACK_LINE_SAMPLES;

/// Builds plotly-compatible figure documents for one estimated peak: the
/// sounding cloud colored by xco2, the fitted satellite track, and an
/// annotated wind-vector arrow anchored at the peak center.
pub struct FigureWriter {
    track_samples: usize,
}

impl FigureWriter {
    pub fn new() -> Self {
        Self {
            track_samples: TRACK_LINE_SAMPLES,
        }
    }

    pub fn with_track_samples(track_samples: usize) -> Self {
        Self { track_samples }
    }

    pub fn build_figure(
        &self,
        points: &[SoundingRecord],
        peak_params: &PeakParams,
        estimate: &EmissionEstimate,
    ) -> Result<Value> {
        if points.is_empty() {
            return Err(PeakError::EmptyPointCloud);
        }

        let latitudes: Vec<f64> = points.iter().map(|p| p.latitude).collect();
        let longitudes: Vec<f64> = points.iter().map(|p| p.longitude).collect();
        let xco2: Vec<f64> = points.iter().map(|p| p.xco2).collect();

        let min_lat = latitudes.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_lat = latitudes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        // Sample the raw fitted line over a half-open latitude range
        let step = (max_lat - min_lat) / self.track_samples as f64;
        let track_lat: Vec<f64> = (0..self.track_samples)
            .map(|i| min_lat + i as f64 * step)
            .collect();
        let track_lon: Vec<f64> = track_lat
            .iter()
            .map(|lat| lat * estimate.track_slope + estimate.track_intercept)
            .collect();

        // The wind arrow is anchored at the fitted peak center
        let center_lat = peak_params.require("latitude")?;
        let center_lon = peak_params.require("longitude")?;
        let tip_lat = center_lat + estimate.wind_u * 0.3;
        let tip_lon = center_lon + estimate.wind_v * 0.3;

        Ok(json!({
            "data": [
                {
                    "x": latitudes,
                    "y": longitudes,
                    "mode": "markers",
                    "name": "xco2",
                    "marker": { "color": xco2 }
                },
                {
                    "x": track_lat,
                    "y": track_lon,
                    "mode": "markers",
                    "name": "Satellite track"
                }
            ],
            "layout": {
                "showlegend": false,
                "shapes": [
                    {
                        "type": "line",
                        "x0": center_lat,
                        "y0": center_lon,
                        "x1": tip_lat,
                        "y1": tip_lon,
                        "name": "Wind",
                        "line": { "color": "MediumPurple", "width": 4, "dash": "dot" }
                    }
                ],
                "annotations": [
                    {
                        "x": center_lat,
                        "y": center_lon,
                        "xref": "x",
                        "yref": "y",
                        "text": "Wind",
                        "showarrow": true,
                        "arrowhead": 1,
                        "ax": tip_lat,
                        "ay": tip_lon
                    }
                ]
            }
        }))
    }

    pub fn write_figure(&self, figure: &Value, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(figure)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for FigureWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::EmissionEstimator;

    fn sample_points() -> Vec<SoundingRecord> {
        vec![
            SoundingRecord::new(None, 10.0, 20.0, 405.0, 25.0, 979.0),
            SoundingRecord::new(None, 10.1, 20.3, 406.0, 25.0, 979.0),
            SoundingRecord::new(None, 10.2, 20.5, 405.5, 25.0, 979.0),
        ]
    }

    fn sample_params() -> PeakParams {
        PeakParams {
            sounding_id: Some(2018082510210384),
            amplitude: Some(-50.0),
            windspeed_u: Some(3.0),
            windspeed_v: Some(4.0),
            tcwv: Some(25.0),
            surface_pressure: Some(979.0),
            latitude: Some(10.1),
            longitude: Some(20.3),
            ..PeakParams::default()
        }
    }

    #[test]
    fn test_build_figure_structure() {
        let points = sample_points();
        let params = sample_params();
        let estimate = EmissionEstimator::new().estimate(&points, &params).unwrap();

        let writer = FigureWriter::new();
        let figure = writer.build_figure(&points, &params, &estimate).unwrap();

        let traces = figure["data"].as_array().unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0]["name"], "xco2");
        assert_eq!(traces[1]["name"], "Satellite track");
        assert_eq!(
            traces[1]["x"].as_array().unwrap().len(),
            TRACK_LINE_SAMPLES
        );

        let shapes = figure["layout"]["shapes"].as_array().unwrap();
        assert_eq!(shapes[0]["type"], "line");
        assert_eq!(figure["layout"]["showlegend"], false);
    }

    #[test]
    fn test_track_trace_follows_raw_fit() {
        let points = sample_points();
        let params = sample_params();
        let estimate = EmissionEstimator::new().estimate(&points, &params).unwrap();

        let writer = FigureWriter::with_track_samples(4);
        let figure = writer.build_figure(&points, &params, &estimate).unwrap();

        let xs = figure["data"][1]["x"].as_array().unwrap();
        let ys = figure["data"][1]["y"].as_array().unwrap();
        assert_eq!(xs.len(), 4);

        // Half-open range: the last sample stays below the maximum latitude
        let last_lat = xs[3].as_f64().unwrap();
        assert!(last_lat < 10.2);

        for (x, y) in xs.iter().zip(ys.iter()) {
            let lat = x.as_f64().unwrap();
            let lon = y.as_f64().unwrap();
            let expected = lat * estimate.track_slope + estimate.track_intercept;
            assert!((lon - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_missing_center_is_fatal() {
        let points = sample_points();
        let mut params = sample_params();
        params.latitude = None;
        let estimate = EmissionEstimator::new().estimate(&points, &params).unwrap();

        let writer = FigureWriter::new();
        let err = writer
            .build_figure(&points, &params, &estimate)
            .unwrap_err();
        assert!(matches!(
            err,
            PeakError::MissingField { field: "latitude" }
        ));
    }

    #[test]
    fn test_write_figure_creates_parent_dir() {
        let points = sample_points();
        let params = sample_params();
        let estimate = EmissionEstimator::new().estimate(&points, &params).unwrap();

        let writer = FigureWriter::new();
        let figure = writer.build_figure(&points, &params, &estimate).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("figure.json");
        writer.write_figure(&figure, &path).unwrap();

        assert!(path.exists());
        let written: Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(written["data"][0]["name"], "xco2");
    }
}
