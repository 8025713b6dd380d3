use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SoundingRecord {
    pub sounding_id: Option<i64>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub xco2: f64,

    pub tcwv: f64,

    pub surface_pressure: f64,
}

impl SoundingRecord {
    pub fn new(
        sounding_id: Option<i64>,
        latitude: f64,
        longitude: f64,
        xco2: f64,
        tcwv: f64,
        surface_pressure: f64,
    ) -> Self {
        Self {
            sounding_id,
            latitude,
            longitude,
            xco2,
            tcwv,
            surface_pressure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sounding_validation() {
        let sounding = SoundingRecord::new(
            Some(2018082510210384),
            44.217,
            14.521,
            407.3,
            25.0,
            979.0,
        );

        assert!(sounding.validate().is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        let sounding = SoundingRecord::new(
            None,
            91.0, // Invalid latitude
            14.521,
            407.3,
            25.0,
            979.0,
        );

        assert!(sounding.validate().is_err());
    }
}
