use chrono::NaiveDateTime;

use crate::error::{PeakError, Result};
use crate::utils::constants::{PEAK_DETAIL_FILE_PREFIX, PEAK_DETAIL_PREFIX};

/// Object key of the per-sounding peak detail dataset
/// (e.g. 2018082510210384 -> /datasets/oco-2/peaks-detected-details/peak_data-si_2018082510210384.json)
pub fn detail_object_key(sounding_id: &str) -> String {
    format!(
        "{}{}{}.json",
        PEAK_DETAIL_PREFIX, PEAK_DETAIL_FILE_PREFIX, sounding_id
    )
}

/// Extract the acquisition timestamp embedded in an OCO-2 sounding identifier.
///
/// Identifiers are 16-digit integers whose first 14 digits encode
/// YYYYMMDDHHMMSS; the trailing digits are the footprint index.
pub fn sounding_datetime(sounding_id: i64) -> Result<NaiveDateTime> {
    let digits = sounding_id.to_string();

    if digits.len() < 14 {
        return Err(PeakError::InvalidSoundingId(format!(
            "'{}' is too short to embed a timestamp",
            sounding_id
        )));
    }

    NaiveDateTime::parse_from_str(&digits[..14], "%Y%m%d%H%M%S")
        .map_err(|_| PeakError::InvalidSoundingId(format!("'{}'", sounding_id)))
}
