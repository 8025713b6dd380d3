use thiserror::Error;

pub type Result<T> = std::result::Result<T, PeakError>;

#[derive(Error, Debug)]
pub enum PeakError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing peak parameter: {field}")]
    MissingField { field: &'static str },

    #[error("Missing column in dataset: {column}")]
    MissingColumn { column: String },

    #[error("Track direction vector has zero norm")]
    DegenerateTrack,

    #[error("Emission estimate requires at least one sounding")]
    EmptyPointCloud,

    #[error("Invalid sounding identifier: {0}")]
    InvalidSoundingId(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Object store request failed with status {status}: {key}")]
    StoreStatus { status: u16, key: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
