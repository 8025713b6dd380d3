/// Standard gravity, m s-2
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Molar masses, kg/mol
pub const MOLAR_MASS_CO2: f64 = 0.04401;
pub const MOLAR_MASS_DRY_AIR: f64 = 0.02896;

/// Column defaults applied when absent from source data
pub const DEFAULT_TCWV: f64 = 25.0;
pub const DEFAULT_SURFACE_PRESSURE: f64 = 979.0;

/// Object store layout
pub const DEFAULT_CONTAINER: &str = "oco2";
pub const TRASH_PREFIX: &str = "/Trash/";
pub const PEAK_DETAIL_PREFIX: &str = "/datasets/oco-2/peaks-detected-details/";
pub const PEAK_DETAIL_FILE_PREFIX: &str = "peak_data-si_";

/// Number of latitude samples used to render the fitted track line
pub const TRACK_LINE_SAMPLES: usize = 200;
