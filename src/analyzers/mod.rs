pub mod emission_estimator;

pub use emission_estimator::{fit_track, EmissionEstimator, TrackFit};
