pub mod emission;
pub mod peak;
pub mod sounding;

pub use emission::EmissionEstimate;
pub use peak::{PeakCatalog, PeakParams};
pub use sounding::SoundingRecord;
