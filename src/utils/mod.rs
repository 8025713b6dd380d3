pub mod constants;
pub mod filename;
pub mod progress;
pub mod sounding;

pub use constants::*;
pub use filename::generate_default_figure_filename;
pub use progress::ProgressReporter;
pub use sounding::{detail_object_key, sounding_datetime};
