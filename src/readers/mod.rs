pub mod catalog_reader;
pub mod sounding_reader;
pub mod table;

pub use catalog_reader::CatalogReader;
pub use sounding_reader::SoundingReader;
pub use table::{RawTable, TabularFormat};
