pub mod document;
pub mod osm;

/// Elements as they come out of the .osm file, before any shaping.
pub use self::osm::{Element, ElementKind};

/// Flat documents ready to be written out one per line.
pub use self::document::{Record, RecordBuilder, RecordType};
