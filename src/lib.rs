pub mod config;
pub mod data;
pub mod errors;
pub mod etl;
pub mod shape;

pub use config::UserConfig;
pub use shape::{shape_element, ShapeOptions, Shaper};
