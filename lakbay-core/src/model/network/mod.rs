//! Bus network data model

pub mod data;
mod to_geojson;
pub mod types;

pub use data::NetworkSnapshot;
pub use types::{Coordinate, Route, Stop};
