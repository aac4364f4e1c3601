//! Terrain reconstruction: turns a sparse voxelized ground surface into a
//! complete filled height field and column-by-column block fill.

mod error;
mod fill;
mod height_matrix;

pub use error::TerrainError;
pub use fill::{TerrainParams, TerrainSynthesizer};
pub use height_matrix::HeightMatrix;
