//! Voxel-grid coordinates, region bounds, triangle geometry, and the map
//! projection used to anchor geographic data in the voxel world.

mod projection;
mod region;
mod triangle;
mod voxel;

pub use projection::MapProjection;
pub use region::{RegionBounds, RegionFrame};
pub use triangle::Triangle;
pub use voxel::VoxelCoord;
