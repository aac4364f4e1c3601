//! Mesh-to-voxel conversion: the triangle/unit-cube intersection predicate,
//! per-triangle rasterization, and the parallel mesh voxelizer.

pub mod block;
pub mod intersect;
pub mod mesh;
pub mod raster;
pub mod voxelize;

pub use block::{BlockId, BlockRegistry, RegistryError};
pub use intersect::triangle_intersects_unit_cube;
pub use mesh::TriangleMesh;
pub use raster::rasterize_triangle;
pub use voxelize::MeshVoxelizer;
