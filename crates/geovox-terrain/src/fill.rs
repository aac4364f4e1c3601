//! Column fill: expands a resolved height field into a complete 3D block
//! list for one region.

use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use geovox_math::VoxelCoord;
use geovox_voxel::BlockId;

use crate::error::TerrainError;
use crate::height_matrix::HeightMatrix;

/// Block-type and geometry configuration for terrain synthesis.
#[derive(Clone, Debug)]
pub struct TerrainParams {
    /// World height of the bedrock layer, and the bottom of every column.
    pub min_y: i32,
    /// World x of the region's first column.
    pub region_min_x: i32,
    /// World z of the region's first column.
    pub region_min_z: i32,
    /// Block placed at the resolved surface height of each column.
    pub cover_block: BlockId,
    /// Block placed at `min_y` in every column.
    pub bottom_block: BlockId,
    /// Multiset of blocks drawn from at random for the interior of each
    /// column. Repeating an entry raises its share.
    pub filler_blocks: Vec<BlockId>,
    /// Accumulated inverse-distance weight at which gap interpolation stops
    /// expanding its ring scan.
    pub interpolation_weight: f64,
    /// Seed for the filler-block random source; a fixed seed makes the
    /// fill reproducible.
    pub seed: u64,
}

/// Builds a region's terrain from voxelized ground-surface data.
///
/// Feed it the voxel set of the dedicated ground surface and, optionally,
/// marker voxels from other surfaces, then synthesize the full column fill.
/// One synthesizer owns one region's height field; nothing is shared across
/// regions.
pub struct TerrainSynthesizer {
    matrix: HeightMatrix,
    params: TerrainParams,
}

impl TerrainSynthesizer {
    /// Create a synthesizer for a region of `size_x × size_z` columns.
    pub fn new(size_x: usize, size_z: usize, params: TerrainParams) -> Self {
        Self {
            matrix: HeightMatrix::new(size_x, size_z),
            params,
        }
    }

    /// Record primary ground-surface voxels (topmost surface wins).
    pub fn add_ground_surface(&mut self, voxels: impl IntoIterator<Item = VoxelCoord>) {
        for voxel in voxels {
            self.matrix.record_surface(voxel);
        }
    }

    /// Apply marker voxels that may lower non-primary columns.
    pub fn add_markers(&mut self, voxels: impl IntoIterator<Item = VoxelCoord>) {
        for voxel in voxels {
            self.matrix.lower_to_marker(voxel);
        }
    }

    /// Read access to the height field (for inspection and tests).
    pub fn matrix(&self) -> &HeightMatrix {
        &self.matrix
    }

    /// Resolve all remaining gaps and emit the complete column fill.
    ///
    /// Every column gets one bottom block at `min_y`, one cover block at
    /// its resolved height `H`, and a random filler block at every height
    /// strictly between — `H - min_y + 1` blocks per column, each
    /// coordinate written exactly once. Resolved heights are clamped to at
    /// least `min_y + 1` so cover and bottom never share a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::EmptyMatrix`] when no column holds any
    /// sample, primary or marker, and [`TerrainError::NoFillerBlocks`] when
    /// the filler multiset is empty and interiors could not be drawn.
    pub fn synthesize(mut self) -> Result<Vec<(VoxelCoord, BlockId)>, TerrainError> {
        if self.params.filler_blocks.is_empty() {
            return Err(TerrainError::NoFillerBlocks);
        }

        let interpolated = self
            .matrix
            .fill_missing(self.params.interpolation_weight)?;
        debug!(interpolated, "resolved height field gaps");

        let p = &self.params;
        let mut rng = ChaCha8Rng::seed_from_u64(p.seed);
        let mut blocks = Vec::new();

        for z in 0..self.matrix.size_z() {
            for x in 0..self.matrix.size_x() {
                let world_x = x as i32 + p.region_min_x;
                let world_z = z as i32 + p.region_min_z;

                blocks.push((
                    VoxelCoord::new(world_x, p.min_y, world_z),
                    p.bottom_block,
                ));

                // fill_missing resolved every column above.
                let height = self.matrix.get(x, z).unwrap_or(p.min_y);
                let height = height.max(p.min_y + 1);

                blocks.push((VoxelCoord::new(world_x, height, world_z), p.cover_block));

                for y in (p.min_y + 1)..height {
                    // filler_blocks checked non-empty above, choose cannot fail
                    if let Some(&filler) = p.filler_blocks.choose(&mut rng) {
                        blocks.push((VoxelCoord::new(world_x, y, world_z), filler));
                    }
                }
            }
        }

        info!(blocks = blocks.len(), "terrain synthesis complete");
        Ok(blocks)
    }
}
