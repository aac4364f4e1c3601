//! 2D height field over a region's columns.
//!
//! Each column is either unknown or holds one integer surface height. A
//! column becomes known exactly once: from a primary ground-surface sample,
//! from a marker lowering, or from interpolation. Columns known from a
//! primary sample are protected from marker lowering.

use rustc_hash::FxHashSet;
use tracing::trace;

use geovox_math::VoxelCoord;

use crate::error::TerrainError;

/// Height field indexed by region-local `(x, z)` in
/// `[0, size_x) × [0, size_z)`. Dimensions are fixed at construction.
#[derive(Clone, Debug)]
pub struct HeightMatrix {
    size_x: usize,
    size_z: usize,
    heights: Vec<Option<i32>>,
    /// Parallel flags marking columns whose height came from a primary
    /// ground-surface sample.
    primary: Vec<bool>,
}

impl HeightMatrix {
    /// Create a matrix of `size_x × size_z` unknown columns.
    pub fn new(size_x: usize, size_z: usize) -> Self {
        Self {
            size_x,
            size_z,
            heights: vec![None; size_x * size_z],
            primary: vec![false; size_x * size_z],
        }
    }

    pub fn size_x(&self) -> usize {
        self.size_x
    }

    pub fn size_z(&self) -> usize {
        self.size_z
    }

    fn index(&self, x: usize, z: usize) -> usize {
        debug_assert!(x < self.size_x && z < self.size_z);
        z * self.size_x + x
    }

    /// Map a world-frame voxel to its region-local column.
    fn column_of(&self, voxel: VoxelCoord) -> (usize, usize) {
        (
            voxel.x.rem_euclid(self.size_x as i32) as usize,
            voxel.z.rem_euclid(self.size_z as i32) as usize,
        )
    }

    /// The recorded height of a column, if known.
    pub fn get(&self, x: usize, z: usize) -> Option<i32> {
        self.heights[self.index(x, z)]
    }

    /// Returns `true` if the column's height came from a primary sample.
    pub fn is_primary(&self, x: usize, z: usize) -> bool {
        self.primary[self.index(x, z)]
    }

    /// Record one primary ground-surface voxel. The topmost surface wins:
    /// the column takes `voxel.y` when unknown or when `voxel.y` is higher,
    /// and is marked primary.
    pub fn record_surface(&mut self, voxel: VoxelCoord) {
        let (x, z) = self.column_of(voxel);
        let i = self.index(x, z);
        match self.heights[i] {
            Some(h) if voxel.y <= h => {}
            _ => {
                self.heights[i] = Some(voxel.y);
                self.primary[i] = true;
            }
        }
    }

    /// Apply one marker voxel: lower the column to `voxel.y` when the
    /// column is not primary and is unknown or currently higher. Embedded
    /// features (foundations, cuttings) pull the surface down locally;
    /// primary columns are immune.
    pub fn lower_to_marker(&mut self, voxel: VoxelCoord) {
        let (x, z) = self.column_of(voxel);
        let i = self.index(x, z);
        if self.primary[i] {
            return;
        }
        match self.heights[i] {
            Some(h) if voxel.y >= h => {}
            _ => self.heights[i] = Some(voxel.y),
        }
    }

    /// Estimate a column's height by inverse-distance weighting over
    /// concentric square rings of known neighbors.
    ///
    /// Rings of radius 1, 2, 3, … are scanned; each known cell contributes
    /// `height / r` to the sum and `1 / r` to the weight total. Ring
    /// coordinates are clamped to the grid, with each cell counted at most
    /// once. Scanning stops once the weight total reaches
    /// `weight_threshold` or the whole grid has been visited.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::EmptyMatrix`] when the matrix holds no known
    /// height anywhere.
    pub fn interpolate(&self, x: usize, z: usize, weight_threshold: f64) -> Result<i32, TerrainError> {
        let mut sum = 0.0;
        let mut weight_total = 0.0;
        let mut used: FxHashSet<(usize, usize)> = FxHashSet::default();

        let max_radius = self.size_x.max(self.size_z) as i32;
        for radius in 1..=max_radius {
            let r_weight = 1.0 / radius as f64;
            let mut visit = |xo: i32, zo: i32, sum: &mut f64, weight_total: &mut f64| {
                let cx = (x as i32 + xo).clamp(0, self.size_x as i32 - 1) as usize;
                let cz = (z as i32 + zo).clamp(0, self.size_z as i32 - 1) as usize;
                if let Some(h) = self.heights[self.index(cx, cz)]
                    && used.insert((cx, cz))
                {
                    *sum += h as f64 * r_weight;
                    *weight_total += r_weight;
                }
            };

            // Top row, both side columns, bottom row of the ring.
            for xo in -radius..=radius {
                visit(xo, -radius, &mut sum, &mut weight_total);
            }
            for zo in -radius..=radius {
                visit(-radius, zo, &mut sum, &mut weight_total);
                visit(radius, zo, &mut sum, &mut weight_total);
            }
            for xo in -radius..=radius {
                visit(xo, radius, &mut sum, &mut weight_total);
            }

            if weight_total >= weight_threshold {
                break;
            }
        }

        if weight_total == 0.0 {
            return Err(TerrainError::EmptyMatrix);
        }
        let estimate = (sum / weight_total).round() as i32;
        trace!(x, z, estimate, weight_total, "interpolated column height");
        Ok(estimate)
    }

    /// Resolve every unknown column via [`interpolate`](Self::interpolate),
    /// in row-major order. Resolved estimates are written back immediately
    /// and participate in later columns' ring scans.
    ///
    /// Returns the number of columns interpolated.
    pub fn fill_missing(&mut self, weight_threshold: f64) -> Result<usize, TerrainError> {
        let mut filled = 0;
        for z in 0..self.size_z {
            for x in 0..self.size_x {
                if self.heights[self.index(x, z)].is_none() {
                    let estimate = self.interpolate(x, z, weight_threshold)?;
                    let i = self.index(x, z);
                    self.heights[i] = Some(estimate);
                    filled += 1;
                }
            }
        }
        Ok(filled)
    }
}
