use glam::DVec3;

use crate::VoxelCoord;

/// Inclusive integer bounding box of a target region.
///
/// Invariant: min.x <= max.x, min.y <= max.y, min.z <= max.z. The
/// constructor enforces this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionBounds {
    pub min: VoxelCoord,
    pub max: VoxelCoord,
}

impl RegionBounds {
    /// Create bounds from two corners. Automatically sorts components so
    /// that min <= max on every axis.
    pub fn new(a: VoxelCoord, b: VoxelCoord) -> Self {
        Self {
            min: VoxelCoord::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: VoxelCoord::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Returns true if the voxel lies inside or on the boundary.
    pub fn contains(&self, v: VoxelCoord) -> bool {
        v.x >= self.min.x
            && v.x <= self.max.x
            && v.y >= self.min.y
            && v.y <= self.max.y
            && v.z >= self.min.z
            && v.z <= self.max.z
    }

    /// Returns true if the inclusive box `[lo, hi]` overlaps these bounds
    /// (touching faces count as overlap).
    pub fn overlaps(&self, lo: VoxelCoord, hi: VoxelCoord) -> bool {
        lo.x <= self.max.x
            && hi.x >= self.min.x
            && lo.y <= self.max.y
            && hi.y >= self.min.y
            && lo.z <= self.max.z
            && hi.z >= self.min.z
    }
}

/// A region's voxel-space clipping bounds plus the world offset that maps
/// region-local voxels into absolute world coordinates.
///
/// Regions are `size_x × size_z` columns of blocks centered on the region's
/// world center; meshes are rendered in coordinates relative to that center,
/// so the clip box straddles the origin horizontally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionFrame {
    /// Inclusive bounds the voxelizer clips against, in mesh-local space.
    pub bounds: RegionBounds,
    /// World offset added to each surviving voxel.
    pub offset: DVec3,
}

impl RegionFrame {
    /// Derive the frame for region `(region_x, region_z)`.
    ///
    /// `min_height` is the lowest mesh elevation of interest, `min_y` and
    /// `max_y` the world's vertical block range. The vertical clip window is
    /// `min_height ..= max_y + min_height - min_y`, and the offset lifts the
    /// clipped band so that `min_height` lands on `min_y`.
    pub fn new(
        region_x: i32,
        region_z: i32,
        size_x: i32,
        size_z: i32,
        min_height: i32,
        min_y: i32,
        max_y: i32,
    ) -> Self {
        let center_x = ((region_x as f64 + 0.5) * size_x as f64) as i32;
        let center_z = ((region_z as f64 + 0.5) * size_z as f64) as i32;

        let bounds = RegionBounds::new(
            VoxelCoord::new(-size_x / 2, min_height, -size_z / 2),
            VoxelCoord::new(
                size_x / 2 - 1,
                max_y + min_height - min_y,
                size_z / 2 - 1,
            ),
        );
        let offset = DVec3::new(
            center_x as f64,
            (min_y - min_height) as f64,
            center_z as f64,
        );

        Self { bounds, offset }
    }

    /// World x coordinate of the region's westernmost column.
    pub fn min_world_x(&self) -> i32 {
        self.offset.x as i32 + self.bounds.min.x
    }

    /// World z coordinate of the region's northernmost column.
    pub fn min_world_z(&self) -> i32 {
        self.offset.z as i32 + self.bounds.min.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_auto_sorts() {
        let b = RegionBounds::new(VoxelCoord::new(10, 5, -3), VoxelCoord::new(-10, 0, 3));
        assert_eq!(b.min, VoxelCoord::new(-10, 0, -3));
        assert_eq!(b.max, VoxelCoord::new(10, 5, 3));
    }

    #[test]
    fn test_contains_boundary_inclusive() {
        let b = RegionBounds::new(VoxelCoord::new(0, 0, 0), VoxelCoord::new(10, 10, 10));
        assert!(b.contains(VoxelCoord::new(0, 0, 0)));
        assert!(b.contains(VoxelCoord::new(10, 10, 10)));
        assert!(!b.contains(VoxelCoord::new(11, 5, 5)));
        assert!(!b.contains(VoxelCoord::new(5, -1, 5)));
    }

    #[test]
    fn test_overlaps_disjoint_on_one_axis() {
        let b = RegionBounds::new(VoxelCoord::new(0, 0, 0), VoxelCoord::new(10, 10, 10));
        // Overlapping in x and z but entirely above in y.
        assert!(!b.overlaps(VoxelCoord::new(2, 20, 2), VoxelCoord::new(8, 30, 8)));
        // Touching the max face still counts.
        assert!(b.overlaps(VoxelCoord::new(10, 10, 10), VoxelCoord::new(20, 20, 20)));
    }

    #[test]
    fn test_region_frame_zero_zero() {
        let frame = RegionFrame::new(0, 0, 512, 512, -16, -64, 320);
        assert_eq!(frame.bounds.min, VoxelCoord::new(-256, -16, -256));
        assert_eq!(frame.bounds.max, VoxelCoord::new(255, 320 + -16 - -64, 255));
        assert_eq!(frame.offset, DVec3::new(256.0, -48.0, 256.0));
        assert_eq!(frame.min_world_x(), 0);
        assert_eq!(frame.min_world_z(), 0);
    }

    #[test]
    fn test_region_frame_offset_tracks_region_index() {
        let a = RegionFrame::new(0, 0, 512, 512, 0, 0, 256);
        let b = RegionFrame::new(1, -1, 512, 512, 0, 0, 256);
        assert_eq!(b.offset.x - a.offset.x, 512.0);
        assert_eq!(b.offset.z - a.offset.z, -512.0);
        // Clip bounds are region-local and identical across regions.
        assert_eq!(a.bounds, b.bounds);
    }
}
