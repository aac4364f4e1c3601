//! Per-triangle voxel enumeration.
//!
//! Walks every candidate voxel center in a triangle's integer bounding box
//! and keeps the ones the intersection predicate accepts. Cost is
//! proportional to the bounding-box volume, so the region-overlap early
//! reject is mandatory for triangles far outside the target region.

use rustc_hash::FxHashSet;

use geovox_math::{RegionBounds, Triangle, VoxelCoord};

use crate::intersect::triangle_intersects_unit_cube;

/// Returns the set of voxels inside `bounds` that `triangle` occupies.
///
/// A triangle whose bounding box does not overlap `bounds` at all yields an
/// empty set, not an error.
pub fn rasterize_triangle(triangle: &Triangle, bounds: &RegionBounds) -> FxHashSet<VoxelCoord> {
    let mut voxels = FxHashSet::default();

    let (lo, hi) = triangle.integer_bounds();
    if !bounds.overlaps(lo, hi) {
        return voxels;
    }

    for x in lo.x..=hi.x {
        for y in lo.y..=hi.y {
            for z in lo.z..=hi.z {
                let candidate = VoxelCoord::new(x, y, z);
                if !bounds.contains(candidate) {
                    continue;
                }
                let local = triangle.relative_to(candidate.as_dvec3());
                if triangle_intersects_unit_cube(&local) {
                    voxels.insert(candidate);
                }
            }
        }
    }

    voxels
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn wide_bounds() -> RegionBounds {
        RegionBounds::new(
            VoxelCoord::new(-100, -100, -100),
            VoxelCoord::new(100, 100, 100),
        )
    }

    #[test]
    fn test_triangle_outside_bounds_is_empty() {
        let bounds = RegionBounds::new(VoxelCoord::new(0, 0, 0), VoxelCoord::new(10, 10, 10));
        let t = Triangle::new(
            DVec3::new(50.0, 50.0, 50.0),
            DVec3::new(52.0, 50.0, 50.0),
            DVec3::new(50.0, 52.0, 50.0),
        );
        assert!(rasterize_triangle(&t, &bounds).is_empty());
    }

    #[test]
    fn test_tiny_triangle_occupies_one_voxel() {
        let t = Triangle::new(
            DVec3::new(4.9, 5.0, 5.0),
            DVec3::new(5.1, 5.0, 5.0),
            DVec3::new(5.0, 5.1, 5.0),
        );
        let voxels = rasterize_triangle(&t, &wide_bounds());
        assert_eq!(voxels.len(), 1);
        assert!(voxels.contains(&VoxelCoord::new(5, 5, 5)));
    }

    #[test]
    fn test_flat_triangle_on_voxel_centers_plane() {
        // Axis-aligned triangle in the y=0 plane spanning several columns.
        let t = Triangle::new(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(3.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 3.0),
        );
        let voxels = rasterize_triangle(&t, &wide_bounds());
        // Every corner voxel of the triangle must be claimed.
        for corner in [
            VoxelCoord::new(0, 0, 0),
            VoxelCoord::new(3, 0, 0),
            VoxelCoord::new(0, 0, 3),
        ] {
            assert!(voxels.contains(&corner), "Missing corner voxel {corner:?}");
        }
        // Everything claimed stays in the y=0 layer.
        assert!(voxels.iter().all(|v| v.y == 0));
    }

    #[test]
    fn test_result_clipped_to_bounds() {
        let bounds = RegionBounds::new(VoxelCoord::new(0, 0, 0), VoxelCoord::new(1, 1, 1));
        // Large triangle crossing the bounds boundary.
        let t = Triangle::new(
            DVec3::new(-5.0, 0.0, -5.0),
            DVec3::new(5.0, 0.0, -5.0),
            DVec3::new(0.0, 0.0, 5.0),
        );
        let voxels = rasterize_triangle(&t, &bounds);
        assert!(!voxels.is_empty());
        assert!(
            voxels.iter().all(|v| bounds.contains(*v)),
            "Rasterizer leaked voxels outside the clip bounds"
        );
    }

    #[test]
    fn test_vertical_wall_spans_height() {
        // A wall from y=0 to y=4 in the x=0.. plane.
        let t = Triangle::new(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 4.0, 0.0),
            DVec3::new(0.0, 0.0, 0.5),
        );
        let voxels = rasterize_triangle(&t, &wide_bounds());
        for y in 0..=4 {
            assert!(
                voxels.iter().any(|v| v.y == y),
                "Wall should touch layer y={y}"
            );
        }
    }
}
