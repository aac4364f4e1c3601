use glam::DVec3;

use crate::VoxelCoord;

/// One triangle of a surface mesh. Vertex order is preserved from the
/// source mesh; no winding is implied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: DVec3,
    pub b: DVec3,
    pub c: DVec3,
}

impl Triangle {
    /// Create a triangle from three vertices.
    pub const fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self { a, b, c }
    }

    /// The three vertices in their original order.
    pub const fn vertices(&self) -> [DVec3; 3] {
        [self.a, self.b, self.c]
    }

    /// The same triangle expressed relative to `center`, so that a unit
    /// cube centered on `center` becomes a unit cube at the origin.
    pub fn relative_to(&self, center: DVec3) -> Triangle {
        Triangle::new(self.a - center, self.b - center, self.c - center)
    }

    /// Integer bounding box: per-axis floor of the minimum vertex and ceil
    /// of the maximum vertex. Every voxel the triangle can touch has its
    /// center inside this inclusive box.
    pub fn integer_bounds(&self) -> (VoxelCoord, VoxelCoord) {
        let min = self.a.min(self.b).min(self.c);
        let max = self.a.max(self.b).max(self.c);
        (
            VoxelCoord::new(
                min.x.floor() as i32,
                min.y.floor() as i32,
                min.z.floor() as i32,
            ),
            VoxelCoord::new(
                max.x.ceil() as i32,
                max.y.ceil() as i32,
                max.z.ceil() as i32,
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_bounds_floor_and_ceil() {
        let t = Triangle::new(
            DVec3::new(0.2, -0.7, 3.0),
            DVec3::new(2.9, 1.1, 3.5),
            DVec3::new(1.0, 0.0, 4.2),
        );
        let (lo, hi) = t.integer_bounds();
        assert_eq!(lo, VoxelCoord::new(0, -1, 3));
        assert_eq!(hi, VoxelCoord::new(3, 2, 5));
    }

    #[test]
    fn test_relative_to_translates_all_vertices() {
        let t = Triangle::new(
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(4.0, 5.0, 6.0),
            DVec3::new(7.0, 8.0, 9.0),
        );
        let local = t.relative_to(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(local.a, DVec3::ZERO);
        assert_eq!(local.b, DVec3::new(3.0, 3.0, 3.0));
        assert_eq!(local.c, DVec3::new(6.0, 6.0, 6.0));
    }
}
