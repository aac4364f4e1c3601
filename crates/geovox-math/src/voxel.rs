use glam::DVec3;

/// Integer coordinate of one unit grid cell.
///
/// A voxel occupies the unit cube centered on its coordinate, extending
/// ±0.5 on every axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    /// Create a voxel coordinate from its components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The voxel center as a floating-point position.
    pub fn as_dvec3(self) -> DVec3 {
        DVec3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Round a floating-point position to the nearest voxel coordinate.
    pub fn from_rounded(p: DVec3) -> Self {
        Self {
            x: p.x.round() as i32,
            y: p.y.round() as i32,
            z: p.z.round() as i32,
        }
    }

    /// Swap the x and z components.
    ///
    /// The mesh renderer's axis layout and the voxel grid's axis layout
    /// disagree on which horizontal axis is which; this is the fixed
    /// correction applied after rasterization.
    pub const fn swap_xz(self) -> Self {
        Self {
            x: self.z,
            y: self.y,
            z: self.x,
        }
    }

    /// Translate by a floating-point offset and round to the nearest
    /// integer coordinate.
    pub fn translated_rounded(self, offset: DVec3) -> Self {
        Self::from_rounded(self.as_dvec3() + offset)
    }
}
