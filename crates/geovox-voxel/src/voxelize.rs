//! Whole-mesh voxelization: parallel per-triangle rasterization, set union,
//! axis correction, and translation into the target region's world frame.

use crossbeam_channel::bounded;
use glam::DVec3;
use rustc_hash::FxHashSet;
use tracing::debug;

use geovox_math::{RegionBounds, RegionFrame, Triangle, VoxelCoord};

use crate::mesh::TriangleMesh;
use crate::raster::rasterize_triangle;

/// Voxelizes triangulated surfaces into one target region.
///
/// Per-triangle work is stateless and fans out over a single flat worker
/// pool with one concurrency cap; results are combined by set union, so the
/// output is identical for any worker count or task partitioning.
pub struct MeshVoxelizer {
    bounds: RegionBounds,
    offset: DVec3,
    worker_threads: usize,
}

impl MeshVoxelizer {
    /// Create a voxelizer clipping to `bounds` (inclusive, in mesh-local
    /// space) and translating surviving voxels by `offset`.
    ///
    /// `worker_threads` caps rasterization parallelism; `0` selects the
    /// number of available CPUs.
    pub fn new(bounds: RegionBounds, offset: DVec3, worker_threads: usize) -> Self {
        let worker_threads = if worker_threads == 0 {
            num_cpus::get()
        } else {
            worker_threads
        };
        Self {
            bounds,
            offset,
            worker_threads,
        }
    }

    /// Create a voxelizer for a region frame.
    pub fn for_frame(frame: &RegionFrame, worker_threads: usize) -> Self {
        Self::new(frame.bounds, frame.offset, worker_threads)
    }

    /// Voxelize a surface into the target region.
    ///
    /// Unions the per-triangle voxel sets, applies the fixed x ↔ z axis
    /// correction, re-clips to the region bounds (a voxel valid before the
    /// correction may fall outside after), then adds the world offset and
    /// rounds. An empty mesh yields an empty set.
    pub fn voxelize(&self, mesh: &TriangleMesh) -> FxHashSet<VoxelCoord> {
        let raw = self.rasterize_union(mesh);
        debug!(
            triangles = mesh.triangle_count(),
            raw_voxels = raw.len(),
            "rasterized mesh"
        );

        let mut voxels = FxHashSet::with_capacity_and_hasher(raw.len(), Default::default());
        for v in raw {
            let corrected = v.swap_xz();
            if self.bounds.contains(corrected) {
                voxels.insert(corrected.translated_rounded(self.offset));
            }
        }
        voxels
    }

    /// Union of per-triangle voxel sets in mesh-local coordinates, before
    /// axis correction and translation.
    fn rasterize_union(&self, mesh: &TriangleMesh) -> FxHashSet<VoxelCoord> {
        let total = mesh.triangle_count();
        if total == 0 {
            return FxHashSet::default();
        }

        let workers = self.worker_threads.min(total);
        if workers <= 1 {
            let mut voxels = FxHashSet::default();
            for triangle in mesh.triangles() {
                voxels.extend(rasterize_triangle(&triangle, &self.bounds));
            }
            return voxels;
        }

        let (task_tx, task_rx) = bounded::<Triangle>(workers * 2);
        let (result_tx, result_rx) = bounded::<FxHashSet<VoxelCoord>>(workers);
        let bounds = self.bounds;

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let task_rx = task_rx.clone();
                let result_tx = result_tx.clone();
                std::thread::Builder::new()
                    .name("voxel-raster".into())
                    .spawn_scoped(scope, move || {
                        let mut local = FxHashSet::default();
                        while let Ok(triangle) = task_rx.recv() {
                            local.extend(rasterize_triangle(&triangle, &bounds));
                        }
                        let _ = result_tx.send(local);
                    })
                    .expect("Failed to spawn rasterizer worker thread");
            }
            // Workers hold their own clones; closing these ends the streams.
            drop(task_rx);
            drop(result_tx);

            for triangle in mesh.triangles() {
                if task_tx.send(triangle).is_err() {
                    break;
                }
            }
            drop(task_tx);

            let mut voxels = FxHashSet::default();
            while let Ok(partial) = result_rx.recv() {
                voxels.extend(partial);
            }
            voxels
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_voxelizer(worker_threads: usize) -> MeshVoxelizer {
        MeshVoxelizer::new(
            RegionBounds::new(
                VoxelCoord::new(-100, -100, -100),
                VoxelCoord::new(100, 100, 100),
            ),
            DVec3::ZERO,
            worker_threads,
        )
    }

    /// Closed axis-aligned unit cube from (0,0,0) to (1,1,1): 12 triangles,
    /// two per face.
    fn unit_cube_mesh() -> TriangleMesh {
        let v = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            [0, 1, 2],
            [0, 2, 3], // z = 0
            [4, 5, 6],
            [4, 6, 7], // z = 1
            [0, 1, 5],
            [0, 5, 4], // y = 0
            [3, 2, 6],
            [3, 6, 7], // y = 1
            [0, 3, 7],
            [0, 7, 4], // x = 0
            [1, 2, 6],
            [1, 6, 5], // x = 1
        ];
        TriangleMesh::new(v, faces)
    }

    /// A deterministic pseudo-random triangle soup for partition tests.
    fn triangle_soup(count: usize) -> TriangleMesh {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for i in 0..count {
            let f = i as f64;
            let base = DVec3::new(
                (f * 1.37).sin() * 20.0,
                (f * 0.71).cos() * 10.0,
                (f * 2.11).sin() * 20.0,
            );
            let idx = vertices.len() as u32;
            vertices.push(base);
            vertices.push(base + DVec3::new(3.0, 0.5, (f * 0.3).cos() * 2.0));
            vertices.push(base + DVec3::new((f * 0.9).sin() * 2.0, 2.5, 1.0));
            faces.push([idx, idx + 1, idx + 2]);
        }
        TriangleMesh::new(vertices, faces)
    }

    #[test]
    fn test_empty_mesh_yields_empty_set() {
        let voxels = wide_voxelizer(4).voxelize(&TriangleMesh::default());
        assert!(voxels.is_empty());
    }

    #[test]
    fn test_unit_cube_claims_its_eight_corner_voxels() {
        // Under the integer-centered convention, every face of the cube
        // passes exactly ±0.5 from the centers at the cube's corners, so
        // the closed surface claims exactly the 8 corner voxels.
        let voxels = wide_voxelizer(1).voxelize(&unit_cube_mesh());
        assert_eq!(voxels.len(), 8, "Expected exactly the 8 corner voxels");
        for x in 0..=1 {
            for y in 0..=1 {
                for z in 0..=1 {
                    assert!(
                        voxels.contains(&VoxelCoord::new(x, y, z)),
                        "Missing corner voxel ({x}, {y}, {z})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mesh = triangle_soup(64);
        let sequential = wide_voxelizer(1).voxelize(&mesh);
        for workers in [2, 4, 8] {
            let parallel = wide_voxelizer(workers).voxelize(&mesh);
            assert_eq!(
                sequential, parallel,
                "Voxel set changed with {workers} workers"
            );
        }
    }

    #[test]
    fn test_axis_correction_swaps_x_and_z() {
        // A tiny triangle at mesh-local (7, 0, 2) must land at world (2, 0, 7).
        let t = [
            DVec3::new(6.9, 0.0, 2.0),
            DVec3::new(7.1, 0.0, 2.0),
            DVec3::new(7.0, 0.1, 2.0),
        ];
        let mesh = TriangleMesh::new(t.to_vec(), vec![[0, 1, 2]]);
        let voxels = wide_voxelizer(1).voxelize(&mesh);
        assert!(voxels.contains(&VoxelCoord::new(2, 0, 7)));
        assert!(!voxels.contains(&VoxelCoord::new(7, 0, 2)));
    }

    #[test]
    fn test_offset_applied_after_clip() {
        let bounds = RegionBounds::new(VoxelCoord::new(-8, 0, -8), VoxelCoord::new(7, 16, 7));
        let offset = DVec3::new(1000.0, 60.0, -500.0);
        let voxelizer = MeshVoxelizer::new(bounds, offset, 1);

        let t = [
            DVec3::new(-0.1, 3.0, 0.0),
            DVec3::new(0.1, 3.0, 0.0),
            DVec3::new(0.0, 3.1, 0.0),
        ];
        let mesh = TriangleMesh::new(t.to_vec(), vec![[0, 1, 2]]);
        let voxels = voxelizer.voxelize(&mesh);
        assert!(
            voxels.contains(&VoxelCoord::new(1000, 63, -500)),
            "Voxel should be translated into the world frame, got {voxels:?}"
        );
    }

    #[test]
    fn test_mesh_outside_region_clips_to_empty() {
        let bounds = RegionBounds::new(VoxelCoord::new(0, 0, 0), VoxelCoord::new(15, 15, 15));
        let voxelizer = MeshVoxelizer::new(bounds, DVec3::ZERO, 2);
        let t = [
            DVec3::new(40.0, 40.0, 40.0),
            DVec3::new(42.0, 40.0, 40.0),
            DVec3::new(41.0, 42.0, 40.0),
        ];
        let mesh = TriangleMesh::new(t.to_vec(), vec![[0, 1, 2]]);
        assert!(voxelizer.voxelize(&mesh).is_empty());
    }
}
