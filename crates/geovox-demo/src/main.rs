//! Demo binary running the full geovox pipeline on synthetic geometry.
//!
//! Stands in for the real orchestration layer: instead of downloading map
//! data and rendering it to meshes, it builds a small undulating ground
//! surface with a hole plus a brick building in code, then voxelizes both,
//! synthesizes terrain, and merges the result the way the world-writer
//! collaborator would receive it.
//!
//! Run with `cargo run -p geovox-demo`, override with e.g.
//! `cargo run -p geovox-demo -- --seed 7 --log-level debug`.

use clap::Parser;
use glam::DVec3;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{error, info};

use geovox_config::{CliArgs, Config, default_config_dir};
use geovox_math::{MapProjection, RegionFrame, VoxelCoord};
use geovox_terrain::{TerrainParams, TerrainSynthesizer};
use geovox_voxel::{BlockId, BlockRegistry, MeshVoxelizer, TriangleMesh};

/// Triangulated ground surface: a grid of quads over `[-extent, extent]²`
/// with gentle height variation and a rectangular hole (unsampled columns
/// the terrain synthesizer must interpolate).
fn ground_mesh(extent: i32, step: i32) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    let height = |x: f64, z: f64| 3.0 * (x / 19.0).sin() * (z / 23.0).cos();
    let in_hole = |x: i32, z: i32| (4..=20).contains(&x) && (-16..=-2).contains(&z);

    let mut x = -extent;
    while x < extent {
        let mut z = -extent;
        while z < extent {
            if !in_hole(x, z) {
                let corners = [
                    DVec3::new(x as f64, height(x as f64, z as f64), z as f64),
                    DVec3::new((x + step) as f64, height((x + step) as f64, z as f64), z as f64),
                    DVec3::new(
                        (x + step) as f64,
                        height((x + step) as f64, (z + step) as f64),
                        (z + step) as f64,
                    ),
                    DVec3::new(x as f64, height(x as f64, (z + step) as f64), (z + step) as f64),
                ];
                mesh.merge(&TriangleMesh::new(
                    corners.to_vec(),
                    vec![[0, 1, 2], [0, 2, 3]],
                ));
            }
            z += step;
        }
        x += step;
    }
    mesh
}

/// Closed axis-aligned box between two corners, two triangles per face.
fn box_mesh(min: DVec3, max: DVec3) -> TriangleMesh {
    let v = vec![
        DVec3::new(min.x, min.y, min.z),
        DVec3::new(max.x, min.y, min.z),
        DVec3::new(max.x, max.y, min.z),
        DVec3::new(min.x, max.y, min.z),
        DVec3::new(min.x, min.y, max.z),
        DVec3::new(max.x, min.y, max.z),
        DVec3::new(max.x, max.y, max.z),
        DVec3::new(min.x, max.y, max.z),
    ];
    let faces = vec![
        [0, 1, 2],
        [0, 2, 3],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 2, 6],
        [3, 6, 7],
        [0, 3, 7],
        [0, 7, 4],
        [1, 2, 6],
        [1, 6, 5],
    ];
    TriangleMesh::new(v, faces)
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    // Compact demo region; the synthetic scene only covers a small area.
    config.map.region_size_x = 64;
    config.map.region_size_z = 64;
    config.map.min_height = -8;
    config.voxelizer.min_y = -16;
    config.voxelizer.max_y = 64;

    geovox_log::init_logging(Some(&config));

    let projection = MapProjection::new(config.map.center_lat, config.map.center_lon);
    let frame = RegionFrame::new(
        args.region_x,
        args.region_z,
        config.map.region_size_x as i32,
        config.map.region_size_z as i32,
        config.map.min_height,
        config.voxelizer.min_y,
        config.voxelizer.max_y,
    );
    let (corner_lat, corner_lon) =
        projection.to_lat_lon(-(frame.min_world_z() as f64), frame.min_world_x() as f64);
    info!(
        region_x = args.region_x,
        region_z = args.region_z,
        corner_lat,
        corner_lon,
        "processing region"
    );

    // Resolve configured block names to opaque ids.
    let mut registry = BlockRegistry::new();
    let resolve = |name: &str, registry: &mut BlockRegistry| {
        registry.register_or_lookup(name).unwrap_or_else(|e| {
            eprintln!("Block registry exhausted: {e}");
            std::process::exit(1);
        })
    };
    let cover_block = resolve(&config.terrain.cover_block, &mut registry);
    let bottom_block = resolve(&config.terrain.bottom_block, &mut registry);
    let filler_blocks: Vec<BlockId> = config
        .terrain
        .filler_blocks
        .iter()
        .map(|name| resolve(name, &mut registry))
        .collect();
    let marker_blocks: FxHashSet<BlockId> = config
        .terrain
        .marker_blocks
        .iter()
        .map(|name| resolve(name, &mut registry))
        .collect();
    let brick_block = resolve("bricks", &mut registry);

    let voxelizer = MeshVoxelizer::for_frame(&frame, config.voxelizer.worker_threads);

    // Ground surface with a hole where the building stands.
    let ground = ground_mesh(28, 4);
    info!(triangles = ground.triangle_count(), "voxelizing ground surface");
    let ground_voxels = voxelizer.voxelize(&ground);

    // A brick building sunk below grade; its voxels are terrain markers and
    // pull the interpolated surface down to its foundation. Mesh-frame
    // coordinates are the x/z swap of the hole's world-frame footprint.
    let building = box_mesh(DVec3::new(6.0, -4.0, -14.0), DVec3::new(18.0, 14.0, -4.0));
    info!(triangles = building.triangle_count(), "voxelizing building");
    let building_voxels = voxelizer.voxelize(&building);
    let object_voxels: Vec<(VoxelCoord, BlockId)> = building_voxels
        .iter()
        .map(|&v| (v, brick_block))
        .collect();

    let mut synthesizer = TerrainSynthesizer::new(
        config.map.region_size_x as usize,
        config.map.region_size_z as usize,
        TerrainParams {
            min_y: config.voxelizer.min_y,
            region_min_x: frame.min_world_x(),
            region_min_z: frame.min_world_z(),
            cover_block,
            bottom_block,
            filler_blocks,
            interpolation_weight: config.terrain.interpolation_weight,
            seed: config.terrain.seed,
        },
    );
    synthesizer.add_ground_surface(ground_voxels.iter().copied());
    synthesizer.add_markers(
        object_voxels
            .iter()
            .filter(|(_, block)| marker_blocks.contains(block))
            .map(|(v, _)| *v),
    );

    let terrain_blocks = match synthesizer.synthesize() {
        Ok(blocks) => blocks,
        Err(e) => {
            error!("terrain synthesis failed: {e}");
            std::process::exit(1);
        }
    };

    // Merge for the world writer: terrain first, object voxels overwrite at
    // identical coordinates (last write wins).
    let mut world: FxHashMap<VoxelCoord, BlockId> = FxHashMap::default();
    for (coord, block) in terrain_blocks {
        world.insert(coord, block);
    }
    for (coord, block) in object_voxels {
        world.insert(coord, block);
    }

    info!(
        ground_voxels = ground_voxels.len(),
        building_voxels = building_voxels.len(),
        total_blocks = world.len(),
        "region complete, handing block list to the world writer"
    );
}
