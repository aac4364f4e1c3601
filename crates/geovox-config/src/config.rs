//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Geographic anchoring and region geometry.
    pub map: MapConfig,
    /// Voxelization settings.
    pub voxelizer: VoxelizerConfig,
    /// Terrain synthesis block types and interpolation tuning.
    pub terrain: TerrainConfig,
    /// Log level override (e.g. "debug", "info", "geovox_voxel=trace").
    pub log_level: String,
}

/// Geographic anchoring and region geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Latitude of the map origin; regions are laid out around it.
    pub center_lat: f64,
    /// Longitude of the map origin.
    pub center_lon: f64,
    /// Region width in columns (east-west).
    pub region_size_x: u32,
    /// Region depth in columns (north-south).
    pub region_size_z: u32,
    /// Lowest mesh elevation of interest, in meters. Geometry below this
    /// is clipped away before it reaches the voxel grid.
    pub min_height: i32,
}

/// Voxelization settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VoxelizerConfig {
    /// Lowest world block height.
    pub min_y: i32,
    /// Highest world block height.
    pub max_y: i32,
    /// Worker thread cap for per-triangle rasterization; 0 uses all CPUs.
    /// There is one flat pool — this is the only concurrency knob.
    pub worker_threads: usize,
}

/// Terrain synthesis block types and interpolation tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Block name placed at each column's resolved surface height.
    pub cover_block: String,
    /// Block name placed at `min_y` in every column.
    pub bottom_block: String,
    /// Multiset of block names for column interiors; repeats raise a
    /// block's share.
    pub filler_blocks: Vec<String>,
    /// Block names whose voxels may lower the terrain surface locally.
    pub marker_blocks: Vec<String>,
    /// Ring-scan stop threshold for gap interpolation.
    pub interpolation_weight: f64,
    /// Seed for the filler-block random source.
    pub seed: u64,
}

// --- Default implementations ---

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: 0.0,
            center_lon: 0.0,
            region_size_x: 512,
            region_size_z: 512,
            min_height: -16,
        }
    }
}

impl Default for VoxelizerConfig {
    fn default() -> Self {
        Self {
            min_y: -64,
            max_y: 320,
            worker_threads: 0,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            cover_block: "grass_block".to_string(),
            bottom_block: "bedrock".to_string(),
            filler_blocks: vec![
                "dirt".to_string(),
                "dirt".to_string(),
                "coarse_dirt".to_string(),
                "stone".to_string(),
            ],
            marker_blocks: vec!["bricks".to_string(), "stone_bricks".to_string()],
            interpolation_weight: 3.0,
            seed: 0,
        }
    }
}

// --- Load / Save ---

/// The default per-user config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("geovox")
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            info!("loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            info!("created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
