//! Configuration for the geovox pipeline: RON file on disk, CLI overrides
//! on top.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, MapConfig, TerrainConfig, VoxelizerConfig, default_config_dir};
pub use error::ConfigError;
