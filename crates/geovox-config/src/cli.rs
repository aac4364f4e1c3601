//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Geovox command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "geovox", about = "Geographic data to voxel world converter")]
pub struct CliArgs {
    /// Region X index to process.
    #[arg(short = 'x', long, default_value_t = 0)]
    pub region_x: i32,

    /// Region Z index to process.
    #[arg(short = 'z', long, default_value_t = 0)]
    pub region_z: i32,

    /// Map origin latitude.
    #[arg(long)]
    pub center_lat: Option<f64>,

    /// Map origin longitude.
    #[arg(long)]
    pub center_lon: Option<f64>,

    /// Worker thread cap for rasterization (0 = all CPUs).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Seed for the filler-block random source.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(lat) = args.center_lat {
            self.map.center_lat = lat;
        }
        if let Some(lon) = args.center_lon {
            self.map.center_lon = lon;
        }
        if let Some(threads) = args.threads {
            self.voxelizer.worker_threads = threads;
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.log_level = level.clone();
        }
    }
}
