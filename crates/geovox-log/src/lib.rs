//! Structured logging for the geovox pipeline.
//!
//! Sets up span-based, filterable logging via the `tracing` ecosystem:
//! console output with uptime timestamps and module paths, filtered by the
//! config's log level or the RUST_LOG environment variable.

use geovox_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// The filter is taken from RUST_LOG when set, otherwise from the config's
/// `log_level` field, otherwise `info`. Long rasterization runs log per-mesh
/// progress at debug level; pass `log_level: "debug"` to see it.
pub fn init_logging(config: Option<&Config>) {
    let filter_str = match config {
        Some(config) if !config.log_level.is_empty() => config.log_level.clone(),
        _ => "info".to_string(),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true) // rasterizer workers are named
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_strings_parse() {
        let valid_filters = [
            "info",
            "debug,geovox_voxel=trace",
            "warn,geovox_terrain=debug",
            "error",
        ];
        for filter_str in &valid_filters {
            assert!(
                EnvFilter::try_from(*filter_str).is_ok(),
                "Failed to parse filter: {}",
                filter_str
            );
        }
    }
}
