//! Radar overlay tool.
//!
//! Places NEXRAD composite reflectivity over equirectangular map tiles:
//! - Locate the grid cell for a coordinate
//! - Resolve the 5-minute composite for a time
//! - List radar stations from the fixed-width station table
//! - Composite radar onto cached tiles, one output PNG per cell

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use commands::ComposeJob;
use config::OverlayConfig;

#[derive(Parser, Debug)]
#[command(name = "radar-overlay")]
#[command(about = "Overlay weather radar composites on map tiles")]
struct Cli {
    /// YAML configuration file
    #[arg(long, env = "RADAR_OVERLAY_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "RADAR_OVERLAY_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "RADAR_OVERLAY_LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find the grid cell containing a coordinate
    Locate {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Zoom level (default: from config)
        #[arg(short, long)]
        zoom: Option<u32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Round a time to its composite and print the archive URLs
    RoundTime {
        /// RFC 3339 time (default: now)
        #[arg(short, long)]
        time: Option<DateTime<Utc>>,
    },

    /// List radar stations west to east
    Stations {
        /// Station table template (widths line, then labels line)
        #[arg(long)]
        template: PathBuf,

        /// Fixed-width station records
        #[arg(long)]
        table: PathBuf,

        /// Only stations inside minlon,minlat,maxlon,maxlat
        #[arg(long, allow_hyphen_values = true)]
        bbox: Option<String>,
    },

    /// Composite a radar image onto cached tiles
    Compose {
        /// Radar composite image
        #[arg(long, env = "RADAR_OVERLAY_RADAR")]
        radar: PathBuf,

        /// World file paired with the radar image
        #[arg(long, env = "RADAR_OVERLAY_WORLD_FILE")]
        world_file: PathBuf,

        /// Cell to composite as x,y; repeatable
        #[arg(long = "cell", required = true, value_parser = commands::parse_cell)]
        cells: Vec<(u32, u32)>,

        /// Directory of cached tiles (default: data_dirs.tiles)
        #[arg(long, env = "RADAR_OVERLAY_TILES_DIR")]
        tiles_dir: Option<PathBuf>,

        /// Output directory (default: data_dirs.output)
        #[arg(long, env = "RADAR_OVERLAY_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json)?;

    let config = OverlayConfig::load(cli.config.as_deref())?;
    debug!(?config, "Effective configuration");

    match cli.command {
        Commands::Locate { lat, lon, zoom, json } => commands::run_locate(&config, lat, lon, zoom, json),
        Commands::RoundTime { time } => commands::run_round_time(&config, time),
        Commands::Stations {
            template,
            table,
            bbox,
        } => commands::run_stations(&template, &table, bbox.as_deref()),
        Commands::Compose {
            radar,
            world_file,
            cells,
            tiles_dir,
            output_dir,
        } => {
            let job = ComposeJob {
                radar,
                world_file,
                cells,
                tiles_dir: tiles_dir.unwrap_or_else(|| config.data_dirs.tiles.clone()),
                output_dir: output_dir.unwrap_or_else(|| config.data_dirs.output.clone()),
            };
            let written = commands::run_compose(&config, &job)?;
            println!("Wrote {} composites to {}", written.len(), job.output_dir.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_negative_coordinates() {
        let cli = Cli::try_parse_from(["radar-overlay", "locate", "--lat", "41.6", "--lon", "-88.1", "-z", "6"])
            .unwrap();
        match cli.command {
            Commands::Locate { lat, lon, zoom, json } => {
                assert_eq!(lat, 41.6);
                assert_eq!(lon, -88.1);
                assert_eq!(zoom, Some(6));
                assert!(!json);
            }
            other => panic!("Expected locate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_compose_cells() {
        let cli = Cli::try_parse_from([
            "radar-overlay",
            "compose",
            "--radar",
            "n0q.png",
            "--world-file",
            "n0q.wld",
            "--cell",
            "130,68",
            "--cell",
            "131,68",
        ])
        .unwrap();
        match cli.command {
            Commands::Compose { cells, tiles_dir, .. } => {
                assert_eq!(cells, vec![(130, 68), (131, 68)]);
                assert!(tiles_dir.is_none());
            }
            other => panic!("Expected compose, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_round_time() {
        let cli = Cli::try_parse_from(["radar-overlay", "round-time", "--time", "2016-03-23T12:32:30Z"]).unwrap();
        assert!(matches!(cli.command, Commands::RoundTime { time: Some(_) }));
    }

    #[test]
    fn test_compose_paths_read_from_env() {
        use clap::CommandFactory;

        let cli = Cli::command();
        let compose = cli.find_subcommand("compose").unwrap();
        for (arg, env) in [
            ("radar", "RADAR_OVERLAY_RADAR"),
            ("world_file", "RADAR_OVERLAY_WORLD_FILE"),
            ("tiles_dir", "RADAR_OVERLAY_TILES_DIR"),
            ("output_dir", "RADAR_OVERLAY_OUTPUT_DIR"),
        ] {
            let arg = compose.get_arguments().find(|a| a.get_id() == arg).unwrap();
            assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new(env)));
        }
    }

    #[test]
    fn test_compose_requires_cell() {
        let result = Cli::try_parse_from([
            "radar-overlay",
            "compose",
            "--radar",
            "n0q.png",
            "--world-file",
            "n0q.wld",
        ]);
        assert!(result.is_err());
    }
}
