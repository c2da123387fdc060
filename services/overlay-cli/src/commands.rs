//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use compositor::{load_raster, save_png, CompositeConfig, CompositeRequest, RadarSource};
use radar_common::{
    locate, round_to_five_minutes, BoundingBox, GpsCoordinate, GridCell, OverlayResult,
    RadarArchive, StationTable, StationTemplate,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::OverlayConfig;

/// Where a coordinate lands in the tile grid.
#[derive(Debug, Serialize)]
pub struct LocateReport {
    pub cell: GridCell,
    pub bbox: BoundingBox,
    pub tile_url: String,
    pub cache_file: String,
}

pub fn locate_report(config: &OverlayConfig, lat: f64, lon: f64, zoom: u32) -> Result<LocateReport> {
    let coordinate = GpsCoordinate::new(lat, lon)?;
    let cell = locate(coordinate, zoom)?;
    Ok(LocateReport {
        cell,
        bbox: cell.bbox(),
        tile_url: cell.tile_url(&config.tile_url_template),
        cache_file: cell.cache_file_name(),
    })
}

pub fn run_locate(config: &OverlayConfig, lat: f64, lon: f64, zoom: Option<u32>, json: bool) -> Result<()> {
    let report = locate_report(config, lat, lon, zoom.unwrap_or(config.zoom))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let bbox = report.bbox;
        println!("Cell:       x={} y={} zoom={}", report.cell.x(), report.cell.y(), report.cell.zoom());
        println!(
            "Bounds:     lon [{}, {}) lat [{}, {})",
            bbox.min_x, bbox.max_x, bbox.min_y, bbox.max_y
        );
        println!("Tile URL:   {}", report.tile_url);
        println!("Cache file: {}", report.cache_file);
    }
    Ok(())
}

pub fn run_round_time(config: &OverlayConfig, time: Option<DateTime<Utc>>) -> Result<()> {
    let time = time.unwrap_or_else(Utc::now);
    let archive = RadarArchive::new(config.archive_base_url.clone());

    println!("Requested:  {}", time.to_rfc3339());
    println!("Composite:  {}", round_to_five_minutes(time).to_rfc3339());
    println!("Image:      {}", archive.png_url(time));
    println!("World file: {}", archive.world_file_url(time));
    Ok(())
}

pub fn load_stations(template: &Path, table: &Path) -> Result<StationTable> {
    let template_text = std::fs::read_to_string(template)
        .with_context(|| format!("Failed to read station template: {}", template.display()))?;
    let records = std::fs::read_to_string(table)
        .with_context(|| format!("Failed to read station table: {}", table.display()))?;

    let template = StationTemplate::parse(&template_text)?;
    Ok(StationTable::parse(&template, &records)?)
}

pub fn run_stations(template: &Path, table: &Path, bbox: Option<&str>) -> Result<()> {
    let table = load_stations(template, table)?;
    let stations = match bbox {
        Some(bbox) => table.within(&BoundingBox::from_csv(bbox)?),
        None => table.stations().iter().collect(),
    };

    println!("{:<6} {:<5} {:>9} {:>10} {:>11}", "ICAO", "STATE", "ELEV_FT", "LAT", "LON");
    for station in &stations {
        println!(
            "{:<6} {:<5} {:>9} {:>10.4} {:>11.4}",
            station.icao, station.state, station.elevation, station.latitude, station.longitude
        );
    }
    println!("{} stations", stations.len());
    Ok(())
}

/// Arguments of the `compose` subcommand after defaults are applied.
#[derive(Debug, Clone)]
pub struct ComposeJob {
    pub radar: PathBuf,
    pub world_file: PathBuf,
    pub cells: Vec<(u32, u32)>,
    pub tiles_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Composite every requested cell in parallel. Returns the written paths;
/// fails if any cell failed, after all cells have been attempted.
pub fn run_compose(config: &OverlayConfig, job: &ComposeJob) -> Result<Vec<PathBuf>> {
    let source = RadarSource::open(&job.radar, &job.world_file)
        .with_context(|| format!("Failed to open radar source: {}", job.radar.display()))?;
    std::fs::create_dir_all(&job.output_dir)
        .with_context(|| format!("Failed to create output directory: {}", job.output_dir.display()))?;

    let composite_config = config.composite_config();
    let zoom = config.zoom;

    let results: Vec<((u32, u32), OverlayResult<PathBuf>)> = job
        .cells
        .par_iter()
        .map(|&(x, y)| {
            let result = compose_cell(x, y, zoom, &source, job, &composite_config);
            ((x, y), result)
        })
        .collect();

    let mut written = Vec::new();
    let mut failed = 0;
    for ((x, y), result) in results {
        match result {
            Ok(path) => {
                info!(x, y, zoom, path = %path.display(), "Composite written");
                written.push(path);
            }
            Err(e) => {
                if e.is_caller_error() {
                    warn!(x, y, zoom, kind = e.kind(), error = %e, "Cell rejected");
                } else {
                    error!(x, y, zoom, kind = e.kind(), error = %e, "Composite failed");
                }
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} cells failed", failed, job.cells.len());
    }
    Ok(written)
}

fn compose_cell(
    x: u32,
    y: u32,
    zoom: u32,
    source: &RadarSource,
    job: &ComposeJob,
    config: &CompositeConfig,
) -> OverlayResult<PathBuf> {
    let cell = GridCell::new(x, y, zoom)?;
    let tile = load_raster(&job.tiles_dir.join(cell.cache_file_name()))?;

    let output = compositor::compose(&CompositeRequest::for_cell(&cell, &tile, source), config)?;

    let path = job.output_dir.join(output_file_name(&cell));
    save_png(&output, &path)?;
    Ok(path)
}

/// `<zoom>_<x>_<y>.png`
pub fn output_file_name(cell: &GridCell) -> String {
    format!("{}_{}_{}.png", cell.zoom(), cell.x(), cell.y())
}

/// Parse an `x,y` cell argument.
pub fn parse_cell(s: &str) -> Result<(u32, u32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'x,y', got '{}'", s))?;
    let x = x.trim().parse().map_err(|_| format!("invalid x in '{}'", s))?;
    let y = y.trim().parse().map_err(|_| format!("invalid y in '{}'", s))?;
    Ok((x, y))
}
