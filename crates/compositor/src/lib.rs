//! Radar-over-tile compositing.
//!
//! Pipeline for one output tile:
//! - Plan the radar crop covering the tile's bounding box (`plan`)
//! - Make pure-black radar pixels transparent (`filter`)
//! - Paint the part of the tile the radar does not cover with a warning tint (`tint`)
//! - Resize and alpha-composite onto the tile (`composite`)

pub mod composite;
pub mod config;
pub mod filter;
pub mod plan;
pub mod source;
pub mod tint;

pub use composite::{compose, CompositeRequest};
pub use config::{CompositeConfig, Resample};
pub use filter::filter_no_data;
pub use plan::{plan_crop, Coverage, CropPlan, Overflow, PixelWindow};
pub use source::{load_raster, save_png, RadarSource};
pub use tint::apply_tint;
