//! Compositing parameters.

use image::imageops::FilterType;
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default warning color: opaque red.
pub const DEFAULT_TINT: [u8; 3] = [255, 0, 0];

/// Default opacity of the warning tint.
pub const DEFAULT_TINT_ALPHA: f32 = 0.35;

/// Resampling filter used when the composed canvas is scaled to the tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resample {
    #[default]
    Nearest,
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl FromStr for Resample {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(Resample::Nearest),
            "triangle" | "bilinear" => Ok(Resample::Triangle),
            "catmullrom" => Ok(Resample::CatmullRom),
            "lanczos3" | "lanczos" => Ok(Resample::Lanczos3),
            _ => Err(format!(
                "Unknown resample filter '{}'. Expected nearest, triangle, catmullrom or lanczos3",
                s
            )),
        }
    }
}

impl From<Resample> for FilterType {
    fn from(resample: Resample) -> Self {
        match resample {
            Resample::Nearest => FilterType::Nearest,
            Resample::Triangle => FilterType::Triangle,
            Resample::CatmullRom => FilterType::CatmullRom,
            Resample::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// How uncovered areas are marked and how the canvas is resampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeConfig {
    /// Warning color as RGB.
    pub tint: [u8; 3],
    /// Warning opacity in [0, 1].
    pub tint_alpha: f32,
    pub filter: Resample,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            tint: DEFAULT_TINT,
            tint_alpha: DEFAULT_TINT_ALPHA,
            filter: Resample::default(),
        }
    }
}

impl CompositeConfig {
    /// Reject opacities outside [0, 1].
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.tint_alpha) {
            return Err(format!("tint alpha {} is outside [0, 1]", self.tint_alpha));
        }
        Ok(())
    }

    /// The warning tint as one RGBA pixel.
    pub fn tint_pixel(&self) -> Rgba<u8> {
        let [r, g, b] = self.tint;
        let alpha = (self.tint_alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([r, g, b, alpha])
    }
}
