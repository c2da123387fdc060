//! World-file parsing.
//!
//! A world file holds six numbers, one per line, in this order:
//!
//! | Line | Field |
//! |---|---|
//! | 1 | pixel width (degrees per pixel along a row) |
//! | 2 | row rotation |
//! | 3 | column rotation |
//! | 4 | pixel height (negative for north-up rasters) |
//! | 5 | anchor longitude |
//! | 6 | anchor latitude |

use radar_common::{OverlayError, OverlayResult};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldFile {
    pub pixel_width: f64,
    pub row_rotation: f64,
    pub column_rotation: f64,
    pub pixel_height: f64,
    pub anchor_lon: f64,
    pub anchor_lat: f64,
}

impl WorldFile {
    /// Build from the six fields in file order.
    pub fn from_fields(fields: [f64; 6]) -> Self {
        let [pixel_width, row_rotation, column_rotation, pixel_height, anchor_lon, anchor_lat] =
            fields;
        Self {
            pixel_width,
            row_rotation,
            column_rotation,
            pixel_height,
            anchor_lon,
            anchor_lat,
        }
    }

    /// The six fields in file order.
    pub fn fields(&self) -> [f64; 6] {
        [
            self.pixel_width,
            self.row_rotation,
            self.column_rotation,
            self.pixel_height,
            self.anchor_lon,
            self.anchor_lat,
        ]
    }

    /// Parse world-file text. Values may be separated by any whitespace;
    /// exactly six finite numbers are required.
    pub fn parse(text: &str) -> OverlayResult<Self> {
        let mut fields = [0.0; 6];
        let mut tokens = text.split_whitespace();

        for (index, slot) in fields.iter_mut().enumerate() {
            let token = tokens.next().ok_or_else(|| {
                OverlayError::InvalidWorldFile(format!("expected 6 values, found {}", index))
            })?;
            let value: f64 = token.parse().map_err(|_| {
                OverlayError::InvalidWorldFile(format!("value {} is not a number: '{}'", index + 1, token))
            })?;
            if !value.is_finite() {
                return Err(OverlayError::InvalidWorldFile(format!(
                    "value {} is not finite: '{}'",
                    index + 1,
                    token
                )));
            }
            *slot = value;
        }

        if tokens.next().is_some() {
            return Err(OverlayError::InvalidWorldFile(
                "more than 6 values".to_string(),
            ));
        }
        Ok(Self::from_fields(fields))
    }
}

impl FromStr for WorldFile {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
