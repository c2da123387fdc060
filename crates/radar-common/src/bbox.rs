//! Geographic bounding boxes.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees.
///
/// `x` is longitude and `y` is latitude, so `max_y` is the northern edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse a "minlon,minlat,maxlon,maxlat" string.
    pub fn from_csv(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let mut values = [0.0; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))?;
        }

        let [min_x, min_y, max_x, max_y] = values;
        if min_x > max_x || min_y > max_y {
            return Err(BboxParseError::Inverted(s.to_string()));
        }
        Ok(Self::new(min_x, min_y, max_x, max_y))
    }

    /// Width of the bounding box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether the two boxes share some area. Boxes that only touch along an
    /// edge or a corner do not overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Check if a point is contained within this bbox, edges included.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Check containment with the grid-cell convention: lower edges inclusive,
    /// upper edges exclusive.
    pub fn contains_half_open(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bounding box: {0}. Expected 'minlon,minlat,maxlon,maxlat'")]
    InvalidFormat(String),

    #[error("Invalid number in bounding box: {0}")]
    InvalidNumber(String),

    #[error("Inverted bounding box: {0}")]
    Inverted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_bbox() {
        let bbox = BoundingBox::from_csv("-125.0, 24.0,-66.0,50.0").unwrap();
        assert_eq!(bbox.min_x, -125.0);
        assert_eq!(bbox.min_y, 24.0);
        assert_eq!(bbox.max_x, -66.0);
        assert_eq!(bbox.max_y, 50.0);
    }

    #[test]
    fn test_parse_csv_bbox_errors() {
        assert!(matches!(
            BoundingBox::from_csv("1,2,3"),
            Err(BboxParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            BoundingBox::from_csv("a,2,3,4"),
            Err(BboxParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            BoundingBox::from_csv("10,0,5,5"),
            Err(BboxParseError::Inverted(_))
        ));
    }

    #[test]
    fn test_overlaps_excludes_touching_edges() {
        let cell = BoundingBox::new(0.0, 0.0, 10.0, 10.0);

        assert!(cell.overlaps(&BoundingBox::new(5.0, 5.0, 15.0, 15.0)));
        assert!(cell.overlaps(&BoundingBox::new(2.0, 2.0, 3.0, 3.0)));
        assert!(!cell.overlaps(&BoundingBox::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!cell.overlaps(&BoundingBox::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!cell.overlaps(&BoundingBox::new(20.0, 20.0, 30.0, 30.0)));
    }

    #[test]
    fn test_half_open_containment() {
        let cell = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(cell.contains_half_open(0.0, 0.0));
        assert!(!cell.contains_half_open(1.0, 0.5));
        assert!(!cell.contains_half_open(0.5, 1.0));
        assert!(cell.contains_point(1.0, 1.0));
    }
}
