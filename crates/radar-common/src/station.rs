//! Radar station metadata loaded from fixed-width text tables.
//!
//! The table layout is described by a two-line template:
//!
//! ```text
//! 4||2||6||9||10
//! icao|state|elevation|latitude|longitude
//! ```
//!
//! The first line lists column widths separated by `|`; an empty entry is a
//! single separator column. The second line names each field in order.

use crate::{BoundingBox, OverlayError, OverlayResult};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

/// Column layout of a fixed-width station table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationTemplate {
    fields: Vec<(String, Range<usize>)>,
}

impl StationTemplate {
    /// Parse the two-line template text.
    pub fn parse(text: &str) -> OverlayResult<Self> {
        let mut lines = text.lines();
        let widths_line = lines
            .next()
            .ok_or_else(|| OverlayError::StationTable("template is empty".into()))?;
        let labels_line = lines
            .next()
            .ok_or_else(|| OverlayError::StationTable("template has no label line".into()))?;

        let mut ranges = Vec::new();
        let mut cursor = 0;
        for entry in widths_line.trim_end().split('|') {
            if entry.is_empty() {
                cursor += 1;
                continue;
            }
            let width: usize = entry.trim().parse().map_err(|_| {
                OverlayError::StationTable(format!("invalid column width '{}'", entry))
            })?;
            ranges.push(cursor..cursor + width);
            cursor += width;
        }

        let labels: Vec<&str> = labels_line.trim_end().split('|').collect();
        if labels.len() != ranges.len() {
            return Err(OverlayError::StationTable(format!(
                "{} labels for {} columns",
                labels.len(),
                ranges.len()
            )));
        }

        let fields = labels
            .into_iter()
            .map(|label| label.trim().to_string())
            .zip(ranges)
            .collect();
        Ok(Self { fields })
    }

    /// Field labels in column order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(label, _)| label.as_str())
    }

    /// Slice one record into its trimmed fields. A record shorter than the
    /// template yields empty trailing fields.
    pub fn split_record<'a>(&self, line: &'a str) -> OverlayResult<Vec<&'a str>> {
        self.fields
            .iter()
            .map(|(label, range)| {
                let start = range.start.min(line.len());
                let end = range.end.min(line.len());
                line.get(start..end).map(str::trim).ok_or_else(|| {
                    OverlayError::StationTable(format!("field '{}' splits a character", label))
                })
            })
            .collect()
    }

    fn column(&self, label: &str) -> OverlayResult<usize> {
        self.fields
            .iter()
            .position(|(name, _)| name == label)
            .ok_or_else(|| OverlayError::StationTable(format!("template has no '{}' column", label)))
    }
}

/// A single radar site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarStation {
    pub icao: String,
    pub state: String,
    /// Elevation in feet
    pub elevation: i32,
    pub latitude: f64,
    pub longitude: f64,
}

/// Station records ordered west to east.
#[derive(Debug, Clone, Default)]
pub struct StationTable {
    stations: Vec<RadarStation>,
}

impl StationTable {
    /// Parse records against a template and sort them by longitude.
    pub fn parse(template: &StationTemplate, records: &str) -> OverlayResult<Self> {
        let icao = template.column("icao")?;
        let state = template.column("state")?;
        let elevation = template.column("elevation")?;
        let latitude = template.column("latitude")?;
        let longitude = template.column("longitude")?;

        let mut stations = Vec::new();
        for (number, line) in records.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields = template.split_record(line)?;
            let bad = |label: &str, value: &str| {
                OverlayError::StationTable(format!(
                    "line {}: invalid {} '{}'",
                    number + 1,
                    label,
                    value
                ))
            };

            stations.push(RadarStation {
                icao: fields[icao].to_string(),
                state: fields[state].to_string(),
                elevation: fields[elevation]
                    .parse()
                    .map_err(|_| bad("elevation", fields[elevation]))?,
                latitude: fields[latitude]
                    .parse()
                    .map_err(|_| bad("latitude", fields[latitude]))?,
                longitude: fields[longitude]
                    .parse()
                    .map_err(|_| bad("longitude", fields[longitude]))?,
            });
        }

        stations.sort_by(|a, b| a.longitude.total_cmp(&b.longitude));
        debug!(count = stations.len(), "Loaded radar stations");
        Ok(Self { stations })
    }

    pub fn stations(&self) -> &[RadarStation] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations inside a bounding box, edges included, still west to east.
    pub fn within(&self, bbox: &BoundingBox) -> Vec<&RadarStation> {
        self.stations
            .iter()
            .filter(|s| bbox.contains_point(s.longitude, s.latitude))
            .collect()
    }
}
