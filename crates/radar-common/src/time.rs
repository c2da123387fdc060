//! Time handling for the 5-minute radar composite archive.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Interval between published composites, in seconds.
const COMPOSITE_INTERVAL_SECS: i64 = 300;

/// Default archive root for the composite reflectivity product.
pub const DEFAULT_ARCHIVE_BASE_URL: &str = "https://mesonet.agron.iastate.edu/archive/data/";

/// Round a time to the nearest multiple of five minutes.
///
/// Seconds and sub-second parts count towards the offset; an offset of
/// exactly 2m30s rounds up. The result carries zero seconds and nanoseconds.
pub fn round_to_five_minutes(time: DateTime<Utc>) -> DateTime<Utc> {
    let remainder = time.timestamp().rem_euclid(COMPOSITE_INTERVAL_SECS);
    let offset_nanos = remainder * 1_000_000_000 + time.timestamp_subsec_nanos() as i64;
    let truncated = time - Duration::nanoseconds(offset_nanos);

    if offset_nanos >= COMPOSITE_INTERVAL_SECS * 1_000_000_000 / 2 {
        truncated + Duration::seconds(COMPOSITE_INTERVAL_SECS)
    } else {
        truncated
    }
}

/// Naming scheme of the archived composite images and their world files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarArchive {
    pub base_url: String,
}

impl Default for RadarArchive {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ARCHIVE_BASE_URL.to_string(),
        }
    }
}

impl RadarArchive {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    /// File name without extension, e.g. `n0q_201603231230`.
    pub fn file_stem(&self, time: DateTime<Utc>) -> String {
        format!("n0q_{}", round_to_five_minutes(time).format("%Y%m%d%H%M"))
    }

    /// URL of the directory holding the composites for the time's day.
    pub fn directory_url(&self, time: DateTime<Utc>) -> String {
        format!(
            "{}{}/GIS/uscomp/",
            self.base_url,
            round_to_five_minutes(time).format("%Y/%m/%d")
        )
    }

    /// URL of the composite image.
    pub fn png_url(&self, time: DateTime<Utc>) -> String {
        format!("{}{}.png", self.directory_url(time), self.file_stem(time))
    }

    /// URL of the world file paired with the composite image.
    pub fn world_file_url(&self, time: DateTime<Utc>) -> String {
        format!("{}{}.wld", self.directory_url(time), self.file_stem(time))
    }
}
