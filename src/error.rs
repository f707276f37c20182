use crate::analysis::DateRange;
use crate::coords::Coordinates;
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Failure decoding a geotag from an image.
///
/// An image that simply carries no GPS position is *not* an error; the
/// extraction functions report that as `Ok(None)`.
#[derive(Debug, Error)]
pub enum GeoTagError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse metadata from {source_id}: {source}")]
    Metadata {
        source_id: String,
        #[source]
        source: exif::Error,
    },

    #[error("malformed {tag} value in {source_id}")]
    MalformedTag { source_id: String, tag: exif::Tag },

    #[error("coordinates out of range: ({latitude}, {longitude})")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// Failure querying the imagery collaborator or building a site report.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid period: {start} is after {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("no scene under the cloud-cover cap at {point} in {period}")]
    NoScene { point: Coordinates, period: DateRange },

    #[error("imagery service failure: {message}")]
    Service { message: String },
}
