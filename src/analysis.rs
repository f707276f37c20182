//! The seam toward the satellite-imagery collaborator, and the report
//! logic layered on top of it.
//!
//! The crate does not talk to any imagery service itself. A provider is
//! constructed once at process start, handed around by reference, and asked
//! for per-region band statistics through [`ImageryProvider`]; everything
//! else here is plain data and pure derivation.

use crate::coords::Coordinates;
use crate::error::AnalysisError;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Cloudy-pixel percentage above which a scene is rejected, when the
/// caller does not override it.
pub const DEFAULT_MAX_CLOUD_COVER: f64 = 20.0;

/// An inclusive range of calendar dates to select imagery from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalysisError> {
        if start > end {
            return Err(AnalysisError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// What gets asked of a provider: where, when, and how cloudy a scene may
/// still be.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneQuery {
    pub point: Coordinates,
    pub period: DateRange,
    /// Maximum cloudy-pixel percentage, 0-100.
    pub max_cloud_cover: f64,
}

impl SceneQuery {
    pub fn new(point: Coordinates, period: DateRange) -> Self {
        Self {
            point,
            period,
            max_cloud_cover: DEFAULT_MAX_CLOUD_COVER,
        }
    }

    pub fn with_max_cloud_cover(mut self, percent: f64) -> Self {
        self.max_cloud_cover = percent;
        self
    }
}

/// Per-region statistics a provider computes from one selected scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneStats {
    /// Mean normalized-difference vegetation index over the region.
    pub ndvi_mean: f64,
    /// Mean normalized-difference water index over the region.
    pub ndwi_mean: f64,
    /// Mean reflectance per spectral band, keyed by band name.
    pub band_means: BTreeMap<String, f64>,
    /// Rendered thumbnail of the scene, usable as a map overlay.
    pub overlay_url: Option<String>,
}

/// A satellite-imagery analysis service.
///
/// Implementations wrap whatever remote service computes the statistics.
/// They take `&self` and keep no per-call state, so one provider instance
/// serves any number of concurrent requests.
pub trait ImageryProvider {
    fn scene_stats(&self, query: &SceneQuery) -> Result<SceneStats, AnalysisError>;
}

/// Water-quality bucket derived from a mean NDWI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WaterQuality {
    Good,
    Moderate,
    Poor,
}

impl WaterQuality {
    /// Buckets: below 0.2 is good, below 0.5 moderate, the rest poor.
    pub fn from_ndwi(ndwi_mean: f64) -> Self {
        if ndwi_mean < 0.2 {
            WaterQuality::Good
        } else if ndwi_mean < 0.5 {
            WaterQuality::Moderate
        } else {
            WaterQuality::Poor
        }
    }
}

impl fmt::Display for WaterQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WaterQuality::Good => "Water quality is good.",
            WaterQuality::Moderate => "Water quality is moderate.",
            WaterQuality::Poor => "Water quality is poor. Action may be needed.",
        })
    }
}

/// Everything the rendering layer needs about one surveyed location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteReport {
    pub coordinates: Coordinates,
    pub ndvi_mean: f64,
    pub ndwi_mean: f64,
    pub band_means: BTreeMap<String, f64>,
    pub water_quality: WaterQuality,
    pub overlay_url: Option<String>,
}

/// Asks `provider` for the scene statistics at `coordinates` over `period`
/// and derives the water-quality bucket.
pub fn survey<P: ImageryProvider>(
    provider: &P,
    coordinates: Coordinates,
    period: DateRange,
) -> Result<SiteReport, AnalysisError> {
    let query = SceneQuery::new(coordinates, period);
    debug!("surveying {coordinates} over {period}");
    let stats = provider.scene_stats(&query)?;
    Ok(SiteReport {
        coordinates,
        water_quality: WaterQuality::from_ndwi(stats.ndwi_mean),
        ndvi_mean: stats.ndvi_mean,
        ndwi_mean: stats.ndwi_mean,
        band_means: stats.band_means,
        overlay_url: stats.overlay_url,
    })
}
