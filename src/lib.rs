//! # geotag
//!
//! Decodes the GPS geotag embedded in image metadata into signed
//! decimal-degree coordinates, and carries the query and report types for
//! summarizing satellite imagery at the tagged location.
//!
//! Extraction has exactly three outcomes, distinct at the type level:
//! `Ok(Some(tag))` when a position was found, `Ok(None)` when the image
//! carries no GPS data (a normal result for most images, not a failure),
//! and `Err(GeoTagError)` when the metadata cannot be parsed.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use geotag::{geotag_from_path, GeoTagError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), GeoTagError> {
//!     match geotag_from_path(Path::new("photo.jpg"))? {
//!         Some(tag) => {
//!             println!("taken at {}", tag.coordinates);
//!             if let Some(altitude) = tag.altitude {
//!                 println!("at {altitude} m");
//!             }
//!         }
//!         None => println!("no GPS data in this image"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! A found position feeds the imagery seam. The provider wraps whatever
//! remote service computes the statistics; it is constructed once at
//! process start and passed by reference into each request:
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use geotag::analysis::{self, DateRange, ImageryProvider};
//! use geotag::{AnalysisError, GeoTag};
//!
//! fn summarize<P: ImageryProvider>(provider: &P, tag: &GeoTag) -> Result<(), AnalysisError> {
//!     let period = DateRange::new(
//!         NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
//!     )?;
//!     let report = analysis::survey(provider, tag.coordinates, period)?;
//!     println!("NDVI {:.3}: {}", report.ndvi_mean, report.water_quality);
//!     Ok(())
//! }
//! ```

// Public API
mod coords;
mod error;
mod extract;

pub use coords::{Coordinates, Dms};
pub use error::{AnalysisError, GeoTagError};
pub use extract::{geotag_from_bytes, geotag_from_path, GeoTag};

pub mod analysis;

mod utils;
