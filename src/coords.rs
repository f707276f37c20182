use crate::error::GeoTagError;
use serde::Serialize;
use std::fmt;

/// One axis of a GPS position as stored in metadata: unsigned
/// degrees/minutes/seconds, before hemisphere sign correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Dms {
    pub fn new(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// `degrees + minutes/60 + seconds/3600`.
    pub fn to_decimal(self) -> f64 {
        self.degrees + self.minutes / 60.0 + self.seconds / 3600.0
    }

    /// Reads a DMS triple out of a raw metadata value. GPS axis tags store
    /// three rationals; anything else is a malformed tag.
    pub(crate) fn from_exif_value(value: &exif::Value) -> Option<Self> {
        match value {
            exif::Value::Rational(parts) if parts.len() >= 3 => Some(Self::new(
                parts[0].to_f64(),
                parts[1].to_f64(),
                parts[2].to_f64(),
            )),
            _ => None,
        }
    }
}

/// A validated geographic position in signed decimal degrees.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180]; both are
/// finite. Construction through [`Coordinates::new`] is the only way to get
/// one, so a `Coordinates` in hand is always usable as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoTagError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoTagError::OutOfRange {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
