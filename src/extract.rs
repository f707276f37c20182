use crate::coords::{Coordinates, Dms};
use crate::error::GeoTagError;
use chrono::{NaiveDate, NaiveDateTime};
use exif::{Context, Field, In, Reader, Tag, Value};
use log::debug;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::Path;

/// A decoded geotag: where the image was taken and, when the metadata
/// carries them, how high and when.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoTag {
    pub coordinates: Coordinates,
    /// Meters relative to sea level; negative is below.
    pub altitude: Option<f64>,
    /// GPS receiver date/time stamp.
    pub timestamp: Option<NaiveDateTime>,
}

/// Decodes the geotag embedded in an in-memory image.
///
/// `source_id` names the input in errors and logs; pass the file name, an
/// upload id, whatever identifies the bytes to a human.
///
/// The three outcomes are distinct: `Ok(Some(tag))` when a GPS position is
/// present, `Ok(None)` when the image carries none (a normal result, not a
/// failure), `Err` when the metadata cannot be parsed at all.
///
/// # Example
/// ```no_run
/// # use geotag::{geotag_from_bytes, GeoTagError};
/// # fn main() -> Result<(), GeoTagError> {
/// let upload = std::fs::read("photo.jpg").unwrap();
/// match geotag_from_bytes(&upload, "photo.jpg")? {
///     Some(tag) => println!("taken at {}", tag.coordinates),
///     None => println!("no GPS data"),
/// }
/// # Ok(())
/// # }
/// ```
pub fn geotag_from_bytes(bytes: &[u8], source_id: &str) -> Result<Option<GeoTag>, GeoTagError> {
    read_geotag(&mut Cursor::new(bytes), source_id)
}

/// Decodes the geotag embedded in an image file.
///
/// Same outcomes as [`geotag_from_bytes`]; the path doubles as the source
/// identifier carried by errors.
pub fn geotag_from_path(path: &Path) -> Result<Option<GeoTag>, GeoTagError> {
    let file = File::open(path).map_err(|source| GeoTagError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_geotag(&mut BufReader::new(file), &path.display().to_string())
}

fn read_geotag<R>(reader: &mut R, source_id: &str) -> Result<Option<GeoTag>, GeoTagError>
where
    R: BufRead + Seek,
{
    let exif = match Reader::new().read_from_container(reader) {
        Ok(exif) => exif,
        // A container with no metadata block is an image that was never
        // tagged: the same normal outcome as one tagged without a position.
        Err(exif::Error::NotFound(_)) => {
            debug!("{source_id}: no metadata block");
            return Ok(None);
        }
        Err(source) => {
            return Err(GeoTagError::Metadata {
                source_id: source_id.to_string(),
                source,
            })
        }
    };

    let gps = GpsTagSet::collect(&exif);
    let (latitude, longitude) = match (gps.latitude, gps.longitude) {
        (Some(latitude), Some(longitude)) => (latitude, longitude),
        _ => {
            debug!("{source_id}: metadata carries no GPS position");
            return Ok(None);
        }
    };

    let latitude = decimal_axis(latitude, gps.latitude_ref, b'S', source_id)?;
    let longitude = decimal_axis(longitude, gps.longitude_ref, b'W', source_id)?;
    let coordinates = Coordinates::new(latitude, longitude)?;

    Ok(Some(GeoTag {
        coordinates,
        altitude: gps.altitude(),
        timestamp: gps.timestamp(),
    }))
}

/// The GPS-namespace fields of the primary image, pulled out of the full
/// tag listing in one pass.
#[derive(Default)]
struct GpsTagSet<'a> {
    latitude: Option<&'a Field>,
    latitude_ref: Option<&'a Field>,
    longitude: Option<&'a Field>,
    longitude_ref: Option<&'a Field>,
    altitude: Option<&'a Field>,
    altitude_ref: Option<&'a Field>,
    date_stamp: Option<&'a Field>,
    time_stamp: Option<&'a Field>,
}

impl<'a> GpsTagSet<'a> {
    fn collect(exif: &'a exif::Exif) -> Self {
        let mut set = Self::default();
        let gps_fields = exif
            .fields()
            .filter(|field| field.ifd_num == In::PRIMARY && field.tag.context() == Context::Gps);
        for field in gps_fields {
            if field.tag == Tag::GPSLatitude {
                set.latitude = Some(field);
            } else if field.tag == Tag::GPSLatitudeRef {
                set.latitude_ref = Some(field);
            } else if field.tag == Tag::GPSLongitude {
                set.longitude = Some(field);
            } else if field.tag == Tag::GPSLongitudeRef {
                set.longitude_ref = Some(field);
            } else if field.tag == Tag::GPSAltitude {
                set.altitude = Some(field);
            } else if field.tag == Tag::GPSAltitudeRef {
                set.altitude_ref = Some(field);
            } else if field.tag == Tag::GPSDateStamp {
                set.date_stamp = Some(field);
            } else if field.tag == Tag::GPSTimeStamp {
                set.time_stamp = Some(field);
            }
        }
        set
    }

    /// Altitude in meters, negated when the reference marks below sea
    /// level. A missing or malformed altitude is simply no altitude; it
    /// never fails the extraction.
    fn altitude(&self) -> Option<f64> {
        let meters = match self.altitude.map(|field| &field.value) {
            Some(Value::Rational(parts)) => parts.first()?.to_f64(),
            _ => return None,
        };
        if !meters.is_finite() {
            return None;
        }
        let below_sea_level = matches!(
            self.altitude_ref.map(|field| &field.value),
            Some(Value::Byte(reference)) if reference.first() == Some(&1)
        );
        Some(if below_sea_level { -meters } else { meters })
    }

    /// GPS date stamp combined with the time stamp, when both parse. The
    /// time stamp alone is useless without a date and is ignored then.
    fn timestamp(&self) -> Option<NaiveDateTime> {
        let date = match self.date_stamp.map(|field| &field.value) {
            Some(Value::Ascii(text)) => {
                let raw = std::str::from_utf8(text.first()?).ok()?;
                NaiveDate::parse_from_str(raw.trim(), "%Y:%m:%d").ok()?
            }
            _ => return None,
        };
        let (hour, minute, second) = match self.time_stamp.map(|field| &field.value) {
            Some(Value::Rational(parts)) if parts.len() >= 3 => (
                parts[0].to_f64() as u32,
                parts[1].to_f64() as u32,
                parts[2].to_f64() as u32,
            ),
            _ => (0, 0, 0),
        };
        date.and_hms_opt(hour, minute, second)
    }
}

fn decimal_axis(
    axis: &Field,
    reference: Option<&Field>,
    negative_marker: u8,
    source_id: &str,
) -> Result<f64, GeoTagError> {
    let dms = Dms::from_exif_value(&axis.value).ok_or_else(|| GeoTagError::MalformedTag {
        source_id: source_id.to_string(),
        tag: axis.tag,
    })?;
    let decimal = dms.to_decimal();
    // A missing reference tag reads as the positive hemisphere (N/E).
    if reference_contains(reference, negative_marker) {
        Ok(-decimal)
    } else {
        Ok(decimal)
    }
}

fn reference_contains(reference: Option<&Field>, marker: u8) -> bool {
    match reference.map(|field| &field.value) {
        Some(Value::Ascii(text)) => text.iter().any(|chunk| chunk.contains(&marker)),
        _ => false,
    }
}
