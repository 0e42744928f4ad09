//! EXIF metadata extraction: orientation tag and capture timestamp.
//!
//! The press pipeline consumes already-parsed values, so this adapter is the
//! only place that touches raw EXIF. Extraction is best-effort throughout:
//! missing containers, unreadable IFDs, and malformed datetime strings all
//! degrade to an empty [`ExifMetadata`] — absence of metadata is an expected
//! state, not an error (gallery screenshots and PNG captures carry none).

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use exif::{In, Reader, Tag, Value};
use std::io::Cursor;

/// Parsed EXIF fields the pipeline cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExifMetadata {
    /// Orientation tag value (1–8) if present.
    pub orientation: Option<u8>,
    /// Capture timestamp, from `DateTimeOriginal` with a fallback to
    /// `DateTime`. Stored as UTC; EXIF datetimes carry no zone, so the wall
    /// time is taken as-is.
    pub capture_date: Option<DateTime<Utc>>,
}

impl ExifMetadata {
    /// Construct with explicit values, for callers that parsed EXIF upstream.
    pub fn new(orientation: Option<u8>, capture_date: Option<DateTime<Utc>>) -> Self {
        Self {
            orientation,
            capture_date,
        }
    }

    /// Extract from an image container (JPEG, TIFF, HEIF, PNG with eXIf).
    pub fn from_image_bytes(bytes: &[u8]) -> Self {
        let mut cursor = Cursor::new(bytes);
        match Reader::new().read_from_container(&mut cursor) {
            Ok(exif) => Self::from_exif(&exif),
            Err(_) => Self::default(),
        }
    }

    /// Extract from a raw EXIF block (a TIFF structure without the container
    /// framing), for callers that already stripped the `Exif\0\0` header.
    pub fn from_raw_exif(buf: Vec<u8>) -> Self {
        match Reader::new().read_raw(buf) {
            Ok(exif) => Self::from_exif(&exif),
            Err(_) => Self::default(),
        }
    }

    fn from_exif(exif: &exif::Exif) -> Self {
        let orientation = exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .and_then(|value| u8::try_from(value).ok());

        let capture_date = [Tag::DateTimeOriginal, Tag::DateTime]
            .into_iter()
            .find_map(|tag| parse_datetime(&exif.get_field(tag, In::PRIMARY)?.value));

        Self {
            orientation,
            capture_date,
        }
    }
}

/// Parse an EXIF ASCII datetime ("YYYY:MM:DD HH:MM:SS") into a UTC timestamp.
fn parse_datetime(value: &Value) -> Option<DateTime<Utc>> {
    let ascii = match value {
        Value::Ascii(lines) => lines.first()?,
        _ => return None,
    };
    let dt = exif::DateTime::from_ascii(ascii).ok()?;
    let naive = NaiveDate::from_ymd_opt(i32::from(dt.year), u32::from(dt.month), u32::from(dt.day))?
        .and_hms_opt(
            u32::from(dt.hour),
            u32::from(dt.minute),
            u32::from(dt.second),
        )?;
    Some(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal little-endian TIFF: IFD0 with Orientation = 6 and
    /// DateTime = "2023:08:15 10:30:00".
    fn raw_exif_blob() -> Vec<u8> {
        let mut buf = Vec::new();
        // Header: "II", magic 42, IFD0 at offset 8.
        buf.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00]);
        // IFD0: two entries.
        buf.extend_from_slice(&[0x02, 0x00]);
        // Orientation (0x0112), SHORT, count 1, value 6.
        buf.extend_from_slice(&[0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00]);
        buf.extend_from_slice(&[0x06, 0x00, 0x00, 0x00]);
        // DateTime (0x0132), ASCII, count 20, data at offset 38.
        buf.extend_from_slice(&[0x32, 0x01, 0x02, 0x00, 0x14, 0x00, 0x00, 0x00]);
        buf.extend_from_slice(&[0x26, 0x00, 0x00, 0x00]);
        // No next IFD.
        buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        // Datetime string at offset 38.
        buf.extend_from_slice(b"2023:08:15 10:30:00\0");
        buf
    }

    #[test]
    fn extracts_orientation_and_datetime_from_raw_exif() {
        let meta = ExifMetadata::from_raw_exif(raw_exif_blob());
        assert_eq!(meta.orientation, Some(6));
        assert_eq!(
            meta.capture_date,
            Some(Utc.with_ymd_and_hms(2023, 8, 15, 10, 30, 0).unwrap())
        );
    }

    #[test]
    fn garbage_bytes_degrade_to_empty_metadata() {
        assert_eq!(
            ExifMetadata::from_image_bytes(b"definitely not an image"),
            ExifMetadata::default()
        );
        assert_eq!(
            ExifMetadata::from_raw_exif(vec![0xDE, 0xAD, 0xBE, 0xEF]),
            ExifMetadata::default()
        );
    }

    #[test]
    fn exif_free_jpeg_degrades_to_empty_metadata() {
        // A bare JPEG with no APP1 segment parses to nothing.
        let mut canvas = crate::raster::RasterCanvas::new();
        use crate::canvas::Canvas;
        canvas.set_size(8.0, 8.0);
        let uri = canvas.encode_jpeg(0.9).unwrap();
        let payload = uri.strip_prefix(crate::encode::DATA_URI_HEADER).unwrap();
        use base64::Engine as _;
        let jpeg = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        assert_eq!(
            ExifMetadata::from_image_bytes(&jpeg),
            ExifMetadata::default()
        );
    }

    #[test]
    fn malformed_datetime_is_dropped_but_orientation_kept() {
        let mut blob = raw_exif_blob();
        let len = blob.len();
        blob[len - 20..].copy_from_slice(b"not a datetime 1234\0");
        let meta = ExifMetadata::from_raw_exif(blob);
        assert_eq!(meta.orientation, Some(6));
        assert_eq!(meta.capture_date, None);
    }
}
