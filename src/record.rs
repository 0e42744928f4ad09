//! The image record: one selected or captured photo plus everything needed
//! to press it.
//!
//! An [`ImageRecord`] is immutable after construction. Derived values —
//! resolved orientation, normalized dimensions, provenance, labels — are
//! recomputed on each query; the raster cannot change underneath, so
//! repeated queries always agree.

use crate::canvas::{Canvas, RasterImage};
use crate::dimensions::{self, NormalizedDimensions};
use crate::encode::{self, EncodingResult, QualityCache};
use crate::error::PressError;
use crate::metadata::ExifMetadata;
use crate::orientation::{self, Aspect, Orientation, TransformPlan};
use crate::provenance::Provenance;
use crate::session::{APPLE_VENDOR, DeviceInfo};
use chrono::{DateTime, Utc};

/// A raster image tied to the interaction that produced it.
#[derive(Debug)]
pub struct ImageRecord<I, D> {
    image: I,
    clicked_at: DateTime<Utc>,
    device: D,
    orientation_override: Option<u8>,
    exif: ExifMetadata,
}

impl<I: RasterImage, D: DeviceInfo> ImageRecord<I, D> {
    /// Build a record from a decoded raster, the click/selection timestamp,
    /// the session device provider, an optional orientation override
    /// (bypasses EXIF entirely), and parsed EXIF metadata.
    ///
    /// Rejects zero-sized rasters; everything downstream divides by the
    /// source height.
    pub fn new(
        image: I,
        clicked_at: DateTime<Utc>,
        device: D,
        orientation_override: Option<u8>,
        exif: ExifMetadata,
    ) -> Result<Self, PressError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(PressError::InvalidDimensions { width, height });
        }
        Ok(Self {
            image,
            clicked_at,
            device,
            orientation_override,
            exif,
        })
    }

    pub fn image(&self) -> &I {
        &self.image
    }

    /// Effective orientation: override, else non-zero EXIF tag, else none.
    pub fn orientation(&self) -> Orientation {
        orientation::resolve(self.orientation_override, self.exif.orientation)
    }

    pub fn normalized_dimensions(&self) -> NormalizedDimensions {
        dimensions::normalize(self.image.width(), self.image.height())
    }

    pub fn normalized_width(&self) -> f64 {
        self.normalized_dimensions().width
    }

    pub fn normalized_height(&self) -> f64 {
        self.normalized_dimensions().height
    }

    pub fn transform_plan(&self) -> TransformPlan {
        TransformPlan::for_orientation(self.orientation(), self.normalized_dimensions())
    }

    pub fn provenance(&self) -> Provenance {
        Provenance::classify(self.exif.capture_date, self.clicked_at)
    }

    pub fn is_from_camera(&self) -> bool {
        self.provenance().is_camera()
    }

    pub fn is_from_gallery(&self) -> bool {
        self.provenance().is_gallery()
    }

    pub fn has_exif_date(&self) -> bool {
        self.exif.capture_date.is_some()
    }

    /// Best available timestamp for the photo: the embedded capture time
    /// when present, else the click/selection time. Vendor-independent; the
    /// device is still queryable for callers with their own policies.
    pub fn resolved_date(&self) -> DateTime<Utc> {
        self.exif.capture_date.unwrap_or(self.clicked_at)
    }

    pub fn device_vendor(&self) -> &str {
        self.device.device_vendor()
    }

    pub fn is_apple_device(&self) -> bool {
        self.device.device_vendor() == APPLE_VENDOR
    }

    /// Portrait/landscape after orientation correction.
    pub fn aspect(&self) -> Aspect {
        orientation::aspect_for(self.orientation(), self.normalized_dimensions())
    }

    /// Portrait/landscape from raw pixel dimensions, ignoring EXIF.
    pub fn raw_aspect(&self) -> Aspect {
        orientation::raw_aspect(self.image.width(), self.image.height())
    }

    /// Transform, draw, and quality-search this record into a JPEG data URI
    /// within the byte budget (best-effort; see
    /// [`EncodingResult::met_budget`]).
    pub fn press<C>(&self, canvas: &mut C, cache: &QualityCache) -> Result<EncodingResult, PressError>
    where
        C: Canvas<Source = I>,
    {
        encode::search(
            canvas,
            &self.image,
            &self.transform_plan(),
            self.normalized_dimensions(),
            self.provenance(),
            cache,
        )
    }
}
