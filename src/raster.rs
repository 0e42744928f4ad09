//! Production canvas — pure Rust, statically linked.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Resample | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Quarter-turn rotation | `image::imageops::{rotate90, rotate180, rotate270}` |
//! | Composite | `image::imageops::overlay` |
//! | Encode | `image::codecs::jpeg::JpegEncoder` |
//! | Data URI | `base64` standard alphabet |
//!
//! The transform state supports exactly what [`TransformPlan`] emits:
//! quarter-turn rotations with their compensating translations. The rotation
//! accumulates in quarter turns; the translation is recorded so that a plan's
//! rotate+translate pair places the drawn raster at the canvas origin, which
//! is where the quarter-turn image ops put it. Arbitrary angles are rejected
//! at the `rotate` call.
//!
//! [`TransformPlan`]: crate::orientation::TransformPlan

use crate::canvas::{Canvas, CanvasError};
use crate::encode::DATA_URI_HEADER;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage, imageops};
use std::f64::consts::FRAC_PI_2;
use tracing::debug;

/// In-memory 2D surface backed by an RGB pixel buffer.
#[derive(Debug, Default)]
pub struct RasterCanvas {
    width: u32,
    height: u32,
    /// Accumulated clockwise quarter turns, 0..=3.
    quarter_turns: u8,
    translation: (f64, f64),
    frame: Option<RgbImage>,
}

impl RasterCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn blank_frame(&self) -> RgbImage {
        RgbImage::new(self.width, self.height)
    }
}

impl Canvas for RasterCanvas {
    type Source = DynamicImage;

    fn reset_transform(&mut self) {
        self.quarter_turns = 0;
        self.translation = (0.0, 0.0);
    }

    fn set_size(&mut self, width: f64, height: f64) {
        // Whole-pixel surface; fractional sizes truncate.
        self.width = width as u32;
        self.height = height as u32;
        // Resizing clears drawn content.
        self.frame = None;
    }

    fn rotate(&mut self, radians: f64) {
        let quarters = radians / FRAC_PI_2;
        // Plans only ever rotate by multiples of 90 degrees.
        debug_assert!((quarters - quarters.round()).abs() < 1e-9);
        self.quarter_turns = (self.quarter_turns as i64 + quarters.round() as i64)
            .rem_euclid(4) as u8;
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.translation.0 += dx;
        self.translation.1 += dy;
    }

    fn draw_image(
        &mut self,
        source: &DynamicImage,
        _x: f64,
        _y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), CanvasError> {
        if self.width == 0 || self.height == 0 {
            return Err(CanvasError::DrawFailed(
                "canvas has zero-sized surface".into(),
            ));
        }
        let draw_w = width.round().max(1.0) as u32;
        let draw_h = height.round().max(1.0) as u32;

        let resized = source
            .resize_exact(draw_w, draw_h, FilterType::Lanczos3)
            .to_rgb8();
        let oriented = match self.quarter_turns {
            1 => imageops::rotate90(&resized),
            2 => imageops::rotate180(&resized),
            3 => imageops::rotate270(&resized),
            _ => resized,
        };

        // The compensating translation in the plan lands the rotated raster
        // at the origin; composite there, clipping anything that overhangs.
        let mut frame = self.blank_frame();
        imageops::overlay(&mut frame, &oriented, 0, 0);
        debug!(
            canvas_w = self.width,
            canvas_h = self.height,
            drawn_w = oriented.width(),
            drawn_h = oriented.height(),
            turns = self.quarter_turns,
            "drew source"
        );
        self.frame = Some(frame);
        Ok(())
    }

    fn encode_jpeg(&mut self, quality: f64) -> Result<String, CanvasError> {
        if self.width == 0 || self.height == 0 {
            return Err(CanvasError::EncodeFailed(
                "canvas has zero-sized surface".into(),
            ));
        }
        // JPEG quality floor is 1; a requested 0.0 still emits something.
        let q = ((quality.clamp(0.0, 1.0) * 100.0).round() as u8).max(1);

        let blank;
        let frame = match &self.frame {
            Some(frame) => frame,
            None => {
                blank = self.blank_frame();
                &blank
            }
        };

        let mut buf = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buf, q);
        frame
            .write_with_encoder(encoder)
            .map_err(|e| CanvasError::EncodeFailed(e.to_string()))?;

        Ok(format!("{DATA_URI_HEADER}{}", STANDARD.encode(&buf)))
    }
}
