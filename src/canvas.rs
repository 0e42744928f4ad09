//! Drawing surface trait and source image trait.
//!
//! The [`Canvas`] trait is the seam between the press pipeline (which decides
//! sizes, transforms, and qualities) and the pixel work (resampling, rotation,
//! JPEG encoding). The production implementation is
//! [`RasterCanvas`](crate::raster::RasterCanvas); tests use a recording mock
//! so pipeline logic can be exercised without encoding a single pixel.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("draw failed: {0}")]
    DrawFailed(String),
    #[error("encode failed: {0}")]
    EncodeFailed(String),
}

/// A decoded source raster: the only things the pipeline ever asks of it
/// directly are its pixel dimensions. Drawing is delegated to the canvas,
/// which knows the concrete pixel type.
pub trait RasterImage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

impl RasterImage for image::DynamicImage {
    fn width(&self) -> u32 {
        image::GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        image::GenericImageView::height(self)
    }
}

/// A 2D drawing surface with a mutable transform, mirroring the primitives
/// the press pipeline needs: reset, resize, quarter-turn rotate, translate,
/// one scaled draw, and repeated JPEG encodes at varying quality.
///
/// Sizes are `f64` because normalized dimensions are fractional; concrete
/// canvases truncate to whole pixels when they allocate.
pub trait Canvas {
    /// Source image type this canvas can draw.
    type Source: RasterImage;

    /// Reset the transform to identity.
    fn reset_transform(&mut self);

    /// Set the pixel dimensions of the surface. Clears any drawn content.
    fn set_size(&mut self, width: f64, height: f64);

    /// Rotate the transform by `radians` (positive = clockwise, matching
    /// screen coordinates with y pointing down).
    fn rotate(&mut self, radians: f64);

    /// Translate the transform by `(dx, dy)`.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Draw `source` scaled to `width`×`height` at `(x, y)` under the current
    /// transform.
    fn draw_image(
        &mut self,
        source: &Self::Source,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), CanvasError>;

    /// Encode the current surface content as a JPEG data URI
    /// (`data:image/jpeg;base64,…`). `quality` is in `0.0..=1.0`.
    fn encode_jpeg(&mut self, quality: f64) -> Result<String, CanvasError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::encode::DATA_URI_HEADER;

    /// Fixed-size stand-in for a decoded raster.
    #[derive(Debug, Clone, Copy)]
    pub struct MockImage {
        pub width: u32,
        pub height: u32,
    }

    impl MockImage {
        pub fn new(width: u32, height: u32) -> Self {
            Self { width, height }
        }
    }

    impl RasterImage for MockImage {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        ResetTransform,
        SetSize { width: f64, height: f64 },
        Rotate { radians: f64 },
        Translate { dx: f64, dy: f64 },
        DrawImage { width: f64, height: f64 },
        EncodeJpeg { quality: f64 },
    }

    /// Mock canvas that records operations and fakes encode output sizes.
    ///
    /// The synthetic size model is linear in quality:
    /// `implied bytes = floor_bytes + base_bytes * quality`. A non-zero floor
    /// models content that no quality level can squeeze under the budget.
    pub struct MockCanvas {
        pub ops: Vec<RecordedOp>,
        base_bytes: f64,
        floor_bytes: f64,
    }

    impl MockCanvas {
        pub fn new(base_bytes: f64) -> Self {
            Self {
                ops: Vec::new(),
                base_bytes,
                floor_bytes: 0.0,
            }
        }

        pub fn with_floor(base_bytes: f64, floor_bytes: f64) -> Self {
            Self {
                ops: Vec::new(),
                base_bytes,
                floor_bytes,
            }
        }

        pub fn encode_count(&self) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, RecordedOp::EncodeJpeg { .. }))
                .count()
        }

        pub fn encoded_qualities(&self) -> Vec<f64> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    RecordedOp::EncodeJpeg { quality } => Some(*quality),
                    _ => None,
                })
                .collect()
        }
    }

    impl Canvas for MockCanvas {
        type Source = MockImage;

        fn reset_transform(&mut self) {
            self.ops.push(RecordedOp::ResetTransform);
        }

        fn set_size(&mut self, width: f64, height: f64) {
            self.ops.push(RecordedOp::SetSize { width, height });
        }

        fn rotate(&mut self, radians: f64) {
            self.ops.push(RecordedOp::Rotate { radians });
        }

        fn translate(&mut self, dx: f64, dy: f64) {
            self.ops.push(RecordedOp::Translate { dx, dy });
        }

        fn draw_image(
            &mut self,
            _source: &MockImage,
            _x: f64,
            _y: f64,
            width: f64,
            height: f64,
        ) -> Result<(), CanvasError> {
            self.ops.push(RecordedOp::DrawImage { width, height });
            Ok(())
        }

        fn encode_jpeg(&mut self, quality: f64) -> Result<String, CanvasError> {
            self.ops.push(RecordedOp::EncodeJpeg { quality });
            let bytes = self.floor_bytes + self.base_bytes * quality.max(0.0);
            // Payload length chosen so the 0.75 base64-to-byte ratio recovers
            // the modeled size.
            let payload_len = (bytes / 0.75).round() as usize;
            let mut uri = String::with_capacity(DATA_URI_HEADER.len() + payload_len);
            uri.push_str(DATA_URI_HEADER);
            uri.extend(std::iter::repeat_n('A', payload_len));
            Ok(uri)
        }
    }

    #[test]
    fn mock_size_model_round_trips_through_implied_bytes() {
        let mut canvas = MockCanvas::new(800_000.0);
        let uri = canvas.encode_jpeg(0.5).unwrap();
        assert_eq!(crate::encode::implied_byte_size(&uri), 400_000.0);
    }

    #[test]
    fn mock_records_transform_ops_in_order() {
        let mut canvas = MockCanvas::new(100.0);
        canvas.reset_transform();
        canvas.set_size(1080.0, 1920.0);
        canvas.rotate(std::f64::consts::FRAC_PI_2);
        canvas.translate(0.0, -1080.0);
        assert_eq!(
            canvas.ops,
            vec![
                RecordedOp::ResetTransform,
                RecordedOp::SetSize {
                    width: 1080.0,
                    height: 1920.0
                },
                RecordedOp::Rotate {
                    radians: std::f64::consts::FRAC_PI_2
                },
                RecordedOp::Translate {
                    dx: 0.0,
                    dy: -1080.0
                },
            ]
        );
    }
}
