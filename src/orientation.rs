//! EXIF orientation handling: code resolution, transform planning, and
//! coarse portrait/landscape classification.
//!
//! EXIF orientation tags describe how stored pixels must be re-oriented for
//! upright display. The pipeline rotates the drawing surface and compensates
//! with a translation instead of rotating the pixel buffer, so the raster is
//! decoded and resampled exactly once.

use crate::canvas::Canvas;
use crate::dimensions::NormalizedDimensions;
use serde::{Deserialize, Serialize};

/// EXIF orientation, tagged. `None` stands for "no tag present" (code 0);
/// codes 1–8 follow the standard enumeration. Out-of-range codes degrade to
/// `None` rather than silently matching a rotation branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// No orientation tag (code 0).
    None,
    /// Horizontal, normal (code 1).
    Normal,
    /// Mirror horizontal (code 2).
    MirrorHorizontal,
    /// Rotated 180° (code 3).
    Rotate180,
    /// Mirror vertical (code 4).
    MirrorVertical,
    /// Mirror horizontal + rotate 270° CW (code 5).
    Transpose,
    /// Rotated 90° CW (code 6).
    Rotate90,
    /// Mirror horizontal + rotate 90° CW (code 7).
    Transverse,
    /// Rotated 270° CW (code 8).
    Rotate270,
}

impl Orientation {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Normal,
            2 => Self::MirrorHorizontal,
            3 => Self::Rotate180,
            4 => Self::MirrorVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => Self::None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Normal => 1,
            Self::MirrorHorizontal => 2,
            Self::Rotate180 => 3,
            Self::MirrorVertical => 4,
            Self::Transpose => 5,
            Self::Rotate90 => 6,
            Self::Transverse => 7,
            Self::Rotate270 => 8,
        }
    }

    /// Whether the transform plan for this orientation swaps the canvas
    /// width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }
}

/// Resolve the effective orientation, in priority order: explicit override
/// (returned verbatim, even `Some(0)`), then a present non-zero EXIF tag,
/// then "no orientation". Absence of data is expected, not an error.
pub fn resolve(override_code: Option<u8>, exif_tag: Option<u8>) -> Orientation {
    if let Some(code) = override_code {
        return Orientation::from_code(code);
    }
    match exif_tag {
        Some(tag) if tag != 0 => Orientation::from_code(tag),
        _ => Orientation::None,
    }
}

/// Canvas size and transform needed to render a source upright.
///
/// Per-orientation table (`w`/`h` are normalized dimensions):
///
/// | orientation | canvas | rotation | translation |
/// |---|---|---|---|
/// | none / normal / mirror-h | `w`×`h` | 0° | (0, 0) |
/// | rotate-180 / mirror-v | `w`×`h` | 180° | (−w, −h) |
/// | rotate-90 / transverse | `h`×`w` | +90° | (0, −h) |
/// | transpose / rotate-270 | `h`×`w` | −90° | (−w, 0) |
///
/// The mirrored variants share a row with their unmirrored counterpart: the
/// surface is only ever rotated, never flipped, so mirrored sources render
/// mirrored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformPlan {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// One of 0, 180, 90, −90.
    pub rotation_degrees: f64,
    pub translation: (f64, f64),
}

impl TransformPlan {
    pub fn for_orientation(orientation: Orientation, dims: NormalizedDimensions) -> Self {
        use Orientation::*;

        let (swap, rotation): (bool, i32) = match orientation {
            None | Normal | MirrorHorizontal => (false, 0),
            Rotate180 | MirrorVertical => (false, 180),
            Rotate90 | Transverse => (true, 90),
            Transpose | Rotate270 => (true, -90),
        };

        let (canvas_width, canvas_height) = if swap {
            (dims.height, dims.width)
        } else {
            (dims.width, dims.height)
        };

        let translation = match rotation {
            180 => (-canvas_width, -canvas_height),
            90 => (0.0, -canvas_width),
            -90 => (-canvas_height, 0.0),
            _ => (0.0, 0.0),
        };

        Self {
            canvas_width,
            canvas_height,
            rotation_degrees: f64::from(rotation),
            translation,
        }
    }

    /// Apply this plan to a canvas: identity transform, size, then rotation
    /// and compensating translation. Identity plans emit no transform calls
    /// beyond the reset.
    pub fn apply<C: Canvas>(&self, canvas: &mut C) {
        canvas.reset_transform();
        canvas.set_size(self.canvas_width, self.canvas_height);
        if self.rotation_degrees != 0.0 {
            canvas.rotate(self.rotation_degrees.to_radians());
            canvas.translate(self.translation.0, self.translation.1);
        }
    }
}

/// Coarse display orientation of the finished output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Portrait,
    Landscape,
}

/// Portrait/landscape label after orientation correction. Orientations that
/// swap the canvas invert the width-vs-height comparison.
pub fn aspect_for(orientation: Orientation, dims: NormalizedDimensions) -> Aspect {
    let portrait = if orientation.swaps_dimensions() {
        dims.height < dims.width
    } else {
        dims.width < dims.height
    };
    if portrait {
        Aspect::Portrait
    } else {
        Aspect::Landscape
    }
}

/// Portrait/landscape from raw pixel dimensions, ignoring EXIF entirely.
/// A quick hint for callers that need a label before any processing; square
/// sources count as portrait.
pub fn raw_aspect(width: u32, height: u32) -> Aspect {
    if width > height {
        Aspect::Landscape
    } else {
        Aspect::Portrait
    }
}
