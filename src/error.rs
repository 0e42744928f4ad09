//! Error types for the press pipeline.
//!
//! The original capture flow this crate replaces swallowed every failure
//! mode silently. Two are worth surfacing as hard errors: zero-sized rasters
//! (which would poison the dimension math) and canvas failures (the only
//! fallible collaborator calls). An encode run that exhausts quality without
//! reaching the byte budget is *not* an error — the caller still gets the
//! best-effort output, plus a warning-level log event.

use crate::canvas::CanvasError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PressError {
    /// A source raster with a zero width or height was supplied.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The canvas collaborator failed to draw or encode.
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}
