//! # imgpress
//!
//! Orientation-aware normalization and budget-driven JPEG compression for
//! captured photos. Given a decoded raster, the interaction timestamp that
//! selected it, and its EXIF metadata, imgpress produces a base64 JPEG data
//! URI whose size is driven toward a fixed byte budget — correcting EXIF
//! orientation on the way and learning a good starting quality from the
//! first camera capture in a session.
//!
//! # Pipeline
//!
//! ```text
//! ImageRecord ──► resolve orientation ──► normalize dimensions
//!        │                                       │
//!        └──► classify provenance        TransformPlan ──► Canvas
//!                     │                                      │
//!                     └────────► quality search ◄────────────┘
//!                                (QualityCache)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`record`] | `ImageRecord` — the immutable aggregate and its derived getters |
//! | [`dimensions`] | Pure dimension math: aspect-preserving scale to the 1080 target |
//! | [`orientation`] | EXIF orientation codes, transform planning, portrait/landscape labels |
//! | [`provenance`] | Camera vs. gallery classification from capture-vs-click timestamps |
//! | [`encode`] | The quality-search loop, byte budget, and session quality cache |
//! | [`canvas`] | The `Canvas`/`RasterImage` collaborator traits |
//! | [`raster`] | Production canvas backed by the `image` crate |
//! | [`metadata`] | Best-effort EXIF extraction (orientation tag + capture datetime) |
//! | [`session`] | Device-vendor provider seam |
//! | [`error`] | `PressError` |
//!
//! # Design Decisions
//!
//! ## Canvas as a trait seam
//!
//! All pixel work — resampling, rotation, JPEG encoding — sits behind the
//! [`Canvas`] trait. The search loop and transform planning are pure logic
//! over that seam, so tests drive them with a recording mock and never
//! encode a pixel. [`RasterCanvas`] is the pure-Rust production
//! implementation; swapping in a GPU- or platform-backed surface touches
//! nothing else.
//!
//! ## Explicit session cache, not a hidden static
//!
//! The learned camera quality is deliberately shared across records — the
//! first camera capture in a session pays for the search, later ones start
//! where it landed. That sharing lives in an explicit [`QualityCache`] the
//! caller constructs and injects, so tests reset it trivially and concurrent
//! callers get defined behavior.
//!
//! ## Soft byte budget
//!
//! The ~400 KB target is best-effort: when quality bottoms out, callers get
//! the smallest attempt plus a `tracing` warning, never an error. An upload
//! that is somewhat too large beats no upload.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use imgpress::{ExifMetadata, ImageRecord, QualityCache, RasterCanvas, StaticDevice};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("photo.jpg")?;
//! let raster = image::load_from_memory(&bytes)?;
//! let exif = ExifMetadata::from_image_bytes(&bytes);
//!
//! let record = ImageRecord::new(raster, Utc::now(), StaticDevice::apple(), None, exif)?;
//! let cache = QualityCache::new();
//! let result = record.press(&mut RasterCanvas::new(), &cache)?;
//!
//! println!(
//!     "{}x{} {:?} {:?}: {} bytes at q{:.2}",
//!     record.normalized_width(),
//!     record.normalized_height(),
//!     record.aspect(),
//!     record.provenance(),
//!     result.byte_size,
//!     result.quality,
//! );
//! # Ok(())
//! # }
//! ```

pub mod canvas;
pub mod dimensions;
pub mod encode;
pub mod error;
pub mod metadata;
pub mod orientation;
pub mod provenance;
pub mod raster;
pub mod record;
pub mod session;

pub use canvas::{Canvas, CanvasError, RasterImage};
pub use dimensions::{LONG_EDGE, NormalizedDimensions, normalize};
pub use encode::{EncodingResult, QualityCache, TARGET_BYTES, implied_byte_size};
pub use error::PressError;
pub use metadata::ExifMetadata;
pub use orientation::{Aspect, Orientation, TransformPlan};
pub use provenance::Provenance;
pub use raster::RasterCanvas;
pub use record::ImageRecord;
pub use session::{APPLE_VENDOR, DeviceInfo, StaticDevice};
