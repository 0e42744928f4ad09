//! Pure calculation functions for output dimensions.
//!
//! Everything here is arithmetic on widths and heights — no pixels, no I/O —
//! so it is unit testable in isolation.

use serde::{Deserialize, Serialize};

/// Target size in pixels for the normalized output.
///
/// Height is always pinned to this value (see [`normalize`]); the search
/// budget in [`encode`](crate::encode) is tuned against the file sizes that
/// result.
pub const LONG_EDGE: f64 = 1080.0;

/// Output dimensions after aspect-preserving normalization.
///
/// Fractional widths are real (a 1080×1920 source normalizes to 607.5×1080);
/// the canvas truncates when it allocates pixels, not before.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDimensions {
    pub width: f64,
    pub height: f64,
}

/// Compute normalized output dimensions for a source raster.
///
/// The aspect ratio `max(w,h) / min(w,h)` is rounded to one decimal place.
/// A ratio of exactly 1.0 after rounding (square and near-square sources)
/// yields a [`LONG_EDGE`] square. Everything else keeps `height = LONG_EDGE`
/// and scales width as `w * LONG_EDGE / h`.
///
/// Note the asymmetry: height is pinned to [`LONG_EDGE`] even when width is
/// the longer edge, so landscape sources come out wider than 1080 (a 1920×1080
/// source stays 1920×1080). The byte budget and the learned camera quality are
/// calibrated against these sizes, so the formula must not be "corrected".
///
/// Both dimensions must be non-zero; [`ImageRecord::new`](crate::record::ImageRecord::new)
/// enforces this at the boundary.
pub fn normalize(width: u32, height: u32) -> NormalizedDimensions {
    let (w, h) = (f64::from(width), f64::from(height));
    let ratio = if w > h { w / h } else { h / w };
    let ratio = (ratio * 10.0).round() / 10.0;

    if ratio == 1.0 {
        return NormalizedDimensions {
            width: LONG_EDGE,
            height: LONG_EDGE,
        };
    }
    NormalizedDimensions {
        width: w * LONG_EDGE / h,
        height: LONG_EDGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_source_fills_both_edges() {
        let dims = normalize(100, 100);
        assert_eq!(dims.width, 1080.0);
        assert_eq!(dims.height, 1080.0);
    }

    #[test]
    fn landscape_source_keeps_height_pinned() {
        // 1920x1080: ratio 1.8, height pinned, width = 1920 * 1080 / 1080
        let dims = normalize(1920, 1080);
        assert_eq!(dims.width, 1920.0);
        assert_eq!(dims.height, 1080.0);
    }

    #[test]
    fn portrait_source_scales_width_down() {
        // 1080x1920: ratio 1.8, width = 1080 * 1080 / 1920 = 607.5
        let dims = normalize(1080, 1920);
        assert_eq!(dims.width, 607.5);
        assert_eq!(dims.height, 1080.0);
    }

    #[test]
    fn near_square_rounds_into_square_branch() {
        // 1000x1040: ratio 1.04 rounds to 1.0, so it takes the square path
        let dims = normalize(1000, 1040);
        assert_eq!(dims.width, 1080.0);
        assert_eq!(dims.height, 1080.0);
    }

    #[test]
    fn barely_non_square_misses_square_branch() {
        // 1000x1050: ratio 1.05 rounds to 1.1
        let dims = normalize(1000, 1050);
        assert_eq!(dims.height, 1080.0);
        assert!((dims.width - 1000.0 * 1080.0 / 1050.0).abs() < 1e-9);
    }

    #[test]
    fn extreme_panorama_exceeds_long_edge() {
        // 4000x1000: width = 4000 * 1080 / 1000 = 4320, far beyond 1080
        let dims = normalize(4000, 1000);
        assert_eq!(dims.width, 4320.0);
        assert_eq!(dims.height, 1080.0);
    }

    #[test]
    fn normalize_is_deterministic() {
        assert_eq!(normalize(1080, 1920), normalize(1080, 1920));
    }

    #[test]
    fn dimensions_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&normalize(1080, 1920)).unwrap();
        assert_eq!(json, r#"{"width":607.5,"height":1080.0}"#);
    }
}
