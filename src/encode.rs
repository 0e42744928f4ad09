//! Budget-driven quality search.
//!
//! The encoder re-encodes the drawn canvas at decreasing JPEG quality until
//! the implied byte size of the data URI is at or below [`TARGET_BYTES`],
//! stepping down by 0.04 per round with a one-shot jump to 0.6 for grossly
//! oversized first attempts. The budget is soft: when quality bottoms out
//! the oversized result is still returned, with a warning-level log event.
//!
//! Camera-provenance images additionally consult a [`QualityCache`]: the
//! first camera image that completes a search seeds it, and every later
//! camera image starts from the learned value instead of 1.0, amortizing the
//! search across a batch of similar captures in one session.

use crate::canvas::Canvas;
use crate::dimensions::NormalizedDimensions;
use crate::error::PressError;
use crate::orientation::TransformPlan;
use crate::provenance::Provenance;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Soft output size budget in bytes.
///
/// Derived from a base64 payload budget: 4 base64 characters carry 3 bytes,
/// so `bytes = (uri length − header length) × 0.75`.
pub const TARGET_BYTES: f64 = 409_430.4;

/// Prefix every encoded output carries; excluded from the byte count.
pub const DATA_URI_HEADER: &str = "data:image/jpeg;base64,";

/// Per-round quality decrement.
const QUALITY_STEP: f64 = 0.04;

/// First-round oversize ratio beyond which quality jumps straight to
/// [`OVERSIZE_JUMP_QUALITY`] instead of stepping.
const OVERSIZE_JUMP_RATIO: f64 = 10.0;
const OVERSIZE_JUMP_QUALITY: f64 = 0.6;

/// Byte size implied by a data URI's length (base64 payload × 3/4, rounded).
pub fn implied_byte_size(uri: &str) -> f64 {
    (uri.len().saturating_sub(DATA_URI_HEADER.len()) as f64 * 0.75).round()
}

/// Session-scoped learned starting quality for camera images.
///
/// Injected by the caller and shared across every record pressed against it.
/// Written at most once (the first completed camera search), read by every
/// later camera search, never touched by gallery searches. Once set the value
/// is a starting hint only; it is not re-validated against the budget.
///
/// The mutex makes concurrent callers safe; under races, whichever camera
/// search completes first seeds the cache, and any completed search is an
/// acceptable seed.
#[derive(Debug, Default)]
pub struct QualityCache {
    learned: Mutex<Option<f64>>,
}

impl QualityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<f64> {
        *self.lock()
    }

    /// Store `quality` only if nothing has been learned yet.
    pub fn seed_if_unset(&self, quality: f64) {
        let mut learned = self.lock();
        if learned.is_none() {
            *learned = Some(quality);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<f64>> {
        // A panic while holding the lock cannot leave Option<f64> in a bad
        // state, so a poisoned lock is still usable.
        self.learned.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Outcome of a quality search: the encoded data URI, its implied byte size,
/// and the quality that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingResult {
    pub data_uri: String,
    pub byte_size: f64,
    pub quality: f64,
}

impl EncodingResult {
    /// Whether the search got the output under [`TARGET_BYTES`]. `false`
    /// means quality was exhausted and the result is best-effort.
    pub fn met_budget(&self) -> bool {
        self.byte_size <= TARGET_BYTES
    }
}

/// Draw `source` through `plan` and search for the highest quality that fits
/// the byte budget.
///
/// Starting quality is 1.0, or the learned cache value for camera images.
/// Each round either steps quality down by 0.04 (floored at exactly 0) or,
/// on the first round of a >10× oversized encode, jumps straight to 0.6.
/// After the search, a first camera image seeds the cache with the final
/// quality — or, when quality bottomed out, with the last step above zero,
/// so the cache never holds an unusable hint.
pub fn search<C: Canvas>(
    canvas: &mut C,
    source: &C::Source,
    plan: &TransformPlan,
    dims: NormalizedDimensions,
    provenance: Provenance,
    cache: &QualityCache,
) -> Result<EncodingResult, PressError> {
    plan.apply(canvas);
    canvas.draw_image(source, 0.0, 0.0, dims.width, dims.height)?;

    let mut quality = 1.0;
    if provenance.is_camera()
        && let Some(learned) = cache.get()
    {
        quality = learned;
    }

    let mut uri = canvas.encode_jpeg(quality)?;
    let mut size = implied_byte_size(&uri);
    debug!(quality, size, "initial encode");

    let mut first_round = true;
    while size > TARGET_BYTES && quality > 0.0 {
        if first_round && size / TARGET_BYTES > OVERSIZE_JUMP_RATIO {
            quality = OVERSIZE_JUMP_QUALITY;
        } else {
            quality = (quality - QUALITY_STEP).max(0.0);
        }
        first_round = false;

        uri = canvas.encode_jpeg(quality)?;
        size = implied_byte_size(&uri);
        debug!(quality, size, "re-encoded");
    }

    if size > TARGET_BYTES {
        warn!(
            size,
            target = TARGET_BYTES,
            "quality exhausted before size budget was met; returning best effort"
        );
    }

    if provenance.is_camera() {
        let learned = if quality > 0.0 {
            quality
        } else {
            quality + QUALITY_STEP
        };
        cache.seed_if_unset(learned);
    }

    Ok(EncodingResult {
        data_uri: uri,
        byte_size: size,
        quality,
    })
}
