//! Camera vs. gallery provenance classification.
//!
//! Freshly captured photos and pre-existing gallery assets compress
//! differently, so the encoder picks its starting quality per provenance
//! (see [`encode`](crate::encode)). The signal is the embedded capture
//! timestamp: a photo whose capture time postdates the UI selection time
//! cannot have been taken by that interaction, so it came from storage.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Freshly captured by a live camera, or no capture timestamp at all.
    Camera,
    /// Selected from pre-existing storage.
    Gallery,
}

impl Provenance {
    /// Gallery iff a capture timestamp exists and is *strictly* later than
    /// the click/selection timestamp. Equal timestamps and absent capture
    /// dates both classify as camera.
    pub fn classify(capture: Option<DateTime<Utc>>, clicked_at: DateTime<Utc>) -> Self {
        match capture {
            Some(capture) if capture.signed_duration_since(clicked_at) > TimeDelta::zero() => {
                Self::Gallery
            }
            _ => Self::Camera,
        }
    }

    pub fn is_camera(self) -> bool {
        self == Self::Camera
    }

    pub fn is_gallery(self) -> bool {
        self == Self::Gallery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn capture_after_click_is_gallery() {
        assert_eq!(
            Provenance::classify(Some(at(1_000_001)), at(1_000_000)),
            Provenance::Gallery
        );
    }

    #[test]
    fn capture_equal_to_click_is_camera() {
        assert_eq!(
            Provenance::classify(Some(at(1_000_000)), at(1_000_000)),
            Provenance::Camera
        );
    }

    #[test]
    fn capture_before_click_is_camera() {
        assert_eq!(
            Provenance::classify(Some(at(999_999)), at(1_000_000)),
            Provenance::Camera
        );
    }

    #[test]
    fn missing_capture_date_defaults_to_camera() {
        assert_eq!(
            Provenance::classify(None, at(1_000_000)),
            Provenance::Camera
        );
    }
}
