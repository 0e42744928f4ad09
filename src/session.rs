//! Session/device collaborator seam.
//!
//! The pipeline only ever asks the session one thing: the device vendor
//! string. Real callers bridge this to whatever user-agent or platform
//! lookup they have; [`StaticDevice`] covers the common case where the
//! vendor is known up front.

/// Vendor string reported by Apple devices.
pub const APPLE_VENDOR: &str = "Apple";

/// Provider of device identity for the current session.
pub trait DeviceInfo {
    fn device_vendor(&self) -> &str;
}

/// Fixed device description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDevice {
    vendor: String,
}

impl StaticDevice {
    pub fn new(vendor: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
        }
    }

    pub fn apple() -> Self {
        Self::new(APPLE_VENDOR)
    }
}

impl DeviceInfo for StaticDevice {
    fn device_vendor(&self) -> &str {
        &self.vendor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_device_reports_vendor() {
        assert_eq!(StaticDevice::new("Samsung").device_vendor(), "Samsung");
        assert_eq!(StaticDevice::apple().device_vendor(), APPLE_VENDOR);
    }
}
