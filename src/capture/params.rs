//! Parameter types for browser captures.
//!
//! These describe *what* image to produce, not *how*. They are the interface
//! between [`preview`](crate::preview) (which decides what to capture) and a
//! [`BrowserBackend`](super::BrowserBackend) (which drives the browser).
//!
//! - [`Quality`] — JPEG quality (1–100, default 85). Clamped on construction.
//! - [`CaptureParams`] — viewport size, quality, navigation timeout, settle delay.

use crate::config::CaptureConfig;
use std::time::Duration;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Quality as the `u8` the JPEG encoder expects.
    pub fn as_u8(self) -> u8 {
        self.0 as u8
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Everything a backend needs to take one screenshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureParams {
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
    /// Upper bound on navigation and load.
    pub timeout: Duration,
    /// Fixed wait after load before the screenshot.
    pub settle: Duration,
}

impl CaptureParams {
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            quality: Quality::new(config.quality),
            timeout: Duration::from_secs(config.timeout_secs),
            settle: Duration::from_millis(config.settle_ms),
        }
    }
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self::from_config(&CaptureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn default_params_match_capture_defaults() {
        let params = CaptureParams::default();
        assert_eq!((params.width, params.height), (1200, 800));
        assert_eq!(params.quality.value(), 85);
        assert_eq!(params.timeout, Duration::from_secs(30));
        assert_eq!(params.settle, Duration::from_secs(1));
    }
}
