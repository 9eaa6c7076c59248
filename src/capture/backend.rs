//! Browser backend trait and shared error type.
//!
//! The [`BrowserBackend`] trait is the only thing the pipeline knows about
//! the browser: give it a URL and capture parameters, get JPEG bytes back.
//! The production implementation is
//! [`HeadlessChromeBackend`](super::chrome::HeadlessChromeBackend); tests use
//! [`tests::MockBrowser`].

use super::params::CaptureParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Browser error: {0}")]
    Browser(String),
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("{0} is not installed")]
    ToolUnavailable(String),
    #[error("{program} exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("Invalid capture target: {0}")]
    InvalidTarget(String),
}

/// Captures a rendered page as a JPEG.
///
/// Implementations own the whole browser lifecycle for one call: nothing is
/// shared between captures, and the browser is gone when `capture` returns,
/// whether it succeeded or not.
pub trait BrowserBackend: Sync {
    fn capture(&self, url: &str, params: &CaptureParams) -> Result<Vec<u8>, CaptureError>;
}
