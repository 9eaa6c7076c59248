//! Preview image capture.
//!
//! | Operation | Implementation |
//! |---|---|
//! | **Homepage screenshot** | `headless_chrome`, one browser per capture |
//! | **Placeholder markup** | maud-built SVG |
//! | **SVG → PNG** | external `rsvg-convert` |
//! | **PNG → JPEG** | `image` crate |
//!
//! The module is split into:
//! - **Parameters**: what to capture (size, quality, timeouts)
//! - **Backend**: [`BrowserBackend`] trait + [`HeadlessChromeBackend`]
//! - **Rasterize**: [`Rasterizer`] trait + [`CommandRasterizer`]
//! - **Placeholder**: SVG document for repositories without a homepage

pub mod backend;
pub mod chrome;
mod params;
pub mod placeholder;
pub mod rasterize;

pub use backend::{BrowserBackend, CaptureError};
pub use chrome::HeadlessChromeBackend;
pub use params::{CaptureParams, Quality};
pub use placeholder::placeholder_svg;
pub use rasterize::{CommandRasterizer, Rasterizer, png_to_jpeg};
