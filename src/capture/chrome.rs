//! Headless Chrome backend.
//!
//! Each [`capture`](HeadlessChromeBackend::capture) launches its own browser
//! process, navigates, waits for the page to go quiet, sleeps the settle
//! delay, and takes a clipped JPEG screenshot of the viewport. The
//! [`Browser`] handle is dropped before returning, which kills the process on
//! both the success and the error path.

use super::backend::{BrowserBackend, CaptureError};
use super::params::CaptureParams;
use headless_chrome::protocol::cdp::Page::{CaptureScreenshotFormatOption, Viewport};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::time::Duration;

/// Resolves once no new resource entries have appeared for 500 ms.
const NETWORK_IDLE_JS: &str = r#"new Promise((resolve) => {
    let last = performance.getEntriesByType('resource').length;
    let quiet = 0;
    const timer = setInterval(() => {
        const now = performance.getEntriesByType('resource').length;
        quiet = now === last ? quiet + 100 : 0;
        last = now;
        if (quiet >= 500) {
            clearInterval(timer);
            resolve(true);
        }
    }, 100);
})"#;

#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessChromeBackend;

impl HeadlessChromeBackend {
    pub fn new() -> Self {
        Self
    }
}

fn browser_err(e: impl std::fmt::Display) -> CaptureError {
    CaptureError::Browser(e.to_string())
}

fn launch(params: &CaptureParams) -> Result<Browser, CaptureError> {
    Browser::new(LaunchOptions {
        headless: true,
        sandbox: false,
        window_size: Some((params.width, params.height)),
        idle_browser_timeout: params.timeout + params.settle + Duration::from_secs(10),
        ..Default::default()
    })
    .map_err(browser_err)
}

fn wait_for_network_idle(tab: &Tab) {
    if let Err(e) = tab.evaluate(NETWORK_IDLE_JS, true) {
        tracing::debug!(error = %e, "network idle wait did not complete");
    }
}

impl BrowserBackend for HeadlessChromeBackend {
    fn capture(&self, url: &str, params: &CaptureParams) -> Result<Vec<u8>, CaptureError> {
        let browser = launch(params)?;
        let tab = browser.new_tab().map_err(browser_err)?;
        tab.set_default_timeout(params.timeout);

        tab.navigate_to(url)
            .map_err(browser_err)?
            .wait_until_navigated()
            .map_err(browser_err)?;
        wait_for_network_idle(&tab);
        std::thread::sleep(params.settle);

        let clip = Viewport {
            x: 0.0,
            y: 0.0,
            width: f64::from(params.width),
            height: f64::from(params.height),
            scale: 1.0,
        };
        let bytes = tab
            .capture_screenshot(
                CaptureScreenshotFormatOption::Jpeg,
                Some(params.quality.value()),
                Some(clip),
                true,
            )
            .map_err(browser_err)?;

        drop(tab);
        drop(browser);
        Ok(bytes)
    }
}
