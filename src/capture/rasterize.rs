//! SVG rasterization through an external converter.
//!
//! [`CommandRasterizer`] shells out to `rsvg-convert` (or any tool taking the
//! same flags) to turn a placeholder SVG into a PNG. Preview images are all
//! JPEG, so [`png_to_jpeg`] re-encodes the PNG with the `image` crate.

use super::backend::CaptureError;
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process::Command;

/// Converts an SVG file into a PNG of the given size.
pub trait Rasterizer: Sync {
    fn rasterize(
        &self,
        svg: &Path,
        png: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), CaptureError>;
}

/// Runs `<program> -w W -h H -f png -o <png> <svg>`.
#[derive(Debug, Clone)]
pub struct CommandRasterizer {
    program: String,
}

impl CommandRasterizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Rasterizer for CommandRasterizer {
    fn rasterize(
        &self,
        svg: &Path,
        png: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), CaptureError> {
        let output = Command::new(&self.program)
            .arg("-w")
            .arg(width.to_string())
            .arg("-h")
            .arg(height.to_string())
            .args(["-f", "png", "-o"])
            .arg(png)
            .arg(svg)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => CaptureError::ToolUnavailable(self.program.clone()),
                _ => CaptureError::Io(e),
            })?;

        if !output.status.success() {
            return Err(CaptureError::ToolFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Re-encode a PNG file as JPEG at `quality`. Alpha is dropped.
pub fn png_to_jpeg(png: &Path, jpeg: &Path, quality: Quality) -> Result<(), CaptureError> {
    let rgb = image::open(png)?.to_rgb8();
    let writer = BufWriter::new(File::create(jpeg)?);
    rgb.write_with_encoder(JpegEncoder::new_with_quality(writer, quality.as_u8()))?;
    Ok(())
}
