//! Exporting rendered persona cards to files
//!
//! Two exports exist. Vector export writes the SVG markup as-is. Raster
//! export decodes the markup, paints it over opaque white on a surface sized
//! from the SVG's declared width and height (times an integer scale), and
//! writes a PNG.
//!
//! Both are no-ops returning `Ok(None)` when nothing has been rendered yet.
//!
//! Raster export moves through `Idle → LoadingImage → Rasterizing →
//! Downloaded`. Decoding is bounded by [`ExportConfig::decode_timeout`];
//! a decode that fails or runs out of time moves the exporter to `Failed`
//! with an error instead of waiting forever.

mod error;
mod file;
mod raster;

use std::path::{Path, PathBuf};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::renderer::RenderedPersonaImage;

pub use error::ExportError;
pub use raster::{encode_png, RasterSurface, Rasterizer, ResvgRasterizer};

use raster::{spawn_worker, Progress};

/// MIME type of raster exports
pub const PNG_MIME: &str = "image/png";

/// Largest accepted raster scale factor
pub const MAX_SCALE: u32 = 8;

/// File stem used when the persona has no usable name
pub const FALLBACK_SLUG: &str = "persona";

/// Configuration for exports
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory receiving exported files
    pub out_dir: PathBuf,
    /// Integer resolution multiplier for raster export
    pub scale: u32,
    /// Longest wait for the SVG to decode before giving up
    pub decode_timeout: Duration,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            scale: 1,
            decode_timeout: Duration::from_secs(5),
        }
    }
}

impl ExportConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Set the raster scale factor
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the decode timeout
    pub fn with_decode_timeout(mut self, timeout: Duration) -> Self {
        self.decode_timeout = timeout;
        self
    }
}

/// Where the most recent export got to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    LoadingImage,
    Rasterizing,
    Downloaded,
    Failed,
}

/// Lowercase file-name stem for a persona name
///
/// Runs of characters other than ASCII letters and digits collapse into a
/// single `-`; an empty result becomes `persona`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Writes rendered cards to the output directory
pub struct Exporter<R: Rasterizer = ResvgRasterizer> {
    config: ExportConfig,
    rasterizer: Arc<R>,
    state: ExportState,
}

impl Exporter<ResvgRasterizer> {
    /// Create an exporter that rasterizes with resvg and system fonts
    pub fn new(config: ExportConfig) -> Self {
        Self::with_rasterizer(config, ResvgRasterizer::new())
    }
}

impl<R: Rasterizer> Exporter<R> {
    /// Create an exporter with a custom rasterizer
    pub fn with_rasterizer(config: ExportConfig, rasterizer: R) -> Self {
        Self {
            config,
            rasterizer: Arc::new(rasterizer),
            state: ExportState::Idle,
        }
    }

    /// State reached by the most recent export
    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Export configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Output path for a persona name and extension
    pub fn file_path(&self, persona_name: &str, extension: &str) -> PathBuf {
        self.config
            .out_dir
            .join(format!("{}-persona.{extension}", slugify(persona_name)))
    }

    fn transition(&mut self, next: ExportState) {
        debug!(from = ?self.state, to = ?next, "export state");
        self.state = next;
    }

    fn finish(&mut self, path: &Path, bytes: &[u8], mime: &str) -> Result<(), ExportError> {
        match file::write_output(path, bytes) {
            Ok(()) => {
                self.transition(ExportState::Downloaded);
                info!(path = %path.display(), mime, bytes = bytes.len(), "exported persona card");
                Ok(())
            }
            Err(e) => {
                self.transition(ExportState::Failed);
                Err(e)
            }
        }
    }

    /// Write the SVG markup to `<slug>-persona.svg`
    ///
    /// Returns `Ok(None)` without touching the file system when `image` is
    /// `None`.
    pub fn export_svg(
        &mut self,
        image: Option<&RenderedPersonaImage>,
        persona_name: &str,
    ) -> Result<Option<PathBuf>, ExportError> {
        self.state = ExportState::Idle;
        let Some(image) = image else {
            debug!("svg export skipped: nothing rendered yet");
            return Ok(None);
        };

        let path = self.file_path(persona_name, "svg");
        self.finish(&path, image.svg().as_bytes(), crate::renderer::SVG_MIME)?;
        Ok(Some(path))
    }

    /// Rasterize the SVG and write it to `<slug>-persona.png`
    ///
    /// Returns `Ok(None)` without touching the file system when `image` is
    /// `None`.
    pub fn export_png(
        &mut self,
        image: Option<&RenderedPersonaImage>,
        persona_name: &str,
    ) -> Result<Option<PathBuf>, ExportError> {
        self.state = ExportState::Idle;
        let Some(image) = image else {
            debug!("png export skipped: nothing rendered yet");
            return Ok(None);
        };

        let scale = self.config.scale;
        if scale == 0 || scale > MAX_SCALE {
            self.transition(ExportState::Failed);
            return Err(ExportError::InvalidScale {
                scale,
                max: MAX_SCALE,
            });
        }

        let surface = match self.rasterize(image, scale) {
            Ok(surface) => surface,
            Err(e) => {
                self.transition(ExportState::Failed);
                return Err(e);
            }
        };

        let bytes = match encode_png(surface) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.transition(ExportState::Failed);
                return Err(e);
            }
        };

        let path = self.file_path(persona_name, "png");
        self.finish(&path, &bytes, PNG_MIME)?;
        Ok(Some(path))
    }

    fn rasterize(
        &mut self,
        image: &RenderedPersonaImage,
        scale: u32,
    ) -> Result<RasterSurface, ExportError> {
        self.transition(ExportState::LoadingImage);
        let timeout = self.config.decode_timeout;
        let rx = spawn_worker(Arc::clone(&self.rasterizer), image.svg().to_string(), scale)?;

        match rx.recv_timeout(timeout) {
            Ok(Progress::Decoded) => {}
            Ok(Progress::Drawn(result)) => return result,
            Err(RecvTimeoutError::Timeout) => {
                warn!(?timeout, "svg decode timed out");
                return Err(ExportError::DecodeTimeout(timeout));
            }
            Err(RecvTimeoutError::Disconnected) => return Err(ExportError::WorkerLost),
        }

        self.transition(ExportState::Rasterizing);
        match rx.recv() {
            Ok(Progress::Drawn(result)) => result,
            Ok(Progress::Decoded) | Err(_) => Err(ExportError::WorkerLost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Themba"), "themba");
        assert_eq!(slugify("  Ana María  Souza! "), "ana-mar-a-souza");
        assert_eq!(slugify("The heritage-seeker"), "the-heritage-seeker");
        assert_eq!(slugify(""), "persona");
        assert_eq!(slugify("!!!"), "persona");
    }

    #[test]
    fn test_file_path_uses_slug() {
        let exporter = Exporter::new(ExportConfig::new().with_out_dir("out"));
        assert_eq!(
            exporter.file_path("Example Persona", "png"),
            PathBuf::from("out").join("example-persona-persona.png")
        );
        assert_eq!(
            exporter.file_path("", "svg"),
            PathBuf::from("out").join("persona-persona.svg")
        );
    }

    #[test]
    fn test_export_before_render_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = Exporter::new(ExportConfig::new().with_out_dir(dir.path()));

        assert_eq!(exporter.export_svg(None, "Ana").unwrap(), None);
        assert_eq!(exporter.export_png(None, "Ana").unwrap(), None);
        assert_eq!(exporter.state(), ExportState::Idle);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.scale, 1);
        assert_eq!(config.decode_timeout, Duration::from_secs(5));
        assert_eq!(config.out_dir, PathBuf::from("."));
    }
}
