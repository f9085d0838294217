//! SVG rasterization
//!
//! Decoding and drawing run on a worker thread so the exporter can stop
//! waiting after a timeout. The worker reports progress over a channel:
//! first [`Progress::Decoded`], then [`Progress::Drawn`] with the surface.

use std::io::Cursor;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use resvg::tiny_skia;

use super::error::ExportError;

/// Opaque RGBA8 pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl RasterSurface {
    /// RGBA of the pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let px = self.rgba.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Turns SVG markup into pixels
///
/// `decode` parses markup into an intermediate form; `draw` paints it onto
/// an opaque white surface scaled by an integer factor. Both run on the
/// worker thread, so the intermediate form never crosses threads.
pub trait Rasterizer: Send + Sync + 'static {
    type Decoded;

    fn decode(&self, svg: &str) -> Result<Self::Decoded, ExportError>;

    fn draw(&self, decoded: &Self::Decoded, scale: u32) -> Result<RasterSurface, ExportError>;
}

/// resvg-backed rasterizer
#[derive(Debug, Clone)]
pub struct ResvgRasterizer {
    load_system_fonts: bool,
}

impl ResvgRasterizer {
    /// Rasterizer that resolves text against the system fonts
    pub fn new() -> Self {
        Self {
            load_system_fonts: true,
        }
    }

    /// Rasterizer with an empty font database; text is not drawn
    pub fn without_system_fonts() -> Self {
        Self {
            load_system_fonts: false,
        }
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    type Decoded = usvg::Tree;

    fn decode(&self, svg: &str) -> Result<usvg::Tree, ExportError> {
        let mut opts = usvg::Options::default();
        if self.load_system_fonts {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            opts.fontdb = Arc::new(db);
        }
        usvg::Tree::from_str(svg, &opts).map_err(|e| ExportError::Decode(e.to_string()))
    }

    fn draw(&self, tree: &usvg::Tree, scale: u32) -> Result<RasterSurface, ExportError> {
        let size = tree.size();
        let factor = scale as f32;
        let width = (size.width() * factor).ceil().max(1.0) as u32;
        let height = (size.height() * factor).ceil().max(1.0) as u32;

        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(ExportError::Surface { width, height })?;
        pixmap.fill(tiny_skia::Color::WHITE);
        resvg::render(
            tree,
            tiny_skia::Transform::from_scale(factor, factor),
            &mut pixmap.as_mut(),
        );

        // Every pixel is opaque after the white fill, so premultiplied and
        // straight alpha coincide.
        Ok(RasterSurface {
            width,
            height,
            rgba: pixmap.take(),
        })
    }
}

/// Messages from the rasterization worker
pub(crate) enum Progress {
    Decoded,
    Drawn(Result<RasterSurface, ExportError>),
}

/// Start decoding and drawing `svg` on a worker thread
///
/// A decode failure is reported as `Drawn(Err(..))` without a preceding
/// `Decoded`. If the receiver is dropped the worker stops after decoding.
pub(crate) fn spawn_worker<R: Rasterizer>(
    rasterizer: Arc<R>,
    svg: String,
    scale: u32,
) -> Result<Receiver<Progress>, ExportError> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("persona-raster".to_string())
        .spawn(move || {
            let decoded = match rasterizer.decode(&svg) {
                Ok(decoded) => decoded,
                Err(e) => {
                    let _ = tx.send(Progress::Drawn(Err(e)));
                    return;
                }
            };
            if tx.send(Progress::Decoded).is_err() {
                return;
            }
            let _ = tx.send(Progress::Drawn(rasterizer.draw(&decoded, scale)));
        })
        .map_err(ExportError::Spawn)?;
    Ok(rx)
}

/// Encode a surface as PNG bytes
pub fn encode_png(surface: RasterSurface) -> Result<Vec<u8>, ExportError> {
    let (width, height) = (surface.width, surface.height);
    let buffer = image::RgbaImage::from_raw(width, height, surface.rgba)
        .ok_or(ExportError::Surface { width, height })?;

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}
