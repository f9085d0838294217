//! Rendered persona card held by a session

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// MIME type of rendered cards
pub const SVG_MIME: &str = "image/svg+xml";

/// An SVG persona card with its declared size
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPersonaImage {
    svg: String,
    width: f64,
    height: f64,
}

impl RenderedPersonaImage {
    pub(crate) fn new(svg: String, width: f64, height: f64) -> Self {
        Self { svg, width, height }
    }

    /// SVG markup
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Declared width in user units
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Declared height in user units
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Consume the image, returning the markup
    pub fn into_svg(self) -> String {
        self.svg
    }

    /// `data:` URI for inline previews (HTML `<img src>`, markdown, etc.)
    pub fn to_data_uri(&self) -> String {
        format!("data:{SVG_MIME};base64,{}", STANDARD.encode(self.svg.as_bytes()))
    }
}
