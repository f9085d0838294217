//! XR Persona - persona cards for XR experience design
//!
//! This library holds a typed persona form, renders it to an SVG card, and
//! exports the card as SVG or PNG.
//!
//! # Example
//!
//! ```rust
//! use xr_persona::{render, FormUpdate, PersonaForm};
//!
//! let form = PersonaForm::new().apply(FormUpdate::Name("Themba".to_string()));
//! let svg = render(&form);
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("Themba"));
//! ```

pub mod avatar;
pub mod error;
pub mod export;
pub mod persona;
pub mod renderer;
pub mod session;
pub mod stylesheet;

pub use error::{FormError, PersonaFileError};
pub use export::{ExportConfig, ExportError, ExportState, Exporter};
pub use persona::{random_persona, FormUpdate, PersonaForm};
pub use renderer::{render_persona, RenderedPersonaImage, SvgConfig};
pub use session::Session;

// Re-export Stylesheet for public API
pub use stylesheet::Stylesheet;

/// Configuration for rendering a persona card
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }
}

/// Render a persona to SVG with default configuration
///
/// # Example
///
/// ```rust
/// use xr_persona::{render, PersonaForm};
///
/// let svg = render(&PersonaForm::new());
/// assert!(svg.contains("XR User"));
/// assert_eq!(svg.matches("Not specified").count(), 3);
/// ```
pub fn render(form: &PersonaForm) -> String {
    render_with_config(form, &RenderConfig::default())
}

/// Render a persona to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use xr_persona::{render_with_config, PersonaForm, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new().with_svg(SvgConfig::default().with_standalone(false));
/// let svg = render_with_config(&PersonaForm::new(), &config);
/// assert!(svg.starts_with("<svg"));
/// ```
pub fn render_with_config(form: &PersonaForm, config: &RenderConfig) -> String {
    render_image(form, config).into_svg()
}

/// Render a persona to an image carrying its declared size
pub fn render_image(form: &PersonaForm, config: &RenderConfig) -> RenderedPersonaImage {
    render_persona(form, &config.svg, &config.stylesheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{AccessibilityNeed, FocusType};

    #[test]
    fn test_render_default_form() {
        let svg = render(&PersonaForm::new());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("User Persona"));
        assert!(!svg.contains("Accessibility Needs"));
        assert!(!svg.contains("Cultural Context"));
    }

    #[test]
    fn test_render_with_name_and_title() {
        let form = PersonaForm::new().apply_all([
            FormUpdate::Name("Themba".to_string()),
            FormUpdate::Title("The heritage seeker".to_string()),
        ]);
        let svg = render(&form);
        assert!(svg.contains(">Themba</text>"));
        assert!(svg.contains(">The heritage seeker</text>"));
        assert!(!svg.contains("XR User"));
    }

    #[test]
    fn test_render_escapes_markup() {
        let form = PersonaForm::new().apply(FormUpdate::Name("<b>Jo & Co</b>".to_string()));
        let svg = render(&form);
        assert!(svg.contains("&lt;b&gt;Jo &amp; Co&lt;/b&gt;"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn test_render_chip() {
        let form = PersonaForm::new().apply(FormUpdate::FocusType(FocusType::Detail));
        let svg = render(&form);
        assert!(svg.contains(">Detail-oriented</text>"));
        // "Detail-oriented" is 15 characters: 15 * 7 + 20
        assert!(svg.contains(r#"width="125" height="30""#));
    }

    #[test]
    fn test_render_image_size() {
        let form = PersonaForm::new().toggle_accessibility(AccessibilityNeed::OneHanded);
        let image = render_image(&form, &RenderConfig::default());
        assert_eq!(image.width(), 300.0);
        assert_eq!(image.height(), 845.0 + 22.0);
    }
}
