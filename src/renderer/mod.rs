//! SVG renderer for persona cards
//!
//! This module turns a PersonaForm into an SVG string. Colors come from a
//! Stylesheet and geometry from an SvgConfig.

pub mod config;
mod image;
pub mod svg;

pub use config::SvgConfig;
pub use image::{RenderedPersonaImage, SVG_MIME};
pub use svg::{render_persona, MOTIVE_PLACEHOLDER, NAME_PLACEHOLDER, TITLE_PLACEHOLDER};
