//! Color palettes for persona cards
//!
//! The renderer never hard-codes colors: it asks the stylesheet for a
//! symbolic token (`card-background`, `skin-deep`, `hair-grey`, ...) and the
//! stylesheet resolves it. Palettes are TOML files; anything they leave out
//! falls back to the built-in palette.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

/// Palette loading failures
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("cannot read palette: {0}")]
    IoError(#[from] std::io::Error),
    #[error("invalid palette TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("color '{token}' has unusable value '{value}'")]
    InvalidColor { token: String, value: String },
}

/// Token-to-color palette for one card style
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// `[metadata] name`
    pub name: Option<String>,
    /// `[metadata] description`
    pub description: Option<String>,
    /// Font family used for every text element
    pub font_family: Option<String>,
    /// Color mappings: token name -> color
    pub colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
    font_family: Option<String>,
}

/// Default palette: light card, slate text, three skin tones, two hair colors
const DEFAULT_PALETTE: &str = r##"
[metadata]
name = "default"
font_family = "Arial"

[colors]
card-background = "#ffffff"
card-border = "#e5e7eb"

text-primary = "#111827"
text-secondary = "#4b5563"
text-muted = "#6b7280"

chip-fill = "#f3f4f6"
avatar-ring = "#e5e7eb"
avatar-background = "#f3f4f6"
section-rule = "#e5e7eb"

skin-light = "#f8d5a8"
skin-medium = "#d4a373"
skin-deep = "#8d5524"

hair-dark = "#2d1b12"
hair-grey = "#9ca3af"

feature-line = "#1f2937"
accessory = "#f59e0b"
"##;

fn builtin() -> &'static Stylesheet {
    static BUILTIN: OnceLock<Stylesheet> = OnceLock::new();
    BUILTIN.get_or_init(|| {
        DEFAULT_PALETTE
            .parse()
            .expect("Default palette should be valid TOML")
    })
}

impl Stylesheet {
    /// Read a palette file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Color for `token` in this palette only
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Color for `token`, never missing
    ///
    /// Looks in this palette, then the built-in one, then picks a color by
    /// the token's category (the part before the first `-`).
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token).or_else(|| builtin().resolve(token)) {
            return color.to_string();
        }

        let category = token.split('-').next().unwrap_or(token);
        match category {
            "card" | "chip" | "avatar" => "#ffffff",
            "text" | "feature" => "#111827",
            "skin" => "#d4a373",
            "hair" => "#2d1b12",
            _ => "#6b7280",
        }
        .to_string()
    }

    /// Font family for text, defaulting to Arial
    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or("Arial")
    }
}

impl FromStr for Stylesheet {
    type Err = StylesheetError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let parsed: TomlStylesheet = toml::from_str(content)?;
        let metadata = parsed.metadata;

        // Values land inside quoted SVG attributes
        if let Some((token, value)) = parsed
            .colors
            .iter()
            .find(|(_, value)| value.is_empty() || value.contains(['"', '\'', '<', '>', '&']))
        {
            return Err(StylesheetError::InvalidColor {
                token: token.clone(),
                value: value.clone(),
            });
        }

        Ok(Stylesheet {
            name: metadata.as_ref().and_then(|m| m.name.clone()),
            description: metadata.as_ref().and_then(|m| m.description.clone()),
            font_family: metadata.and_then(|m| m.font_family),
            colors: parsed.colors,
        })
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Stylesheet {
        Stylesheet {
            name: None,
            description: None,
            font_family: None,
            colors: HashMap::new(),
        }
    }

    #[test]
    fn test_builtin_palette_tokens() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.name.as_deref(), Some("default"));
        assert!(stylesheet.colors.contains_key("card-background"));
        assert!(stylesheet.colors.contains_key("skin-deep"));
        assert!(stylesheet.colors.contains_key("hair-grey"));
    }

    #[test]
    fn test_resolve_missing_token() {
        assert_eq!(Stylesheet::default().resolve("nonexistent"), None);
    }

    #[test]
    fn test_resolve_or_default_falls_back_to_palette() {
        assert_eq!(empty().resolve_or_default("skin-light"), "#f8d5a8");
    }

    #[test]
    fn test_resolve_or_default_category_fallback() {
        assert_eq!(empty().resolve_or_default("skin-olive"), "#d4a373");
        assert_eq!(empty().resolve_or_default("text-huge"), "#111827");
        assert_eq!(empty().resolve_or_default("mystery"), "#6b7280");
    }

    #[test]
    fn test_parse_toml_overrides() {
        let toml_str = r##"
[metadata]
name = "Night"
font_family = "Inter"

[colors]
card-background = "#0f172a"
"##;
        let stylesheet: Stylesheet = toml_str.parse().expect("Should parse");
        assert_eq!(stylesheet.name.as_deref(), Some("Night"));
        assert_eq!(stylesheet.font_family(), "Inter");
        assert_eq!(stylesheet.resolve_or_default("card-background"), "#0f172a");
        assert_eq!(stylesheet.resolve_or_default("chip-fill"), "#f3f4f6");
    }

    #[test]
    fn test_font_family_default() {
        assert_eq!(empty().font_family(), "Arial");
    }

    #[test]
    fn test_broken_palette_is_parse_error() {
        let result = "[colors\nchip-fill = ".parse::<Stylesheet>();
        assert!(matches!(result, Err(StylesheetError::ParseError(_))));
    }

    #[test]
    fn test_rejects_color_breaking_out_of_attribute() {
        let toml_str = r##"
[colors]
card-background = 'red" onload="x'
"##;
        let err = toml_str.parse::<Stylesheet>().unwrap_err();
        match err {
            StylesheetError::InvalidColor { token, value } => {
                assert_eq!(token, "card-background");
                assert_eq!(value, r#"red" onload="x"#);
            }
            other => panic!("expected InvalidColor, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_named_and_functional_colors() {
        let toml_str = r##"
[colors]
card-background = "white"
chip-fill = "rgb(243, 244, 246)"
"##;
        let stylesheet: Stylesheet = toml_str.parse().unwrap();
        assert_eq!(stylesheet.resolve("chip-fill"), Some("rgb(243, 244, 246)"));
    }

    #[test]
    fn test_missing_palette_file_is_io_error() {
        let result = Stylesheet::from_file(Path::new("/nonexistent/palette.toml"));
        assert!(matches!(result, Err(StylesheetError::IoError(_))));
    }
}
