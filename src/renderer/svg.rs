//! SVG generation for persona cards

use tracing::debug;

use crate::avatar::AvatarKind;
use crate::persona::{Choice, PersonaForm};
use crate::stylesheet::Stylesheet;

use super::image::RenderedPersonaImage;
use super::SvgConfig;

/// Placeholder for an empty name
pub const NAME_PLACEHOLDER: &str = "XR User";
/// Placeholder for an empty title
pub const TITLE_PLACEHOLDER: &str = "User Persona";
/// Placeholder for an empty motive
pub const MOTIVE_PLACEHOLDER: &str = "Not specified";

const NAME_Y: f64 = 220.0;
const TITLE_Y: f64 = 245.0;
const DEMOGRAPHICS_Y: f64 = 265.0;

const CHIP_TOP: f64 = 280.0;
const CHIP_STRIDE: f64 = 40.0;
const CHIP_HEIGHT: f64 = 30.0;
const CHIP_CHAR_WIDTH: f64 = 7.0;
const CHIP_PADDING: f64 = 20.0;

const XR_HEADER_Y: f64 = 420.0;
const XR_LINE_TOP: f64 = 445.0;
const XR_LINE_STRIDE: f64 = 22.0;

const MOTIVES_HEADER_Y: f64 = 570.0;
const MOTIVE_TOP: f64 = 595.0;
const MOTIVE_STRIDE: f64 = 25.0;

const CULTURAL_HEADER_Y: f64 = 685.0;
const CULTURAL_TEXT_Y: f64 = 707.0;

const ACCESSIBILITY_HEADER_Y: f64 = 745.0;
const PREFERENCES_HEADER_Y: f64 = 795.0;
/// Distance from a list header to its first item
const LIST_HEADER_GAP: f64 = 22.0;

const LEFT: f64 = 60.0;
const CENTER_X: f64 = 150.0;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        }
    }
}

/// Font attributes of one text element
#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub size: f64,
    pub bold: bool,
    pub anchor: TextAnchor,
    pub fill: &'a str,
}

/// Accumulates card elements line by line, tracking group depth
pub struct SvgBuilder {
    config: SvgConfig,
    font_family: String,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Empty builder writing text in `font_family`
    pub fn new(config: SvgConfig, font_family: impl Into<String>) -> Self {
        Self {
            config,
            font_family: font_family.into(),
            elements: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn class(&self, name: &str) -> String {
        format!("{}{}", self.prefix(), name)
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a pre-built element verbatim
    pub fn add_raw(&mut self, element: impl AsRef<str>) {
        let line = format!("{}{}", self.indent_str(), element.as_ref());
        self.elements.push(line);
    }

    /// Append a `<rect>` with corner radius `rx`
    pub fn add_rect(&mut self, x: f64, y: f64, w: f64, h: f64, rx: f64, styles: &str) {
        self.elements.push(format!(
            r#"{}<rect x="{}" y="{}" width="{}" height="{}" rx="{}"{}/>"#,
            self.indent_str(),
            x,
            y,
            w,
            h,
            rx,
            styles
        ));
    }

    /// Append a `<circle>`; `styles` is a pre-rendered attribute string
    pub fn add_circle(&mut self, cx: f64, cy: f64, r: f64, styles: &str) {
        self.elements.push(format!(
            r#"{}<circle cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            cx,
            cy,
            r,
            styles
        ));
    }

    /// Add a text element; the content is XML-escaped
    pub fn add_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle<'_>, class: &str) {
        let class_attr = if class.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, self.class(class))
        };
        let weight = if style.bold {
            r#" font-weight="bold""#
        } else {
            ""
        };

        self.elements.push(format!(
            r#"{}<text{} x="{}" y="{}" font-family="{}" font-size="{}"{} text-anchor="{}" fill="{}">{}</text>"#,
            self.indent_str(),
            class_attr,
            x,
            y,
            escape_xml(&self.font_family),
            style.size,
            weight,
            style.anchor.as_str(),
            style.fill,
            escape_xml(text)
        ));
    }

    /// Open a group element with optional ID, class and extra attributes
    pub fn start_group(&mut self, id: Option<&str>, class: &str, attrs: &str) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_attr = format!(r#" class="{}""#, self.class(class));

        self.elements.push(format!(
            "{}<g{}{}{}>",
            self.indent_str(),
            id_attr,
            class_attr,
            attrs
        ));
        self.indent += 1;
    }

    /// Close the innermost `<g>`
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Wrap the elements in a sized `<svg>` root
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Concrete colors for one render, resolved once from the stylesheet
struct Palette {
    card_background: String,
    card_border: String,
    text_primary: String,
    text_secondary: String,
    text_muted: String,
    chip_fill: String,
    avatar_background: String,
    avatar_ring: String,
    section_rule: String,
}

impl Palette {
    fn resolve(stylesheet: &Stylesheet) -> Self {
        Self {
            card_background: stylesheet.resolve_or_default("card-background"),
            card_border: stylesheet.resolve_or_default("card-border"),
            text_primary: stylesheet.resolve_or_default("text-primary"),
            text_secondary: stylesheet.resolve_or_default("text-secondary"),
            text_muted: stylesheet.resolve_or_default("text-muted"),
            chip_fill: stylesheet.resolve_or_default("chip-fill"),
            avatar_background: stylesheet.resolve_or_default("avatar-background"),
            avatar_ring: stylesheet.resolve_or_default("avatar-ring"),
            section_rule: stylesheet.resolve_or_default("section-rule"),
        }
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// Render a persona card to an SVG image
///
/// Pure: the same form, config and stylesheet always produce the same
/// string. Empty fields never fail; they only switch to placeholder text.
pub fn render_persona(
    form: &PersonaForm,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> RenderedPersonaImage {
    let palette = Palette::resolve(stylesheet);
    let primary = form.primary_color.to_hex();
    let list_items = form.accessibility_needs.len() + form.interaction_preferences.len();
    let width = config.width;
    let height = config.height_for(list_items);

    let mut builder = SvgBuilder::new(config.clone(), stylesheet.font_family());

    builder.add_rect(
        0.0,
        0.0,
        width,
        height,
        12.0,
        &format!(
            r#" fill="{}" stroke="{}" stroke-width="1""#,
            palette.card_background, palette.card_border
        ),
    );

    render_avatar(form, stylesheet, &palette, &primary, &mut builder);
    render_header(form, &palette, &mut builder);
    render_chips(form, &palette, &mut builder);
    render_xr_preferences(form, &palette, &mut builder);
    render_motives(form, &palette, &primary, &mut builder);
    render_optional_blocks(form, config, &palette, &mut builder);

    let svg = builder.build(width, height);
    debug!(
        avatar = %AvatarKind::for_form(form).slug(),
        list_items,
        height,
        bytes = svg.len(),
        "rendered persona card"
    );

    RenderedPersonaImage::new(svg, width, height)
}

fn heading(fill: &str) -> TextStyle<'_> {
    TextStyle {
        size: 16.0,
        bold: true,
        anchor: TextAnchor::Start,
        fill,
    }
}

fn body(fill: &str) -> TextStyle<'_> {
    TextStyle {
        size: 14.0,
        bold: false,
        anchor: TextAnchor::Start,
        fill,
    }
}

fn render_avatar(
    form: &PersonaForm,
    stylesheet: &Stylesheet,
    palette: &Palette,
    primary: &str,
    builder: &mut SvgBuilder,
) {
    let avatar = AvatarKind::for_form(form);
    builder.start_group(
        Some("avatar"),
        "avatar",
        &format!(r#" data-avatar="{}""#, avatar.slug()),
    );
    builder.add_circle(
        CENTER_X,
        100.0,
        70.0,
        &format!(
            r#" fill="{}" stroke="{}" stroke-width="2""#,
            palette.avatar_background, palette.avatar_ring
        ),
    );
    builder.add_rect(80.0, 90.0, 140.0, 110.0, 70.0, &format!(r#" fill="{primary}""#));
    for fragment in avatar.fragments(stylesheet) {
        builder.add_raw(fragment);
    }
    builder.end_group();
}

fn render_header(form: &PersonaForm, palette: &Palette, builder: &mut SvgBuilder) {
    builder.add_text(
        or_placeholder(&form.name, NAME_PLACEHOLDER),
        CENTER_X,
        NAME_Y,
        TextStyle {
            size: 24.0,
            bold: true,
            anchor: TextAnchor::Middle,
            fill: &palette.text_primary,
        },
        "name",
    );
    builder.add_text(
        or_placeholder(&form.title, TITLE_PLACEHOLDER),
        CENTER_X,
        TITLE_Y,
        TextStyle {
            size: 16.0,
            bold: false,
            anchor: TextAnchor::Middle,
            fill: &palette.text_secondary,
        },
        "title",
    );
    let demographics = format!(
        "{} | {} | {}",
        form.gender.as_str(),
        form.age_bracket.as_str(),
        form.origin.as_str()
    );
    builder.add_text(
        &demographics,
        CENTER_X,
        DEMOGRAPHICS_Y,
        TextStyle {
            size: 12.0,
            bold: false,
            anchor: TextAnchor::Middle,
            fill: &palette.text_muted,
        },
        "demographics",
    );
}

fn render_chips(form: &PersonaForm, palette: &Palette, builder: &mut SvgBuilder) {
    let chips = [
        form.focus_type.as_str(),
        form.session_length.as_str(),
        form.platform_pref.as_str(),
    ];
    for (index, label) in chips.into_iter().enumerate() {
        let top = CHIP_TOP + CHIP_STRIDE * index as f64;
        let width = label.chars().count() as f64 * CHIP_CHAR_WIDTH + CHIP_PADDING;
        builder.add_rect(
            LEFT,
            top,
            width,
            CHIP_HEIGHT,
            CHIP_HEIGHT / 2.0,
            &format!(r#" fill="{}""#, palette.chip_fill),
        );
        builder.add_text(label, LEFT + 15.0, top + 20.0, body(&palette.text_primary), "chip");
    }
}

fn render_xr_preferences(form: &PersonaForm, palette: &Palette, builder: &mut SvgBuilder) {
    builder.start_group(Some("xr-preferences"), "section", "");
    builder.add_text(
        "XR Preferences",
        LEFT,
        XR_HEADER_Y,
        heading(&palette.text_primary),
        "heading",
    );
    let lines = [
        ("Interaction", form.spatial_interaction.as_str()),
        ("Navigation", form.navigation.as_str()),
        ("Information", form.information_layering.as_str()),
        ("Audio", form.audio_preference.as_str()),
        ("Visual effects", form.visual_effects.as_str()),
    ];
    for (index, (label, value)) in lines.into_iter().enumerate() {
        builder.add_text(
            &format!("{label}: {value}"),
            LEFT,
            XR_LINE_TOP + XR_LINE_STRIDE * index as f64,
            body(&palette.text_secondary),
            "preference",
        );
    }
    builder.end_group();
}

fn render_motives(
    form: &PersonaForm,
    palette: &Palette,
    primary: &str,
    builder: &mut SvgBuilder,
) {
    builder.start_group(Some("motives"), "section", "");
    builder.add_text(
        "Interaction Motives",
        LEFT,
        MOTIVES_HEADER_Y,
        heading(&palette.text_primary),
        "heading",
    );
    for (index, motive) in form.motives.iter().enumerate() {
        let y = MOTIVE_TOP + MOTIVE_STRIDE * index as f64;
        builder.add_circle(LEFT + 10.0, y - 5.0, 5.0, &format!(r#" fill="{primary}""#));
        builder.add_text(
            or_placeholder(motive, MOTIVE_PLACEHOLDER),
            LEFT + 25.0,
            y,
            body(&palette.text_primary),
            "motive",
        );
    }
    builder.end_group();
}

/// Cultural context, accessibility needs and interaction preferences
///
/// Each block is drawn only when it has content. The cultural block and
/// both list headers sit at fixed offsets; list items advance by the
/// configured stride, and the preferences block moves down by one stride
/// per accessibility item above it.
fn render_optional_blocks(
    form: &PersonaForm,
    config: &SvgConfig,
    palette: &Palette,
    builder: &mut SvgBuilder,
) {
    let stride = config.item_stride;

    if !form.cultural_context.is_empty() {
        builder.start_group(Some("cultural-context"), "section", "");
        builder.add_text(
            "Cultural Context",
            LEFT,
            CULTURAL_HEADER_Y,
            heading(&palette.text_primary),
            "heading",
        );
        builder.add_text(
            &form.cultural_context,
            LEFT,
            CULTURAL_TEXT_Y,
            body(&palette.text_secondary),
            "cultural",
        );
        builder.end_group();
    }

    let accessibility: Vec<&str> = form.accessibility_needs.iter().map(|n| n.as_str()).collect();
    render_list(
        builder,
        palette,
        "accessibility-needs",
        "Accessibility Needs",
        ACCESSIBILITY_HEADER_Y,
        stride,
        &accessibility,
    );

    let preferences: Vec<&str> = form
        .interaction_preferences
        .iter()
        .map(|p| p.as_str())
        .collect();
    render_list(
        builder,
        palette,
        "interaction-preferences",
        "Interaction Preferences",
        PREFERENCES_HEADER_Y + stride * accessibility.len() as f64,
        stride,
        &preferences,
    );
}

fn render_list(
    builder: &mut SvgBuilder,
    palette: &Palette,
    id: &str,
    title: &str,
    header_y: f64,
    stride: f64,
    items: &[&str],
) {
    if items.is_empty() {
        return;
    }

    builder.start_group(Some(id), "section", "");
    builder.add_raw(format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
        LEFT,
        header_y - 20.0,
        240.0,
        header_y - 20.0,
        palette.section_rule
    ));
    builder.add_text(title, LEFT, header_y, heading(&palette.text_primary), "heading");
    for (index, item) in items.iter().enumerate() {
        builder.add_text(
            &format!("\u{2022} {item}"),
            LEFT + 10.0,
            header_y + LIST_HEADER_GAP + stride * index as f64,
            body(&palette.text_secondary),
            "bullet",
        );
    }
    builder.end_group();
}

/// Escape text for element content and attribute values
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
