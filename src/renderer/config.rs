//! Card geometry and output formatting

/// How a persona card is sized and serialized
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Card width in user units
    pub width: f64,

    /// Card height with every optional list empty
    ///
    /// Reserves room for the cultural context block and both list headers.
    pub base_height: f64,

    /// Vertical distance between list items; each accessibility need or
    /// interaction preference adds exactly this much height
    pub item_stride: f64,

    /// Emit an `<?xml ...?>` declaration before the root element
    pub standalone: bool,

    /// One element per line, indented by group depth
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "persona-" for "persona-bullet")
    pub class_prefix: Option<String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            base_height: 845.0,
            item_stride: 22.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("persona-".to_string()),
        }
    }
}

impl SvgConfig {
    /// 300 × 845 card with a 22-unit list stride
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the height used when no optional list items are present
    pub fn with_base_height(mut self, height: f64) -> Self {
        self.base_height = height;
        self
    }

    /// Set the per-item stride of the optional lists
    pub fn with_item_stride(mut self, stride: f64) -> Self {
        self.item_stride = stride;
        self
    }

    /// Toggle the XML declaration
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Toggle line breaks and indentation
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Prefix every generated class name
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Emit bare class names
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Card height for the given number of optional list items
    pub fn height_for(&self, list_items: usize) -> f64 {
        self.base_height + self.item_stride * list_items as f64
    }
}
