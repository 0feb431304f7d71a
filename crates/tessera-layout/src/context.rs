//! Layout Context
//!
//! Call-scoped resolution state threaded through the layout recursion:
//! viewport size, root font size, and the pluggable text measurement
//! capability. Nothing here is global or mutated during layout.

use std::fmt;
use std::sync::Arc;

use crate::box_model::Size;

/// Font parameters handed to a [`TextMetrics`] implementation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels
    pub font_size: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
    /// Extra advance between characters, in pixels
    pub letter_spacing: f32,
}

impl TextStyle {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            line_height: DEFAULT_LINE_HEIGHT,
            letter_spacing: 0.0,
        }
    }

    /// Line height in pixels
    pub fn line_height_px(&self) -> f32 {
        self.font_size * self.line_height
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_FONT_SIZE)
    }
}

/// Result of measuring a run of text
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMeasurement {
    /// Advance width
    pub width: f32,
    /// Distance from baseline to the top of the line box
    pub ascent: f32,
    /// Distance from baseline to the bottom of the line box
    pub descent: f32,
}

/// Text measurement capability.
///
/// Implementations must tolerate concurrent reads when a context is
/// shared across threads. Any `Fn(&str, &TextStyle) -> TextMeasurement`
/// closure works as well.
pub trait TextMetrics {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMeasurement;
}

impl<F> TextMetrics for F
where
    F: Fn(&str, &TextStyle) -> TextMeasurement,
{
    fn measure(&self, text: &str, style: &TextStyle) -> TextMeasurement {
        self(text, style)
    }
}

/// Fixed-advance approximation used when no metrics are supplied:
/// every character is 0.6em wide, ascent 0.8em, descent 0.2em.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMetrics;

impl TextMetrics for ApproximateMetrics {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMeasurement {
        let chars = text.chars().count();
        let mut width = chars as f32 * style.font_size * 0.6;
        if chars > 1 {
            width += (chars - 1) as f32 * style.letter_spacing;
        }
        TextMeasurement {
            width,
            ascent: style.font_size * 0.8,
            descent: style.font_size * 0.2,
        }
    }
}

const DEFAULT_ROOT_FONT_SIZE: f32 = 16.0;
const DEFAULT_LINE_HEIGHT: f32 = 1.2;

/// Layout configuration defaults
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Font size that `rem` resolves against
    pub root_font_size: f32,
    /// Viewport used when the outer constraints are unbounded
    pub fallback_viewport: Size,
    /// Character whose advance defines `1ch`
    pub ch_reference_char: char,
    /// Line height multiplier for text without an explicit one
    pub default_line_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_font_size: DEFAULT_ROOT_FONT_SIZE,
            fallback_viewport: Size::new(800.0, 600.0),
            ch_reference_char: '0',
            default_line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

/// Resolution context for a single layout call
#[derive(Clone)]
pub struct LayoutContext {
    /// Drives `vw`, `vmin` and `vmax`
    pub viewport_width: f32,
    /// Drives `vh`, `vmin` and `vmax`
    pub viewport_height: f32,
    /// Drives `rem`
    pub root_font_size: f32,
    /// Drives `ch`
    pub ch_reference_char: char,
    /// Line height multiplier for text leaves
    pub default_line_height: f32,
    text_metrics: Option<Arc<dyn TextMetrics + Send + Sync>>,
}

impl LayoutContext {
    /// Create a context with no text metrics
    pub fn new(viewport_width: f32, viewport_height: f32, root_font_size: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            root_font_size,
            ch_reference_char: '0',
            default_line_height: DEFAULT_LINE_HEIGHT,
            text_metrics: None,
        }
    }

    /// Create a context from configuration, using its fallback viewport
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            viewport_width: config.fallback_viewport.width,
            viewport_height: config.fallback_viewport.height,
            root_font_size: config.root_font_size,
            ch_reference_char: config.ch_reference_char,
            default_line_height: config.default_line_height,
            text_metrics: None,
        }
    }

    pub fn with_text_metrics(mut self, metrics: impl TextMetrics + Send + Sync + 'static) -> Self {
        self.text_metrics = Some(Arc::new(metrics));
        self
    }

    /// Share an already reference-counted metrics implementation
    pub fn with_shared_text_metrics(mut self, metrics: Arc<dyn TextMetrics + Send + Sync>) -> Self {
        self.text_metrics = Some(metrics);
        self
    }

    pub fn with_ch_reference_char(mut self, ch: char) -> Self {
        self.ch_reference_char = ch;
        self
    }

    pub fn with_root_font_size(mut self, size: f32) -> Self {
        self.root_font_size = size;
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Whether a metrics capability was supplied
    pub fn has_text_metrics(&self) -> bool {
        self.text_metrics.is_some()
    }

    /// Measure text with the supplied metrics, or [`ApproximateMetrics`]
    pub fn measure_text(&self, text: &str, style: &TextStyle) -> TextMeasurement {
        match &self.text_metrics {
            Some(metrics) => metrics.measure(text, style),
            None => ApproximateMetrics.measure(text, style),
        }
    }

    /// Advance width of the `ch` reference character
    pub fn ch_advance(&self, font_size: f32) -> f32 {
        let fallback = font_size * 0.6;
        let Some(metrics) = &self.text_metrics else {
            return fallback;
        };

        let mut buf = [0u8; 4];
        let reference = self.ch_reference_char.encode_utf8(&mut buf);
        let width = metrics.measure(reference, &TextStyle::new(font_size)).width;
        if width > 0.0 && width.is_finite() { width } else { fallback }
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl fmt::Debug for LayoutContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutContext")
            .field("viewport_width", &self.viewport_width)
            .field("viewport_height", &self.viewport_height)
            .field("root_font_size", &self.root_font_size)
            .field("ch_reference_char", &self.ch_reference_char)
            .field("text_metrics", &self.text_metrics.is_some())
            .finish()
    }
}
