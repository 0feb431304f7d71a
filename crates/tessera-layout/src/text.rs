//! Text Leaves
//!
//! Greedy line breaking over whitespace-collapsed text, measured through
//! the context's [`TextMetrics`](crate::context::TextMetrics).

use crate::block::BoxSizer;
use crate::box_model::{BoxDimensions, Rect, Size};
use crate::constraints::Constraints;
use crate::context::{LayoutContext, TextStyle};
use crate::node::Node;
use crate::style::{Display, Style};

/// One broken line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub width: f32,
}

/// Text style of a node
pub fn text_style(style: &Style, ctx: &LayoutContext) -> TextStyle {
    TextStyle {
        font_size: style.font_size_px(ctx),
        line_height: style
            .line_height
            .filter(|lh| lh.is_finite() && *lh > 0.0)
            .unwrap_or(ctx.default_line_height),
        letter_spacing: 0.0,
    }
}

/// Break `text` into lines no wider than `max_width` where possible.
///
/// A single word wider than `max_width` gets a line of its own.
pub fn break_lines(text: &str, max_width: f32, style: &TextStyle, ctx: &LayoutContext) -> Vec<TextLine> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if ctx.measure_text(&candidate, style).width > max_width {
            let width = ctx.measure_text(&current, style).width;
            lines.push(TextLine { text: std::mem::take(&mut current), width });
            current.push_str(word);
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        let width = ctx.measure_text(&current, style).width;
        lines.push(TextLine { text: current, width });
    }

    lines
}

/// Width of the widest word
pub fn min_content_width(text: &str, style: &TextStyle, ctx: &LayoutContext) -> f32 {
    text.split_whitespace()
        .map(|word| ctx.measure_text(word, style).width)
        .fold(0.0, f32::max)
}

/// Width of the text on a single line
pub fn max_content_width(text: &str, style: &TextStyle, ctx: &LayoutContext) -> f32 {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return 0.0;
    }
    ctx.measure_text(&collapsed, style).width
}

/// Lay out a text leaf
pub fn layout_text(node: &mut Node, constraints: Constraints, ctx: &LayoutContext) -> Size {
    let sizer = BoxSizer::new(node, constraints, ctx);
    let prelim = sizer.preliminary();
    let style = text_style(&node.style, ctx);

    let text = node.text.as_deref().unwrap_or("");
    let lines = break_lines(text, prelim.width, &style, ctx);
    let width = lines.iter().map(|line| line.width).fold(0.0, f32::max);
    let height = lines.len().max(1) as f32 * style.line_height_px();

    let size = sizer.finish(prelim, Size::new(width, height), constraints);
    // Text leaves do not lay out children
    for child in &mut node.children {
        child.clear_rects();
    }
    node.rect = Rect::new(0.0, 0.0, size.width, size.height);
    size
}

/// Offset of the first baseline from the node's border-box top, for a
/// node that has been laid out
pub fn first_baseline(node: &Node, ctx: &LayoutContext) -> Option<f32> {
    match node.style.display {
        Display::None => None,
        Display::InlineText => {
            let style = text_style(&node.style, ctx);
            let font_size = node.style.font_size_px(ctx);
            let dims = BoxDimensions::resolve(&node.style, ctx, font_size);
            let first_word = node.text.as_deref().and_then(|t| t.split_whitespace().next()).unwrap_or("");
            let metrics = ctx.measure_text(first_word, &style);
            let half_leading = (style.line_height_px() - metrics.ascent - metrics.descent) / 2.0;
            Some(dims.border.top + dims.padding.top + half_leading + metrics.ascent)
        }
        _ => node
            .children
            .iter()
            .filter(|child| child.is_in_flow())
            .find_map(|child| first_baseline(child, ctx).map(|b| child.rect.y + b)),
    }
}
