//! Intrinsic Sizing
//!
//! Min-content and max-content border-box widths, computed bottom-up
//! without running layout.
//!
//! Intrinsic heights are not computed; `min-content`, `max-content` and
//! `fit-content` heights resolve as auto.

use crate::box_model::{BoxDimensions, to_content_size};
use crate::context::LayoutContext;
use crate::grid;
use crate::node::Node;
use crate::style::{Display, SizeValue};
use crate::text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Min,
    Max,
}

/// Narrowest border-box width the node can take without overflow
pub fn min_content_width(node: &Node, ctx: &LayoutContext) -> f32 {
    intrinsic_width(node, ctx, Mode::Min)
}

/// Border-box width the node takes with unlimited space
pub fn max_content_width(node: &Node, ctx: &LayoutContext) -> f32 {
    intrinsic_width(node, ctx, Mode::Max)
}

/// `min(max-content, max(min-content, limit))`
pub fn fit_content_width(node: &Node, limit: f32, ctx: &LayoutContext) -> f32 {
    let min = min_content_width(node, ctx);
    let max = max_content_width(node, ctx);
    max.min(limit.max(min))
}

fn intrinsic_width(node: &Node, ctx: &LayoutContext, mode: Mode) -> f32 {
    let style = &node.style;
    if style.display == Display::None {
        return 0.0;
    }

    let font_size = style.font_size_px(ctx);
    let dims = BoxDimensions::resolve(style, ctx, font_size);
    let pb = dims.padding_border_horizontal();

    let mode = match style.width {
        SizeValue::Fixed(_) => {
            if let Some(px) = style.width.resolve_fixed(ctx, font_size) {
                return to_content_size(px, style.box_sizing, pb) + pb;
            }
            mode
        }
        SizeValue::MinContent => Mode::Min,
        SizeValue::MaxContent => Mode::Max,
        SizeValue::FitContent(_) | SizeValue::Auto => mode,
    };

    if let (Some(ratio), Some(height)) = (style.aspect_ratio(), style.height.resolve_fixed(ctx, font_size)) {
        let height = to_content_size(height, style.box_sizing, dims.padding_border_vertical());
        return height * ratio + pb;
    }

    let content = match style.display {
        Display::InlineText => {
            let text = node.text.as_deref().unwrap_or("");
            let text_style = text::text_style(style, ctx);
            match mode {
                Mode::Min => text::min_content_width(text, &text_style, ctx),
                Mode::Max => text::max_content_width(text, &text_style, ctx),
            }
        }
        Display::Flex => {
            let main_horizontal = style.flex_direction.is_row() != style.writing_mode.is_vertical();
            if main_horizontal {
                let gap = style.column_gap_px(ctx, font_size);
                let widths = outer_widths(node, ctx, mode);
                match mode {
                    // Wrapping lets every item sit on its own line
                    Mode::Min if style.flex_wrap != crate::style::FlexWrap::Nowrap => {
                        widths.iter().copied().fold(0.0, f32::max)
                    }
                    _ => sum_with_gaps(&widths, gap),
                }
            } else {
                outer_widths(node, ctx, mode).into_iter().fold(0.0, f32::max)
            }
        }
        Display::Grid if !style.writing_mode.is_vertical() => grid_columns_width(node, ctx, mode, font_size),
        Display::Block if style.writing_mode.is_vertical() => outer_widths(node, ctx, mode).iter().sum(),
        _ => outer_widths(node, ctx, mode).into_iter().fold(0.0, f32::max),
    };

    let resolve = |length: Option<crate::length::Length>| {
        length
            .map(|l| l.resolve(ctx, font_size))
            .filter(|px| !px.is_nan())
            .map(|px| to_content_size(px.max(0.0), style.box_sizing, pb))
    };
    let min = resolve(style.min_width).unwrap_or(0.0);
    let max = resolve(style.max_width).unwrap_or(f32::INFINITY);

    content.min(max).max(min) + pb
}

/// Intrinsic widths of in-flow children plus their horizontal margins
fn outer_widths(node: &Node, ctx: &LayoutContext, mode: Mode) -> Vec<f32> {
    node.children
        .iter()
        .filter(|child| child.is_in_flow())
        .map(|child| outer_width(child, ctx, mode))
        .collect()
}

fn outer_width(child: &Node, ctx: &LayoutContext, mode: Mode) -> f32 {
    let margin = child.style.margin.resolve_signed(ctx, child.style.font_size_px(ctx));
    (intrinsic_width(child, ctx, mode) + margin.horizontal()).max(0.0)
}

fn sum_with_gaps(widths: &[f32], gap: f32) -> f32 {
    let gaps = widths.len().saturating_sub(1) as f32 * gap;
    widths.iter().sum::<f32>() + gaps
}

/// Sum of column tracks sized from single-column items
fn grid_columns_width(node: &Node, ctx: &LayoutContext, mode: Mode, font_size: f32) -> f32 {
    let placement = grid::place_items(node);
    let mut widths: Vec<f32> = placement
        .columns
        .iter()
        .map(|track| {
            let track = track.resolve(ctx, font_size);
            if track.is_fixed() { track.min } else { track.min_or_zero() }
        })
        .collect();

    for item in &placement.items {
        let area = item.area;
        if area.column_span() != 1 {
            continue;
        }
        let track = placement.columns[area.column_start].resolve(ctx, font_size);
        if track.is_fixed() {
            continue;
        }
        let contribution = outer_width(&node.children[item.index], ctx, mode);
        let width = &mut widths[area.column_start];
        *width = width.max(contribution.min(track.max));
    }

    sum_with_gaps(&widths, node.style.column_gap_px(ctx, font_size))
}
