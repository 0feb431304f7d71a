//! Block Layout
//!
//! Block formatting context: children stack along the block axis of the
//! container's writing mode, adjacent margins collapse, and each child is
//! offered the container's full inline size.
//!
//! Also hosts [`BoxSizer`], the width/height resolution shared by every
//! layout mode (explicit sizes, intrinsic keywords, aspect ratio and
//! min/max clamping).

use crate::box_model::{BoxDimensions, Rect, Size, to_content_size};
use crate::constraints::Constraints;
use crate::context::LayoutContext;
use crate::intrinsic;
use crate::node::Node;
use crate::style::SizeValue;

// ============================================================================
// Box sizing
// ============================================================================

/// Content-box size before children are laid out
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Preliminary {
    pub width: f32,
    pub height: f32,
    /// Width came from the aspect ratio
    pub width_from_ratio: bool,
    /// Height came from the aspect ratio
    pub height_from_ratio: bool,
}

impl Preliminary {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Resolves a node's own width and height
#[derive(Debug, Clone)]
pub(crate) struct BoxSizer {
    pub dims: BoxDimensions,
    pub font_size: f32,
    /// Content-box space offered by the constraints (may be unbounded)
    pub available: Size,
    /// Content-box width fixed by style or tight constraints
    pub specified_width: Option<f32>,
    /// Content-box height fixed by style or tight constraints
    pub specified_height: Option<f32>,
    min: Size,
    max: Size,
    aspect_ratio: Option<f32>,
}

impl BoxSizer {
    pub fn new(node: &Node, constraints: Constraints, ctx: &LayoutContext) -> Self {
        let style = &node.style;
        let font_size = style.font_size_px(ctx);
        let dims = BoxDimensions::resolve(style, ctx, font_size);
        let pb_h = dims.padding_border_horizontal();
        let pb_v = dims.padding_border_vertical();

        let available = Size::new(
            (constraints.max_width - pb_h).max(0.0),
            (constraints.max_height - pb_v).max(0.0),
        );

        let resolve = |length: Option<crate::length::Length>, pb: f32| {
            length
                .map(|l| l.resolve(ctx, font_size))
                .filter(|px| !px.is_nan())
                .map(|px| to_content_size(px.max(0.0), style.box_sizing, pb))
        };

        let mut specified_width = match style.width {
            SizeValue::Auto => None,
            SizeValue::Fixed(_) => style
                .width
                .resolve_fixed(ctx, font_size)
                .map(|px| to_content_size(px, style.box_sizing, pb_h)),
            SizeValue::MinContent => Some(intrinsic::min_content_width(node, ctx) - pb_h),
            SizeValue::MaxContent => Some(intrinsic::max_content_width(node, ctx) - pb_h),
            SizeValue::FitContent(limit) => {
                let mut limit = limit.resolve(ctx, font_size);
                if !limit.is_finite() {
                    limit = constraints.max_width;
                }
                Some(intrinsic::fit_content_width(node, limit, ctx) - pb_h)
            }
        }
        .map(|w| w.max(0.0));

        // Intrinsic height keywords behave as auto
        let mut specified_height = style
            .height
            .resolve_fixed(ctx, font_size)
            .map(|px| to_content_size(px, style.box_sizing, pb_v));

        if constraints.min_width == constraints.max_width && constraints.max_width.is_finite() {
            specified_width = Some(available.width);
        }
        if constraints.min_height == constraints.max_height && constraints.max_height.is_finite() {
            specified_height = Some(available.height);
        }

        Self {
            dims,
            font_size,
            available,
            specified_width,
            specified_height,
            min: Size::new(
                resolve(style.min_width, pb_h).unwrap_or(0.0),
                resolve(style.min_height, pb_v).unwrap_or(0.0),
            ),
            max: Size::new(
                resolve(style.max_width, pb_h).unwrap_or(f32::INFINITY),
                resolve(style.max_height, pb_v).unwrap_or(f32::INFINITY),
            ),
            aspect_ratio: style.aspect_ratio(),
        }
    }

    pub fn padding_border(&self) -> Size {
        Size::new(self.dims.padding_border_horizontal(), self.dims.padding_border_vertical())
    }

    /// Size used to lay out children. Auto axes take the available space.
    pub fn preliminary(&self) -> Preliminary {
        let auto_w = self.specified_width.is_none();
        let auto_h = self.specified_height.is_none();
        let mut prelim = Preliminary {
            width: self.specified_width.unwrap_or(self.available.width),
            height: self.specified_height.unwrap_or(self.available.height),
            width_from_ratio: false,
            height_from_ratio: false,
        };

        if let Some(ratio) = self.aspect_ratio {
            match (auto_w, auto_h) {
                (true, true) => {
                    let avail = self.available;
                    if avail.width.is_finite() && avail.width > 0.0 {
                        prelim.width = avail.width;
                        prelim.height = avail.width / ratio;
                        if avail.height.is_finite() && prelim.height > avail.height {
                            prelim.height = avail.height;
                            prelim.width = avail.height * ratio;
                        }
                        prelim.width_from_ratio = true;
                        prelim.height_from_ratio = true;
                    } else if avail.height.is_finite() && avail.height > 0.0 {
                        prelim.height = avail.height;
                        prelim.width = avail.height * ratio;
                        prelim.width_from_ratio = true;
                        prelim.height_from_ratio = true;
                    }
                }
                (true, false) => {
                    prelim.width = prelim.height * ratio;
                    prelim.width_from_ratio = true;
                }
                (false, true) => {
                    prelim.height = prelim.width / ratio;
                    prelim.height_from_ratio = true;
                }
                (false, false) => {}
            }
        }

        self.clamp(&mut prelim);
        prelim
    }

    /// Apply min/max. A clamp on a ratio-derived axis recomputes the
    /// other axis only when that axis is ratio-derived as well.
    fn clamp(&self, prelim: &mut Preliminary) {
        let both_from_ratio = prelim.width_from_ratio && prelim.height_from_ratio;

        let width = clamp_min_max(prelim.width, self.min.width, self.max.width);
        if width != prelim.width && both_from_ratio {
            if let Some(ratio) = self.aspect_ratio {
                prelim.height = width / ratio;
            }
        }
        prelim.width = width;

        let height = clamp_min_max(prelim.height, self.min.height, self.max.height);
        if height != prelim.height && both_from_ratio {
            if let Some(ratio) = self.aspect_ratio {
                prelim.width = height * ratio;
            }
        }
        prelim.height = height;
    }

    /// Final border-box size: content-derived extents fill the auto
    /// axes, then padding and border are added and the result is
    /// clamped into the constraints.
    pub fn finish(&self, prelim: Preliminary, content: Size, constraints: Constraints) -> Size {
        let content_width = self.specified_width.is_none() && !prelim.width_from_ratio;
        let content_height = self.specified_height.is_none() && !prelim.height_from_ratio;

        let mut width = prelim.width;
        let mut height = prelim.height;
        if content_width {
            width = clamp_min_max(content.width, self.min.width, self.max.width);
        }
        if content_height {
            height = match self.aspect_ratio {
                Some(ratio) if content_width && width > 0.0 => width / ratio,
                _ => content.height,
            };
            height = clamp_min_max(height, self.min.height, self.max.height);
        }

        let pb = self.padding_border();
        constraints.constrain(Size::new(width + pb.width, height + pb.height))
    }
}

/// Clamp into [min, max]; min wins when they conflict
pub(crate) fn clamp_min_max(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

// ============================================================================
// Block formatting context
// ============================================================================

/// Block-axis cursor with margin collapsing
#[derive(Debug)]
pub struct BlockFormattingContext {
    /// Block-axis position of the next margin edge
    cursor: f32,
    /// Trailing margin of the previous child
    prev_margin_end: f32,
    /// No child placed yet
    first: bool,
}

impl BlockFormattingContext {
    pub fn new() -> Self {
        Self { cursor: 0.0, prev_margin_end: 0.0, first: true }
    }

    /// Place a child with the given block-axis margins and size.
    /// Returns the block-axis offset of its border box.
    pub fn place(&mut self, margin_start: f32, margin_end: f32, block_size: f32) -> f32 {
        let position = if self.first {
            self.cursor + margin_start
        } else {
            self.collapse_margins(margin_start)
        };
        self.first = false;
        self.cursor = position + block_size + margin_end;
        self.prev_margin_end = margin_end;
        position
    }

    /// Position after collapsing the previous trailing margin with `margin_start`
    fn collapse_margins(&self, margin_start: f32) -> f32 {
        self.cursor - self.prev_margin_end + self.prev_margin_end.max(margin_start)
    }

    /// Total block-axis extent used so far, including the last trailing margin
    pub fn extent(&self) -> f32 {
        self.cursor
    }
}

impl Default for BlockFormattingContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay out a block container and its children
pub fn layout_block(node: &mut Node, constraints: Constraints, ctx: &LayoutContext) -> Size {
    let sizer = BoxSizer::new(node, constraints, ctx);
    let prelim = sizer.preliminary();
    let mode = node.style.writing_mode;
    let block_axis = mode.block_axis();
    let inline_axis = mode.inline_axis();
    let inline_size = inline_axis.of(prelim.size());

    let mut bfc = BlockFormattingContext::new();
    let mut max_inline = 0.0f32;
    let mut placed = Vec::with_capacity(node.children.len());
    let mut in_flow = 0usize;

    for (index, child) in node.children.iter_mut().enumerate() {
        if !child.is_in_flow() {
            child.clear_rects();
            continue;
        }
        in_flow += 1;

        let margin = child.style.margin.resolve_signed(ctx, child.style.font_size_px(ctx));
        let (block_start, block_end) = mode.block_edges(&margin);
        let (inline_start, inline_end) = mode.inline_edges(&margin);

        let child_inline = (inline_size - inline_start - inline_end).max(0.0);
        let available = inline_axis.size(child_inline, f32::INFINITY);
        let size = crate::layout(child, Constraints::loose(available.width, available.height), ctx);

        let position = bfc.place(block_start, block_end, block_axis.of(size));
        max_inline = max_inline.max(inline_axis.of(size) + inline_start + inline_end);
        placed.push((index, position, inline_start));
    }

    let content_inline = if in_flow > 0 {
        max_inline
    } else if inline_size.is_finite() {
        inline_size
    } else {
        0.0
    };
    let content = block_axis.size(bfc.extent(), content_inline);
    let size = sizer.finish(prelim, content, constraints);

    let (origin_x, origin_y) = sizer.dims.content_origin();
    let content_width = size.width - sizer.padding_border().width;
    for (index, position, inline_start) in placed {
        let child = &mut node.children[index];
        let (x, y) = if !mode.is_vertical() {
            (inline_start, position)
        } else if mode.is_block_reversed() {
            (content_width - position - child.rect.width, inline_start)
        } else {
            (position, inline_start)
        };
        child.rect.x = origin_x + x;
        child.rect.y = origin_y + y;
    }

    node.rect = Rect::new(0.0, 0.0, size.width, size.height);
    size
}
