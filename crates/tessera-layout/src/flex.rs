//! Flexbox Layout
//!
//! Implements CSS Flexible Box Layout Module Level 1.
//! https://www.w3.org/TR/css-flexbox-1/
//!
//! Items are measured, collected into lines, flexed along the main axis,
//! then aligned on the cross axis. The main axis is horizontal for row
//! directions in horizontal writing modes and swaps in vertical ones.

use crate::block::BoxSizer;
use crate::box_model::{Rect, Size};
use crate::constraints::Constraints;
use crate::context::LayoutContext;
use crate::node::Node;
use crate::style::{AlignContent, AlignItems, FlexBasis, FlexWrap, JustifyContent, SizeValue, Style};
use crate::text;
use crate::writing_mode::Axis;

// ============================================================================
// Free space distribution
// ============================================================================

/// How free space is spread around a run of boxes (flex items, flex
/// lines or grid tracks)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Distribution {
    #[default]
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl From<JustifyContent> for Distribution {
    fn from(value: JustifyContent) -> Self {
        match value {
            JustifyContent::FlexStart => Self::Start,
            JustifyContent::FlexEnd => Self::End,
            JustifyContent::Center => Self::Center,
            JustifyContent::SpaceBetween => Self::SpaceBetween,
            JustifyContent::SpaceAround => Self::SpaceAround,
            JustifyContent::SpaceEvenly => Self::SpaceEvenly,
        }
    }
}

impl From<AlignContent> for Distribution {
    fn from(value: AlignContent) -> Self {
        match value {
            AlignContent::Stretch | AlignContent::FlexStart => Self::Start,
            AlignContent::FlexEnd => Self::End,
            AlignContent::Center => Self::Center,
            AlignContent::SpaceBetween => Self::SpaceBetween,
            AlignContent::SpaceAround => Self::SpaceAround,
            AlignContent::SpaceEvenly => Self::SpaceEvenly,
        }
    }
}

/// (leading offset, extra space between neighbours) for `count` boxes
/// sharing `free` space.
///
/// Negative free space falls back to start for `space-between` and to
/// center for `space-around` / `space-evenly`.
pub fn distribute(free: f32, count: usize, distribution: Distribution) -> (f32, f32) {
    if count == 0 || !free.is_finite() {
        return (0.0, 0.0);
    }
    let n = count as f32;
    match distribution {
        Distribution::Start => (0.0, 0.0),
        Distribution::End => (free, 0.0),
        Distribution::Center => (free / 2.0, 0.0),
        Distribution::SpaceBetween if free > 0.0 && count > 1 => (0.0, free / (n - 1.0)),
        Distribution::SpaceBetween => (0.0, 0.0),
        Distribution::SpaceAround if free > 0.0 => (free / n / 2.0, free / n),
        Distribution::SpaceEvenly if free > 0.0 => (free / (n + 1.0), free / (n + 1.0)),
        Distribution::SpaceAround | Distribution::SpaceEvenly => (free / 2.0, 0.0),
    }
}

// ============================================================================
// Lines
// ============================================================================

/// A flex item during layout
#[derive(Debug, Clone)]
struct FlexLineItem {
    /// Index into the container's children
    index: usize,
    base_main_size: f32,
    measured_main: f32,
    main_size: f32,
    cross_size: f32,
    /// (start, end) margins along the main axis
    margin_main: (f32, f32),
    /// (start, end) margins along the cross axis
    margin_cross: (f32, f32),
    grow: f32,
    shrink: f32,
    align: AlignItems,
    /// Auto cross size without an aspect ratio
    stretchable: bool,
    baseline: f32,
}

impl FlexLineItem {
    fn outer_main(&self, size: f32) -> f32 {
        size + self.margin_main.0 + self.margin_main.1
    }

    fn outer_cross(&self) -> f32 {
        self.cross_size + self.margin_cross.0 + self.margin_cross.1
    }
}

/// A flex line
#[derive(Debug, Clone, Default)]
struct FlexLine {
    items: Vec<FlexLineItem>,
    cross_size: f32,
    cross_offset: f32,
    /// Distance from the line's cross start to the shared baseline
    baseline: f32,
}

impl FlexLine {
    /// Outer main size of the items plus gaps
    fn main_extent(&self, gap: f32) -> f32 {
        let gaps = gap * self.items.len().saturating_sub(1) as f32;
        self.items.iter().map(|i| i.outer_main(i.main_size)).sum::<f32>() + gaps
    }
}

/// Break items into lines at their hypothetical outer main sizes
fn build_flex_lines(items: Vec<FlexLineItem>, wrap: bool, container_main: f32, gap: f32) -> Vec<FlexLine> {
    let mut lines = Vec::new();
    let mut current = FlexLine::default();
    let mut line_main = 0.0;

    for item in items {
        let outer = item.outer_main(item.base_main_size);
        if wrap && !current.items.is_empty() && line_main + gap + outer > container_main {
            lines.push(std::mem::take(&mut current));
            line_main = 0.0;
        }
        line_main += if current.items.is_empty() { outer } else { gap + outer };
        current.items.push(item);
    }

    if !current.items.is_empty() {
        lines.push(current);
    }
    lines
}

/// Grow or shrink the items of a line to fill `container_main`
fn resolve_flexible_lengths(line: &mut FlexLine, container_main: f32, gap: f32) {
    let total_gap = gap * line.items.len().saturating_sub(1) as f32;
    let used: f32 = line.items.iter().map(|i| i.outer_main(i.base_main_size)).sum();
    let free_space = container_main - total_gap - used;

    for item in &mut line.items {
        item.main_size = item.base_main_size;
    }

    if free_space > 0.0 {
        let total_grow: f32 = line.items.iter().map(|i| i.grow).sum();
        if total_grow > 0.0 {
            for item in &mut line.items {
                item.main_size = item.base_main_size + free_space * item.grow / total_grow;
            }
        }
    } else if free_space < 0.0 {
        // Larger items give up proportionally more
        let total_shrink: f32 = line.items.iter().map(|i| i.shrink * i.base_main_size).sum();
        if total_shrink > 0.0 {
            for item in &mut line.items {
                let ratio = item.shrink * item.base_main_size / total_shrink;
                item.main_size = (item.base_main_size + free_space * ratio).max(0.0);
            }
        }
    }
}

/// Flex base size: the basis, else the measured size, else the
/// explicit main size
fn flex_base_size(basis: FlexBasis, measured: f32, explicit: Option<f32>, ctx: &LayoutContext, font_size: f32) -> f32 {
    let from_basis = match basis {
        FlexBasis::Length(length) => length.resolve(ctx, font_size),
        FlexBasis::Auto | FlexBasis::Content => measured,
    };
    [from_basis, measured, explicit.unwrap_or(0.0)]
        .into_iter()
        .find(|size| size.is_finite() && *size >= 0.0)
        .unwrap_or(0.0)
}

fn size_along(style: &Style, axis: Axis) -> SizeValue {
    match axis {
        Axis::Horizontal => style.width,
        Axis::Vertical => style.height,
    }
}

/// Constraints with per-axis (min, max) given along `main` and its cross axis
fn axis_constraints(main: Axis, main_range: (f32, f32), cross_range: (f32, f32)) -> Constraints {
    match main {
        Axis::Horizontal => Constraints::new(main_range.0, main_range.1, cross_range.0, cross_range.1),
        Axis::Vertical => Constraints::new(cross_range.0, cross_range.1, main_range.0, main_range.1),
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Lay out a flex container and its items
pub fn layout_flexbox(node: &mut Node, constraints: Constraints, ctx: &LayoutContext) -> Size {
    let sizer = BoxSizer::new(node, constraints, ctx);
    let prelim = sizer.preliminary();
    let font_size = sizer.font_size;
    let style = &node.style;
    let mode = style.writing_mode;

    let main_axis = if style.flex_direction.is_row() { mode.inline_axis() } else { mode.block_axis() };
    let cross_axis = main_axis.cross();
    let reversed = style.flex_direction.is_reversed();
    let wrap = style.flex_wrap != FlexWrap::Nowrap;
    let wrap_reverse = style.flex_wrap == FlexWrap::WrapReverse;
    let justify = Distribution::from(style.justify_content);
    let align_items = style.align_items;
    let align_content = style.align_content;

    let (column_gap, row_gap) = (style.column_gap_px(ctx, font_size), style.row_gap_px(ctx, font_size));
    let (main_gap, cross_gap) =
        if main_axis == mode.inline_axis() { (column_gap, row_gap) } else { (row_gap, column_gap) };

    let container_main = main_axis.of(prelim.size());
    let container_cross = cross_axis.of(prelim.size());
    let main_definite = container_main.is_finite();
    let cross_definite = container_cross.is_finite();

    let mut order: Vec<usize> = (0..node.children.len()).filter(|&i| node.children[i].is_in_flow()).collect();
    order.sort_by_key(|&i| node.children[i].style.order);

    // Hypothetical sizes
    let mut items = Vec::with_capacity(order.len());
    for index in order {
        let child = &mut node.children[index];
        let child_font = child.style.font_size_px(ctx);
        let margin = child.style.margin.resolve_signed(ctx, child_font);
        let margin_main = main_axis.edges(&margin);
        let margin_cross = cross_axis.edges(&margin);

        let provisional_main = if !wrap && main_definite {
            (container_main - margin_main.0 - margin_main.1).max(0.0)
        } else {
            f32::INFINITY
        };
        let provisional_cross = if cross_definite {
            (container_cross - margin_cross.0 - margin_cross.1).max(0.0)
        } else {
            f32::INFINITY
        };

        let measured = crate::layout(
            child,
            axis_constraints(main_axis, (0.0, provisional_main), (0.0, provisional_cross)),
            ctx,
        );
        let measured_main = main_axis.of(measured);
        let explicit_main = size_along(&child.style, main_axis).resolve_fixed(ctx, child_font);
        let base_main_size = flex_base_size(child.style.flex_basis, measured_main, explicit_main, ctx, child_font);

        items.push(FlexLineItem {
            index,
            base_main_size,
            measured_main,
            main_size: base_main_size,
            cross_size: cross_axis.of(measured),
            margin_main,
            margin_cross,
            grow: child.style.flex_grow.max(0.0),
            shrink: child.style.flex_shrink.max(0.0),
            align: child.style.align_self.unwrap_or(align_items),
            stretchable: size_along(&child.style, cross_axis).is_auto() && child.style.aspect_ratio().is_none(),
            baseline: 0.0,
        });
    }

    let mut lines = build_flex_lines(items, wrap && main_definite, container_main, main_gap);

    // Flex, then re-measure the cross size of items whose main size changed
    for line in &mut lines {
        if main_definite {
            resolve_flexible_lengths(line, container_main, main_gap);
        }

        for item in &mut line.items {
            let child = &mut node.children[item.index];
            if (item.main_size - item.measured_main).abs() > 1e-3 {
                let cross_max = if cross_definite {
                    (container_cross - item.margin_cross.0 - item.margin_cross.1).max(0.0)
                } else {
                    f32::INFINITY
                };
                let size = crate::layout(
                    child,
                    axis_constraints(main_axis, (item.main_size, item.main_size), (0.0, cross_max)),
                    ctx,
                );
                item.cross_size = cross_axis.of(size);
            }
            if item.align == AlignItems::Baseline && cross_axis == Axis::Vertical {
                item.baseline = text::first_baseline(child, ctx).unwrap_or(item.cross_size);
            }
        }

        line.cross_size = line.items.iter().map(FlexLineItem::outer_cross).fold(0.0, f32::max);

        let baseline_items = || {
            line.items
                .iter()
                .filter(|i| i.align == AlignItems::Baseline && cross_axis == Axis::Vertical)
        };
        let above = baseline_items().map(|i| i.margin_cross.0 + i.baseline).fold(0.0, f32::max);
        let below = baseline_items()
            .map(|i| i.cross_size - i.baseline + i.margin_cross.1)
            .fold(0.0, f32::max);
        line.baseline = above;
        line.cross_size = line.cross_size.max(above + below);
    }

    // Cross sizes and offsets of the lines
    if lines.len() == 1 && cross_definite {
        lines[0].cross_size = lines[0].cross_size.max(container_cross);
    }

    let line_count = lines.len();
    let lines_extent = |lines: &[FlexLine]| {
        lines.iter().map(|l| l.cross_size).sum::<f32>() + cross_gap * line_count.saturating_sub(1) as f32
    };

    let (leading, between) = if line_count > 1 && wrap && cross_definite {
        let free = (container_cross - lines_extent(&lines)).max(0.0);
        if align_content == AlignContent::Stretch {
            let extra = free / line_count as f32;
            for line in &mut lines {
                line.cross_size += extra;
            }
            (0.0, 0.0)
        } else {
            distribute(free, line_count, Distribution::from(align_content))
        }
    } else {
        (0.0, 0.0)
    };

    let mut cursor = leading;
    for line in &mut lines {
        line.cross_offset = cursor;
        cursor += line.cross_size + cross_gap + between;
    }

    let cross_extent = lines_extent(&lines);
    if wrap_reverse && line_count > 1 {
        let mirror = if cross_definite { container_cross } else { cross_extent };
        for line in &mut lines {
            line.cross_offset = mirror - (line.cross_offset + line.cross_size);
        }
    }

    // Main-axis positions, cross alignment and final item layout
    let (origin_x, origin_y) = sizer.dims.content_origin();
    let mut main_extent = 0.0f32;

    for line in &lines {
        let used = line.main_extent(main_gap);
        let extent = if main_definite { container_main } else { used };
        main_extent = main_extent.max(extent);

        let free = if main_definite { container_main - used } else { 0.0 };
        let (leading, between) = distribute(free, line.items.len(), justify);

        let mut cursor = leading;
        for item in &line.items {
            // Reversed lines are packed from the end, so the end margin leads
            let (lead, trail) =
                if reversed { (item.margin_main.1, item.margin_main.0) } else { item.margin_main };
            let mut main_pos = cursor + lead;
            cursor = main_pos + item.main_size + trail + main_gap + between;
            if reversed {
                main_pos = extent - main_pos - item.main_size;
            }

            let (cross_start, cross_end) = item.margin_cross;
            let mut cross_size = item.cross_size;
            let cross_pos = match item.align {
                AlignItems::Stretch if item.stretchable => {
                    cross_size = (line.cross_size - cross_start - cross_end).max(0.0);
                    cross_start
                }
                AlignItems::FlexEnd => line.cross_size - item.cross_size - cross_end,
                AlignItems::Center => (line.cross_size - item.outer_cross()) / 2.0 + cross_start,
                AlignItems::Baseline if cross_axis == Axis::Vertical => line.baseline - item.baseline,
                AlignItems::Stretch | AlignItems::FlexStart | AlignItems::Baseline => cross_start,
            };

            let child = &mut node.children[item.index];
            let size = main_axis.size(item.main_size, cross_size);
            crate::layout(child, Constraints::tight(size.width, size.height), ctx);

            let position = main_axis.size(main_pos, line.cross_offset + cross_pos);
            child.rect.x = origin_x + position.width;
            child.rect.y = origin_y + position.height;
        }
    }

    for child in node.children.iter_mut().filter(|c| !c.is_in_flow()) {
        child.clear_rects();
    }

    let size = sizer.finish(prelim, main_axis.size(main_extent, cross_extent), constraints);
    node.rect = Rect::new(0.0, 0.0, size.width, size.height);
    size
}
