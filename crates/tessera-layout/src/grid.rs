//! CSS Grid Layout
//!
//! Two-axis track layout: items are placed on grid lines (explicitly, by
//! named area, or by auto-placement), tracks are sized from fixed sizes,
//! item content and fractional shares of the remaining space, and each
//! item is aligned inside the cell run it spans.

use crate::block::BoxSizer;
use crate::box_model::{Rect, Size};
use crate::constraints::Constraints;
use crate::context::LayoutContext;
use crate::flex::{Distribution, distribute};
use crate::length::Length;
use crate::node::Node;
use crate::style::{AlignItems, GridAutoFlow, SizeValue};
use crate::writing_mode::Axis;

// ============================================================================
// Track definitions
// ============================================================================

/// A track size: `minmax(min, max)`, or a fractional share when
/// `fraction > 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTrack {
    pub min: Length,
    pub max: Length,
    pub fraction: f32,
}

impl GridTrack {
    /// Track of exactly `size`
    pub const fn fixed(size: Length) -> Self {
        Self { min: size, max: size, fraction: 0.0 }
    }

    pub const fn px(size: f32) -> Self {
        Self::fixed(Length::px(size))
    }

    /// Content-sized track
    pub const fn auto() -> Self {
        Self { min: Length::ZERO, max: Length::UNBOUNDED, fraction: 0.0 }
    }

    /// `<n>fr`
    pub const fn fr(fraction: f32) -> Self {
        Self { min: Length::ZERO, max: Length::UNBOUNDED, fraction }
    }

    pub const fn minmax(min: Length, max: Length) -> Self {
        Self { min, max, fraction: 0.0 }
    }

    pub fn is_auto(&self) -> bool {
        self.fraction <= 0.0 && self.min == Length::ZERO && self.max.is_unbounded()
    }

    pub fn is_flexible(&self) -> bool {
        self.fraction > 0.0
    }

    /// Resolve both bounds to pixels. A max below the min collapses to
    /// the min.
    pub fn resolve(&self, ctx: &LayoutContext, font_size: f32) -> ResolvedTrack {
        let min = self.min.resolve(ctx, font_size);
        let min = if min.is_finite() { min.max(0.0) } else { 0.0 };
        let max = self.max.resolve(ctx, font_size);
        let max = if max.is_nan() { f32::INFINITY } else { max.max(min) };
        let fraction = if self.fraction.is_finite() { self.fraction.max(0.0) } else { 0.0 };
        ResolvedTrack { min, max, fraction }
    }
}

impl Default for GridTrack {
    fn default() -> Self {
        Self::auto()
    }
}

/// Track bounds in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTrack {
    pub min: f32,
    pub max: f32,
    pub fraction: f32,
}

impl ResolvedTrack {
    pub fn is_flexible(&self) -> bool {
        self.fraction > 0.0
    }

    pub fn is_fixed(&self) -> bool {
        !self.is_flexible() && self.min == self.max && self.max.is_finite()
    }

    pub fn min_or_zero(&self) -> f32 {
        if self.min.is_finite() { self.min } else { 0.0 }
    }
}

// ============================================================================
// Placement
// ============================================================================

/// Grid line reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GridLine {
    /// Auto placement
    #[default]
    Auto,
    /// Line number (1-indexed; negative counts back from the last
    /// explicit line)
    Line(i32),
    /// Span count
    Span(u32),
}

/// Item placement as written in its style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridPlacement {
    pub column_start: GridLine,
    pub column_end: GridLine,
    pub row_start: GridLine,
    pub row_end: GridLine,
}

impl GridPlacement {
    /// Placement for a single cell
    pub fn cell(column: i32, row: i32) -> Self {
        Self {
            column_start: GridLine::Line(column),
            column_end: GridLine::Line(column + 1),
            row_start: GridLine::Line(row),
            row_end: GridLine::Line(row + 1),
        }
    }

    /// Placement spanning columns
    pub fn span_columns(column: i32, span: u32, row: i32) -> Self {
        Self {
            column_start: GridLine::Line(column),
            column_end: GridLine::Span(span),
            row_start: GridLine::Line(row),
            row_end: GridLine::Line(row + 1),
        }
    }

    /// Placement spanning rows
    pub fn span_rows(column: i32, row: i32, span: u32) -> Self {
        Self {
            column_start: GridLine::Line(column),
            column_end: GridLine::Line(column + 1),
            row_start: GridLine::Line(row),
            row_end: GridLine::Span(span),
        }
    }

    /// Auto-placed, spanning `columns` x `rows`
    pub fn auto_span(columns: u32, rows: u32) -> Self {
        Self {
            column_start: GridLine::Auto,
            column_end: GridLine::Span(columns),
            row_start: GridLine::Auto,
            row_end: GridLine::Span(rows),
        }
    }
}

/// Resolved cell run, 0-indexed with exclusive ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridArea {
    pub column_start: usize,
    pub column_end: usize,
    pub row_start: usize,
    pub row_end: usize,
}

impl GridArea {
    pub fn column_span(&self) -> usize {
        self.column_end.saturating_sub(self.column_start)
    }

    pub fn row_span(&self) -> usize {
        self.row_end.saturating_sub(self.row_start)
    }

    pub fn overlaps(&self, other: &GridArea) -> bool {
        self.row_start < other.row_end
            && other.row_start < self.row_end
            && self.column_start < other.column_end
            && other.column_start < self.column_end
    }
}

/// A child and the area it occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedItem {
    /// Index into the container's children
    pub index: usize,
    pub area: GridArea,
}

/// Placement result, with track lists grown to cover every item
#[derive(Debug, Clone)]
pub struct Placement {
    pub items: Vec<PlacedItem>,
    pub rows: Vec<GridTrack>,
    pub columns: Vec<GridTrack>,
}

/// One axis of an item's placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisPlacement {
    Definite { start: usize, end: usize },
    Auto { span: usize },
}

impl AxisPlacement {
    fn span(&self) -> usize {
        match *self {
            Self::Definite { start, end } => end - start,
            Self::Auto { span } => span,
        }
    }

    fn start(&self) -> Option<usize> {
        match *self {
            Self::Definite { start, .. } => Some(start),
            Self::Auto { .. } => None,
        }
    }
}

/// Largest line index and span honored; larger values are clamped so
/// the implicit grid stays bounded
pub const MAX_GRID_LINE: usize = 10_000;

/// 0-based line index, or None for the invalid line 0
fn line_index(line: i32, explicit_tracks: usize) -> Option<usize> {
    let index = match line {
        0 => return None,
        n if n > 0 => i64::from(n) - 1,
        n => explicit_tracks as i64 + 1 + i64::from(n),
    };
    Some(index.clamp(0, MAX_GRID_LINE as i64) as usize)
}

fn resolve_axis(start: GridLine, end: GridLine, explicit_tracks: usize) -> AxisPlacement {
    let line = |l: GridLine| match l {
        GridLine::Line(n) => line_index(n, explicit_tracks),
        _ => None,
    };
    let span = |l: GridLine| match l {
        GridLine::Span(n) => Some((n as usize).clamp(1, MAX_GRID_LINE)),
        _ => None,
    };

    match (line(start), line(end)) {
        (Some(s), Some(e)) => {
            let (s, e) = (s.min(e), s.max(e));
            AxisPlacement::Definite { start: s, end: e.max(s + 1) }
        }
        (Some(s), None) => AxisPlacement::Definite { start: s, end: s + span(end).unwrap_or(1) },
        (None, Some(e)) => {
            let s = e.saturating_sub(span(start).unwrap_or(1));
            AxisPlacement::Definite { start: s, end: e.max(s + 1) }
        }
        (None, None) => AxisPlacement::Auto { span: span(start).or(span(end)).unwrap_or(1) },
    }
}

/// Resolve every in-flow child of a grid container to a grid area
pub fn place_items(node: &Node) -> Placement {
    let style = &node.style;
    let mut columns = style.grid_template_columns.clone();
    let mut rows = style.grid_template_rows.clone();
    if columns.is_empty() {
        columns.push(style.grid_auto_columns);
    }
    if rows.is_empty() {
        rows.push(style.grid_auto_rows);
    }
    let explicit_columns = columns.len();
    let explicit_rows = rows.len();
    let flow = style.grid_auto_flow;

    let mut pending = Vec::with_capacity(node.children.len());
    for (index, child) in node.children.iter().enumerate() {
        if !child.is_in_flow() {
            continue;
        }
        let p = child.style.grid_placement;
        let mut row = resolve_axis(p.row_start, p.row_end, explicit_rows);
        let mut column = resolve_axis(p.column_start, p.column_end, explicit_columns);

        if let Some(name) = &child.style.grid_area {
            match style.grid_template_areas.as_ref().and_then(|areas| areas.get(name)) {
                Some(area) => {
                    if row.start().is_none() {
                        row = AxisPlacement::Definite { start: area.row_start, end: area.row_end };
                    }
                    if column.start().is_none() {
                        column = AxisPlacement::Definite { start: area.column_start, end: area.column_end };
                    }
                }
                None => tracing::debug!(area = %name, "unknown grid area, auto-placing item"),
            }
        }
        pending.push((index, row, column));
    }

    let items = if flow.is_dense() {
        place_dense(&pending, flow, explicit_rows, explicit_columns)
    } else {
        place_sequential(&pending, flow, explicit_rows, explicit_columns)
    };

    let row_count = items.iter().map(|i| i.area.row_end).max().unwrap_or(0);
    let column_count = items.iter().map(|i| i.area.column_end).max().unwrap_or(0);
    rows.resize(rows.len().max(row_count), style.grid_auto_rows);
    columns.resize(columns.len().max(column_count), style.grid_auto_columns);

    Placement { items, rows, columns }
}

/// Source-order auto-placement: the n-th in-flow item gets cell n of
/// the explicit grid in flow order, whether or not that cell is taken
fn place_sequential(
    pending: &[(usize, AxisPlacement, AxisPlacement)],
    flow: GridAutoFlow,
    explicit_rows: usize,
    explicit_columns: usize,
) -> Vec<PlacedItem> {
    pending
        .iter()
        .enumerate()
        .map(|(cursor, &(index, row, column))| {
            let (auto_row, auto_column) = if flow.is_column() {
                (cursor % explicit_rows, cursor / explicit_rows)
            } else {
                (cursor / explicit_columns, cursor % explicit_columns)
            };
            let row_start = row.start().unwrap_or(auto_row);
            let column_start = column.start().unwrap_or(auto_column);
            PlacedItem {
                index,
                area: GridArea {
                    row_start,
                    row_end: row_start + row.span(),
                    column_start,
                    column_end: column_start + column.span(),
                },
            }
        })
        .collect()
}

/// Dense auto-placement: definite items go first, then every other item
/// takes the first free slot in flow order
fn place_dense(
    pending: &[(usize, AxisPlacement, AxisPlacement)],
    flow: GridAutoFlow,
    explicit_rows: usize,
    explicit_columns: usize,
) -> Vec<PlacedItem> {
    let mut placed: Vec<PlacedItem> = Vec::with_capacity(pending.len());

    for &(index, row, column) in pending {
        if let (Some(row_start), Some(column_start)) = (row.start(), column.start()) {
            let area = GridArea {
                row_start,
                row_end: row_start + row.span(),
                column_start,
                column_end: column_start + column.span(),
            };
            placed.push(PlacedItem { index, area });
        }
    }

    for &(index, row, column) in pending {
        if row.start().is_some() && column.start().is_some() {
            continue;
        }

        // Major axis advances slowest in flow order
        let (major, minor, minor_count) = if flow.is_column() {
            (column, row, explicit_rows)
        } else {
            (row, column, explicit_columns)
        };
        let to_area = |major_start: usize, minor_start: usize| {
            let (row_start, column_start) =
                if flow.is_column() { (minor_start, major_start) } else { (major_start, minor_start) };
            GridArea {
                row_start,
                row_end: row_start + row.span(),
                column_start,
                column_end: column_start + column.span(),
            }
        };
        let is_free = |area: &GridArea| !placed.iter().any(|p| p.area.overlaps(area));

        let minor_candidates: Vec<usize> = match minor.start() {
            Some(start) => vec![start],
            None => (0..=minor_count.saturating_sub(minor.span())).collect(),
        };
        let major_candidates: Vec<usize> = match major.start() {
            Some(start) => vec![start],
            None => {
                let occupied = placed
                    .iter()
                    .map(|p| if flow.is_column() { p.area.column_end } else { p.area.row_end })
                    .max()
                    .unwrap_or(0);
                (0..=occupied).collect()
            }
        };

        let minors = &minor_candidates;
        let area = major_candidates
            .iter()
            .flat_map(|&m| minors.iter().map(move |&n| (m, n)))
            .map(|(m, n)| to_area(m, n))
            .find(|area| is_free(area))
            .unwrap_or_else(|| to_area(major.start().unwrap_or(0), minor.start().unwrap_or(minor_count)));

        placed.push(PlacedItem { index, area });
    }

    placed.sort_by_key(|p| p.index);
    placed
}

// ============================================================================
// Track sizing
// ============================================================================

/// Space an item needs across a run of tracks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub start: usize,
    pub end: usize,
    pub size: f32,
}

/// Size one axis of tracks.
///
/// Fixed tracks keep their size. Content-sized tracks grow to fit the
/// items they hold, spanning items sharing their excess evenly across
/// the tracks they cross. Fractional tracks split what remains of
/// `available` by weight; with unbounded space they size like auto
/// tracks. With `stretch` set and no fractional tracks, leftover space
/// is shared by the auto tracks.
pub fn size_tracks(
    tracks: &[ResolvedTrack],
    contributions: &[Contribution],
    available: f32,
    gap: f32,
    stretch: bool,
) -> Vec<f32> {
    let definite = available.is_finite();
    let mut sizes: Vec<f32> = tracks.iter().map(ResolvedTrack::min_or_zero).collect();
    let grows = |t: &ResolvedTrack| !t.is_fixed() && (!t.is_flexible() || !definite);

    let mut ordered: Vec<&Contribution> = contributions.iter().filter(|c| c.end <= tracks.len()).collect();
    ordered.sort_by_key(|c| c.end - c.start);

    for c in ordered {
        let growable: Vec<usize> = (c.start..c.end).filter(|&i| grows(&tracks[i])).collect();
        if growable.is_empty() {
            continue;
        }
        let span = c.end - c.start;
        let current = sizes[c.start..c.end].iter().sum::<f32>() + gap * span.saturating_sub(1) as f32;
        if c.size > current {
            let extra = (c.size - current) / growable.len() as f32;
            for i in growable {
                sizes[i] = (sizes[i] + extra).min(tracks[i].max);
            }
        }
    }

    if !definite {
        return sizes;
    }

    let gaps = gap * tracks.len().saturating_sub(1) as f32;
    let flex_total: f32 = tracks.iter().map(|t| t.fraction).sum();
    if flex_total > 0.0 {
        let used: f32 = tracks
            .iter()
            .zip(&sizes)
            .filter(|(t, _)| !t.is_flexible())
            .map(|(_, s)| s)
            .sum();
        let free = (available - used - gaps).max(0.0);
        for (track, size) in tracks.iter().zip(sizes.iter_mut()) {
            if track.is_flexible() {
                *size = (free * track.fraction / flex_total).max(track.min);
            }
        }
    } else if stretch {
        let free = available - sizes.iter().sum::<f32>() - gaps;
        let auto: Vec<usize> = (0..tracks.len()).filter(|&i| tracks[i].max.is_infinite()).collect();
        if free > 0.0 && !auto.is_empty() {
            let share = free / auto.len() as f32;
            for i in auto {
                sizes[i] += share;
            }
        }
    }

    sizes
}

/// Start offset of each track after content distribution
pub fn track_offsets(sizes: &[f32], gap: f32, free: f32, distribution: Distribution) -> Vec<f32> {
    let (leading, between) = distribute(free, sizes.len(), distribution);
    let mut offsets = Vec::with_capacity(sizes.len());
    let mut cursor = leading;
    for size in sizes {
        offsets.push(cursor);
        cursor += size + gap + between;
    }
    offsets
}

fn tracks_extent(sizes: &[f32], gap: f32) -> f32 {
    sizes.iter().sum::<f32>() + gap * sizes.len().saturating_sub(1) as f32
}

/// (offset, size) of a run of tracks
fn run(offsets: &[f32], sizes: &[f32], start: usize, end: usize) -> (f32, f32) {
    let (Some(&first), Some(&last_offset), Some(&last_size)) =
        (offsets.get(start), offsets.get(end.wrapping_sub(1)), sizes.get(end.wrapping_sub(1)))
    else {
        return (0.0, 0.0);
    };
    (first, last_offset + last_size - first)
}

/// Offset of an item of `size` aligned inside `space`
fn align_offset(alignment: AlignItems, space: f32, size: f32) -> f32 {
    match alignment {
        AlignItems::FlexEnd => space - size,
        AlignItems::Center => (space - size) / 2.0,
        AlignItems::Stretch | AlignItems::FlexStart | AlignItems::Baseline => 0.0,
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Lay out a grid container and its items
pub fn layout_grid(node: &mut Node, constraints: Constraints, ctx: &LayoutContext) -> Size {
    let sizer = BoxSizer::new(node, constraints, ctx);
    let prelim = sizer.preliminary();
    let font_size = sizer.font_size;
    let style = &node.style;
    let mode = style.writing_mode;
    let inline_axis = mode.inline_axis();
    let block_axis = mode.block_axis();

    let column_gap = style.column_gap_px(ctx, font_size);
    let row_gap = style.row_gap_px(ctx, font_size);
    let justify_content = Distribution::from(style.justify_content);
    let align_content = Distribution::from(style.align_content);
    let (justify_items, align_items) = (style.justify_items, style.align_items);

    let specified = |axis: Axis| match axis {
        Axis::Horizontal => sizer.specified_width.is_some(),
        Axis::Vertical => sizer.specified_height.is_some(),
    };
    let available_inline = inline_axis.of(prelim.size());
    let available_block = block_axis.of(prelim.size());

    let placement = place_items(node);
    let columns: Vec<ResolvedTrack> = placement.columns.iter().map(|t| t.resolve(ctx, font_size)).collect();
    let rows: Vec<ResolvedTrack> = placement.rows.iter().map(|t| t.resolve(ctx, font_size)).collect();

    // Column sizing from unbounded measurements
    let mut column_contributions = Vec::with_capacity(placement.items.len());
    for item in &placement.items {
        let child = &mut node.children[item.index];
        let margin = child.style.margin.resolve_signed(ctx, child.style.font_size_px(ctx));
        let (start, end) = inline_axis.edges(&margin);
        let size = crate::layout(child, Constraints::unbounded(), ctx);
        column_contributions.push(Contribution {
            start: item.area.column_start,
            end: item.area.column_end,
            size: (inline_axis.of(size) + start + end).max(0.0),
        });
    }
    let column_sizes =
        size_tracks(&columns, &column_contributions, available_inline, column_gap, specified(inline_axis));
    let column_offsets = track_offsets(&column_sizes, column_gap, 0.0, Distribution::Start);

    // Row sizing from measurements at the final column widths
    let mut row_contributions = Vec::with_capacity(placement.items.len());
    let mut measured = Vec::with_capacity(placement.items.len());
    for item in &placement.items {
        let child = &mut node.children[item.index];
        let margin = child.style.margin.resolve_signed(ctx, child.style.font_size_px(ctx));
        let (inline_start, inline_end) = inline_axis.edges(&margin);
        let (block_start, block_end) = block_axis.edges(&margin);
        let (_, span) = run(&column_offsets, &column_sizes, item.area.column_start, item.area.column_end);
        let inner = (span - inline_start - inline_end).max(0.0);
        let bounds = inline_axis.size(inner, f32::INFINITY);
        let size = crate::layout(child, Constraints::loose(bounds.width, bounds.height), ctx);
        row_contributions.push(Contribution {
            start: item.area.row_start,
            end: item.area.row_end,
            size: (block_axis.of(size) + block_start + block_end).max(0.0),
        });
        measured.push(size);
    }
    let row_sizes = size_tracks(&rows, &row_contributions, available_block, row_gap, specified(block_axis));

    // Container size
    let used_inline = tracks_extent(&column_sizes, column_gap);
    let used_block = tracks_extent(&row_sizes, row_gap);
    let size = sizer.finish(prelim, inline_axis.size(used_inline, used_block), constraints);
    let pb = sizer.padding_border();
    let content = Size::new(size.width - pb.width, size.height - pb.height);

    let column_offsets = track_offsets(
        &column_sizes,
        column_gap,
        inline_axis.of(content) - used_inline,
        justify_content,
    );
    let row_offsets = track_offsets(&row_sizes, row_gap, block_axis.of(content) - used_block, align_content);

    // Position items inside their cells
    let (origin_x, origin_y) = sizer.dims.content_origin();
    for (item, measured) in placement.items.iter().zip(measured) {
        let (column_start, column_span) =
            run(&column_offsets, &column_sizes, item.area.column_start, item.area.column_end);
        let (row_start, row_span) = run(&row_offsets, &row_sizes, item.area.row_start, item.area.row_end);

        let cell = if inline_axis == Axis::Horizontal {
            Rect::new(column_start, row_start, column_span, row_span)
        } else if mode.is_block_reversed() {
            Rect::new(content.width - row_start - row_span, column_start, row_span, column_span)
        } else {
            Rect::new(row_start, column_start, row_span, column_span)
        };

        let child = &mut node.children[item.index];
        let margin = child.style.margin.resolve_signed(ctx, child.style.font_size_px(ctx));
        let inner = Size::new(
            (cell.width - margin.horizontal()).max(0.0),
            (cell.height - margin.vertical()).max(0.0),
        );

        let justify = child.style.justify_self.unwrap_or(justify_items);
        let align = child.style.align_self.unwrap_or(align_items);
        let (align_x, align_y) = if inline_axis == Axis::Horizontal { (justify, align) } else { (align, justify) };

        let item_size = match child.style.aspect_ratio() {
            Some(ratio) if child.style.width.is_auto() && child.style.height.is_auto() => {
                let mut width = inner.width;
                let mut height = width / ratio;
                if height > inner.height {
                    height = inner.height;
                    width = height * ratio;
                }
                Size::new(width, height)
            }
            _ => Size::new(
                stretched(align_x, child.style.width, inner.width, measured.width),
                stretched(align_y, child.style.height, inner.height, measured.height),
            ),
        };

        crate::layout(child, Constraints::tight(item_size.width, item_size.height), ctx);
        child.rect.x = origin_x + cell.x + margin.left + align_offset(align_x, inner.width, item_size.width);
        child.rect.y = origin_y + cell.y + margin.top + align_offset(align_y, inner.height, item_size.height);
    }

    for child in node.children.iter_mut().filter(|c| !c.is_in_flow()) {
        child.clear_rects();
    }

    node.rect = Rect::new(0.0, 0.0, size.width, size.height);
    size
}

/// Auto-sized items stretch to fill the cell under `Stretch`
fn stretched(alignment: AlignItems, specified: SizeValue, space: f32, measured: f32) -> f32 {
    if alignment == AlignItems::Stretch && specified.is_auto() { space } else { measured }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::box_model::Spacing;
    use crate::grid_areas::GridTemplateAreas;
    use crate::style::{Display, JustifyContent, Style};
    use crate::writing_mode::WritingMode;

    fn grid(style: Style, children: Vec<Node>) -> Node {
        Node::with_children(Style { display: Display::Grid, ..style }, children)
    }

    fn sized(width: f32, height: f32) -> Node {
        Node::new(Style { width: SizeValue::px(width), height: SizeValue::px(height), ..Default::default() })
    }

    fn auto_item() -> Node {
        Node::new(Style::default())
    }

    fn track(min: f32, max: f32) -> ResolvedTrack {
        ResolvedTrack { min, max, fraction: 0.0 }
    }

    #[test]
    fn test_track_constructors() {
        let ctx = LayoutContext::default();
        assert!(GridTrack::px(10.0).resolve(&ctx, 16.0).is_fixed());
        assert!(GridTrack::auto().is_auto());
        assert!(GridTrack::fr(1.0).is_flexible());

        // max below min collapses to min
        let t = GridTrack::minmax(Length::px(50.0), Length::px(20.0)).resolve(&ctx, 16.0);
        assert_eq!((t.min, t.max), (50.0, 50.0));
    }

    #[test]
    fn test_line_resolution() {
        assert_eq!(resolve_axis(GridLine::Line(2), GridLine::Auto, 3), AxisPlacement::Definite { start: 1, end: 2 });
        assert_eq!(resolve_axis(GridLine::Line(1), GridLine::Span(2), 3), AxisPlacement::Definite { start: 0, end: 2 });
        assert_eq!(
            resolve_axis(GridLine::Line(1), GridLine::Line(-1), 3),
            AxisPlacement::Definite { start: 0, end: 3 }
        );
        assert_eq!(
            resolve_axis(GridLine::Span(2), GridLine::Line(4), 3),
            AxisPlacement::Definite { start: 1, end: 3 }
        );
        assert_eq!(resolve_axis(GridLine::Auto, GridLine::Span(3), 3), AxisPlacement::Auto { span: 3 });
        assert_eq!(resolve_axis(GridLine::Line(0), GridLine::Auto, 3), AxisPlacement::Auto { span: 1 });
    }

    #[test]
    fn test_huge_lines_and_spans_are_clamped() {
        assert_eq!(
            resolve_axis(GridLine::Line(i32::MAX), GridLine::Auto, 1),
            AxisPlacement::Definite { start: MAX_GRID_LINE, end: MAX_GRID_LINE + 1 }
        );
        assert_eq!(
            resolve_axis(GridLine::Line(i32::MIN), GridLine::Auto, 1),
            AxisPlacement::Definite { start: 0, end: 1 }
        );
        assert_eq!(
            resolve_axis(GridLine::Span(u32::MAX), GridLine::Auto, 1),
            AxisPlacement::Auto { span: MAX_GRID_LINE }
        );

        let far = Node::new(Style {
            grid_placement: GridPlacement {
                row_start: GridLine::Line(i32::MAX),
                column_end: GridLine::Span(u32::MAX),
                ..Default::default()
            },
            ..Default::default()
        });
        let node = grid(Style::default(), vec![far]);
        let placement = place_items(&node);
        assert_eq!(placement.rows.len(), MAX_GRID_LINE + 1);
        assert_eq!(placement.columns.len(), MAX_GRID_LINE);
    }

    #[test]
    fn test_size_tracks_fr_after_fixed() {
        let tracks = [track(100.0, 100.0), ResolvedTrack { min: 0.0, max: f32::INFINITY, fraction: 1.0 }];
        let sizes = size_tracks(&tracks, &[], 400.0, 10.0, false);
        assert_eq!(sizes, vec![100.0, 290.0]);
    }

    #[test]
    fn test_size_tracks_spanning_contribution() {
        let tracks = [track(0.0, f32::INFINITY), track(0.0, f32::INFINITY)];
        let spanning = [Contribution { start: 0, end: 2, size: 110.0 }];
        let sizes = size_tracks(&tracks, &spanning, f32::INFINITY, 10.0, false);
        assert_eq!(sizes, vec![50.0, 50.0]);
    }

    #[test]
    fn test_size_tracks_minmax_clamps_content() {
        let tracks = [track(20.0, 60.0)];
        let sizes = size_tracks(&tracks, &[Contribution { start: 0, end: 1, size: 100.0 }], f32::INFINITY, 0.0, false);
        assert_eq!(sizes, vec![60.0]);
        let sizes = size_tracks(&tracks, &[], f32::INFINITY, 0.0, false);
        assert_eq!(sizes, vec![20.0]);
    }

    #[test]
    fn test_track_offsets_distribution() {
        assert_eq!(track_offsets(&[10.0, 10.0], 5.0, 0.0, Distribution::Start), vec![0.0, 15.0]);
        assert_eq!(track_offsets(&[10.0, 10.0], 0.0, 20.0, Distribution::Center), vec![10.0, 20.0]);
        assert_eq!(track_offsets(&[10.0, 10.0], 0.0, 20.0, Distribution::SpaceBetween), vec![0.0, 30.0]);
    }

    #[test]
    fn test_gap_between_fixed_columns() {
        let ctx = LayoutContext::default();
        let style = Style {
            grid_template_columns: vec![GridTrack::px(100.0), GridTrack::px(100.0)],
            gap: Length::px(10.0),
            ..Default::default()
        };
        let mut node = grid(style, vec![auto_item(), auto_item()]);

        let size = layout_grid(&mut node, Constraints::loose(800.0, 600.0), &ctx);

        assert_eq!(size.width, 210.0);
        assert_eq!(node.children[1].rect.x, 110.0);
        assert_eq!(node.children[1].rect.width, 100.0);
    }

    #[test]
    fn test_fractional_columns() {
        let ctx = LayoutContext::default();
        let style = Style {
            width: SizeValue::px(300.0),
            grid_template_columns: vec![GridTrack::fr(1.0), GridTrack::fr(2.0)],
            ..Default::default()
        };
        let mut node = grid(style, vec![auto_item(), auto_item()]);

        layout_grid(&mut node, Constraints::unbounded(), &ctx);

        assert!((node.children[0].rect.width - 100.0).abs() < 0.001);
        assert!((node.children[1].rect.x - 100.0).abs() < 0.001);
        assert!((node.children[1].rect.width - 200.0).abs() < 0.001);
    }

    #[test]
    fn test_fr_under_unbounded_space_sizes_to_content() {
        let ctx = LayoutContext::default();
        let style = Style { grid_template_columns: vec![GridTrack::fr(1.0)], ..Default::default() };
        let mut node = grid(style, vec![sized(70.0, 10.0)]);

        let size = layout_grid(&mut node, Constraints::unbounded(), &ctx);
        assert_eq!(size, Size::new(70.0, 10.0));
    }

    #[test]
    fn test_row_major_auto_placement() {
        let ctx = LayoutContext::default();
        let style = Style { grid_template_columns: vec![GridTrack::px(50.0); 3], ..Default::default() };
        let children = (0..7).map(|_| sized(50.0, 20.0)).collect();
        let mut node = grid(style, children);

        let size = layout_grid(&mut node, Constraints::unbounded(), &ctx);

        for (i, child) in node.children.iter().enumerate() {
            assert_eq!(child.rect.x, (i % 3) as f32 * 50.0);
            assert_eq!(child.rect.y, (i / 3) as f32 * 20.0);
        }
        assert_eq!(size.height, 60.0);
    }

    #[test]
    fn test_column_flow_auto_placement() {
        let ctx = LayoutContext::default();
        let style = Style {
            grid_auto_flow: GridAutoFlow::Column,
            grid_template_rows: vec![GridTrack::px(20.0); 2],
            ..Default::default()
        };
        let children = (0..5).map(|_| sized(30.0, 20.0)).collect();
        let mut node = grid(style, children);

        let size = layout_grid(&mut node, Constraints::unbounded(), &ctx);

        for (i, child) in node.children.iter().enumerate() {
            assert_eq!(child.rect.x, (i / 2) as f32 * 30.0);
            assert_eq!(child.rect.y, (i % 2) as f32 * 20.0);
        }
        assert_eq!(size, Size::new(90.0, 40.0));
    }

    #[test]
    fn test_explicit_placement() {
        let ctx = LayoutContext::default();
        let style = Style {
            grid_template_columns: vec![GridTrack::px(50.0); 2],
            grid_template_rows: vec![GridTrack::px(50.0); 2],
            ..Default::default()
        };
        let mut item = auto_item();
        item.style.grid_placement = GridPlacement::cell(2, 2);
        let mut node = grid(style, vec![item]);

        layout_grid(&mut node, Constraints::unbounded(), &ctx);
        assert_eq!(node.children[0].rect, Rect::new(50.0, 50.0, 50.0, 50.0));
    }

    #[test]
    fn test_named_area_and_unknown_name() {
        let ctx = LayoutContext::default();
        let areas = GridTemplateAreas::parse(&["a b", "c c"]).unwrap();
        let style = Style {
            grid_template_columns: vec![GridTrack::px(40.0); 2],
            grid_template_rows: vec![GridTrack::px(10.0); 2],
            grid_template_areas: Some(areas),
            ..Default::default()
        };
        let mut footer = auto_item();
        footer.style.grid_area = Some("c".into());
        let mut stray = auto_item();
        stray.style.grid_area = Some("missing".into());
        let mut node = grid(style, vec![footer, stray]);

        layout_grid(&mut node, Constraints::unbounded(), &ctx);

        assert_eq!(node.children[0].rect, Rect::new(0.0, 10.0, 80.0, 10.0));
        // Second in-flow item, auto-placed at cell 1
        assert_eq!(node.children[1].rect, Rect::new(40.0, 0.0, 40.0, 10.0));
    }

    #[test]
    fn test_dense_fills_holes() {
        let ctx = LayoutContext::default();
        let style = Style {
            grid_auto_flow: GridAutoFlow::RowDense,
            grid_template_columns: vec![GridTrack::px(10.0); 3],
            grid_auto_rows: GridTrack::px(10.0),
            ..Default::default()
        };
        let wide = || Node::new(Style { grid_placement: GridPlacement::auto_span(2, 1), ..Default::default() });
        let mut node = grid(style, vec![wide(), wide(), auto_item()]);

        layout_grid(&mut node, Constraints::unbounded(), &ctx);

        assert_eq!((node.children[0].rect.x, node.children[0].rect.y), (0.0, 0.0));
        assert_eq!((node.children[1].rect.x, node.children[1].rect.y), (0.0, 10.0));
        assert_eq!((node.children[2].rect.x, node.children[2].rect.y), (20.0, 0.0));
    }

    #[test]
    fn test_spanning_item_splits_row_height() {
        let ctx = LayoutContext::default();
        let style = Style { grid_template_columns: vec![GridTrack::px(50.0); 2], ..Default::default() };
        let mut tall = sized(50.0, 100.0);
        tall.style.grid_placement = GridPlacement::span_rows(1, 1, 2);
        let mut node = grid(style, vec![tall, auto_item(), auto_item()]);

        let size = layout_grid(&mut node, Constraints::unbounded(), &ctx);

        assert_eq!(size.height, 100.0);
        // auto-placed at cells 1 and 2: (row 0, col 1) and (row 1, col 0)
        assert_eq!(node.children[1].rect, Rect::new(50.0, 0.0, 50.0, 50.0));
        assert_eq!(node.children[2].rect, Rect::new(0.0, 50.0, 50.0, 50.0));
    }

    #[test]
    fn test_item_alignment_in_cell() {
        let ctx = LayoutContext::default();
        let style = Style {
            grid_template_columns: vec![GridTrack::px(100.0)],
            grid_template_rows: vec![GridTrack::px(100.0)],
            justify_items: AlignItems::Center,
            align_items: AlignItems::FlexEnd,
            ..Default::default()
        };
        let mut node = grid(style, vec![sized(20.0, 20.0)]);

        layout_grid(&mut node, Constraints::unbounded(), &ctx);
        assert_eq!(node.children[0].rect, Rect::new(40.0, 80.0, 20.0, 20.0));
    }

    #[test]
    fn test_margins_shrink_item_in_cell() {
        let ctx = LayoutContext::default();
        let style = Style {
            grid_template_columns: vec![GridTrack::px(100.0)],
            grid_template_rows: vec![GridTrack::px(50.0)],
            ..Default::default()
        };
        let item = Node::new(Style { margin: Spacing::uniform(5.0), ..Default::default() });
        let mut node = grid(style, vec![item]);

        layout_grid(&mut node, Constraints::unbounded(), &ctx);
        assert_eq!(node.children[0].rect, Rect::new(5.0, 5.0, 90.0, 40.0));
    }

    #[test]
    fn test_aspect_ratio_item_fits_cell() {
        let ctx = LayoutContext::default();
        let style = Style {
            grid_template_columns: vec![GridTrack::px(100.0)],
            grid_template_rows: vec![GridTrack::px(20.0)],
            ..Default::default()
        };
        let item = Node::new(Style { aspect_ratio: Some(2.0), ..Default::default() });
        let mut node = grid(style, vec![item]);

        layout_grid(&mut node, Constraints::unbounded(), &ctx);
        assert_eq!(node.children[0].rect.size(), Size::new(40.0, 20.0));
    }

    #[test]
    fn test_justify_content_with_definite_width() {
        let ctx = LayoutContext::default();
        let style = Style {
            width: SizeValue::px(300.0),
            grid_template_columns: vec![GridTrack::px(100.0); 2],
            justify_content: JustifyContent::Center,
            ..Default::default()
        };
        let mut node = grid(style, vec![auto_item(), auto_item()]);

        layout_grid(&mut node, Constraints::unbounded(), &ctx);
        assert_eq!(node.children[0].rect.x, 50.0);
        assert_eq!(node.children[1].rect.x, 150.0);
    }

    #[test]
    fn test_auto_columns_stretch_in_definite_container() {
        let ctx = LayoutContext::default();
        let style = Style {
            width: SizeValue::px(200.0),
            grid_template_columns: vec![GridTrack::px(50.0), GridTrack::auto()],
            ..Default::default()
        };
        let mut node = grid(style, vec![auto_item(), auto_item()]);

        layout_grid(&mut node, Constraints::unbounded(), &ctx);
        assert_eq!(node.children[1].rect.x, 50.0);
        assert_eq!(node.children[1].rect.width, 150.0);
    }

    #[test]
    fn test_vertical_writing_modes_lay_rows_along_x() {
        let ctx = LayoutContext::default();
        let style = |writing_mode| Style {
            writing_mode,
            grid_template_rows: vec![GridTrack::px(30.0), GridTrack::px(40.0)],
            grid_template_columns: vec![GridTrack::px(20.0)],
            gap: Length::px(10.0),
            ..Default::default()
        };

        let mut lr = grid(style(WritingMode::VerticalLr), vec![auto_item(), auto_item()]);
        let size = layout_grid(&mut lr, Constraints::unbounded(), &ctx);
        assert_eq!(size, Size::new(80.0, 20.0));
        assert_eq!(lr.children[0].rect, Rect::new(0.0, 0.0, 30.0, 20.0));
        assert_eq!(lr.children[1].rect, Rect::new(40.0, 0.0, 40.0, 20.0));

        let mut rl = grid(style(WritingMode::VerticalRl), vec![auto_item(), auto_item()]);
        layout_grid(&mut rl, Constraints::unbounded(), &ctx);
        assert_eq!(rl.children[0].rect.x, 50.0);
        assert_eq!(rl.children[1].rect.x, 0.0);
    }

    #[test]
    fn test_empty_grid() {
        let ctx = LayoutContext::default();
        let style = Style { padding: Spacing::uniform(4.0), ..Default::default() };
        let mut node = grid(style, vec![]);
        assert_eq!(layout_grid(&mut node, Constraints::unbounded(), &ctx), Size::new(8.0, 8.0));
    }
}
