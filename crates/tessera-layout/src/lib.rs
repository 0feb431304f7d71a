//! Tessera Layout Engine
//!
//! Renderer-agnostic CSS box layout.
//!
//! This crate takes a styled node tree and writes a border-box rectangle
//! into every node. It implements:
//! - CSS Box Model (margin, border, padding, content, box-sizing)
//! - Block Formatting Context (block-axis stacking, margin collapsing)
//! - Flexbox layout
//! - CSS Grid layout (named areas, auto-placement, fractional tracks)
//! - Writing modes, aspect ratio and intrinsic sizing
//!
//! Text is measured through a pluggable [`TextMetrics`] capability
//! carried by the [`LayoutContext`].

mod block;
mod box_model;
mod constraints;
mod context;
mod error;
mod flex;
mod grid;
mod grid_areas;
pub mod intrinsic;
mod length;
mod node;
mod style;
mod text;
mod writing_mode;

pub use block::{BlockFormattingContext, layout_block};
pub use box_model::{BoxDimensions, EdgeSizes, Rect, Size, Spacing, to_content_size};
pub use constraints::Constraints;
pub use context::{ApproximateMetrics, LayoutConfig, LayoutContext, TextMeasurement, TextMetrics, TextStyle};
pub use error::{GridAreaError, LayoutError, Result};
pub use flex::{Distribution, distribute, layout_flexbox};
pub use grid::{
    Contribution, GridArea, GridLine, GridPlacement, GridTrack, MAX_GRID_LINE, PlacedItem, Placement, ResolvedTrack,
    layout_grid, place_items, size_tracks, track_offsets,
};
pub use grid_areas::{GridTemplateAreas, NamedArea};
pub use length::{Length, LengthUnit};
pub use node::Node;
pub use style::{
    AlignContent, AlignItems, BoxSizing, Display, FlexBasis, FlexDirection, FlexWrap, GridAutoFlow, Insets,
    JustifyContent, Position, SizeValue, Style,
};
pub use text::{TextLine, break_lines, first_baseline, layout_text};
pub use writing_mode::{Axis, WritingMode};

/// Lay out `node` and its subtree within `constraints`.
///
/// Dispatches on the node's display mode, writes the node's rectangle
/// and returns its border-box size. The node's own `x`/`y` are left at
/// zero for the parent to position.
pub fn layout(node: &mut Node, constraints: Constraints, ctx: &LayoutContext) -> Size {
    tracing::trace!(display = ?node.style.display, ?constraints, "layout");

    let size = match node.style.display {
        Display::Block => layout_block(node, constraints, ctx),
        Display::Flex => layout_flexbox(node, constraints, ctx),
        Display::Grid => layout_grid(node, constraints, ctx),
        Display::InlineText => layout_text(node, constraints, ctx),
        Display::None => {
            node.clear_rects();
            Size::ZERO
        }
    };

    tracing::trace!(width = size.width, height = size.height, "layout result");
    size
}

/// Lay out a tree with a context built from [`LayoutConfig::default`].
///
/// The viewport follows the constraint bounds, falling back to the
/// configured viewport on unbounded axes.
pub fn layout_with_defaults(root: &mut Node, constraints: Constraints) -> Size {
    let config = LayoutConfig::default();
    let width = if constraints.has_bounded_width() { constraints.max_width } else { config.fallback_viewport.width };
    let height = if constraints.has_bounded_height() {
        constraints.max_height
    } else {
        config.fallback_viewport.height
    };
    let ctx = LayoutContext::from_config(&config).with_viewport(width, height);

    let size = layout(root, constraints, &ctx);
    tracing::info!("Layout complete: {} nodes", root.count());
    size
}
