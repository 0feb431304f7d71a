//! Node Style
//!
//! Declarative per-node properties read by the layout engines.
//! Styles are plain data; the engines never mutate them.

use crate::box_model::Spacing;
use crate::context::LayoutContext;
use crate::grid::{GridPlacement, GridTrack};
use crate::grid_areas::GridTemplateAreas;
use crate::length::Length;
use crate::writing_mode::WritingMode;

/// Display mode, selecting the layout algorithm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Display {
    #[default]
    Block,
    Flex,
    Grid,
    /// Text leaf measured through the text metrics capability
    InlineText,
    /// Not laid out; children are skipped and the rect is zeroed
    None,
}

/// Positioning scheme (consumed by the positioning pass, not the core engines)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

/// Inset offsets for positioned boxes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    pub top: Option<Length>,
    pub right: Option<Length>,
    pub bottom: Option<Length>,
    pub left: Option<Length>,
}

/// Which box `width`/`height` describe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

/// Width or height value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SizeValue {
    #[default]
    Auto,
    Fixed(Length),
    MinContent,
    MaxContent,
    /// `fit-content(<length>)`
    FitContent(Length),
}

impl SizeValue {
    /// Fixed pixel size
    pub const fn px(value: f32) -> Self {
        Self::Fixed(Length::px(value))
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolved pixel value of a `Fixed` size.
    ///
    /// Negative or non-finite results count as auto.
    pub fn resolve_fixed(&self, ctx: &LayoutContext, font_size: f32) -> Option<f32> {
        match self {
            Self::Fixed(length) => {
                let px = length.resolve(ctx, font_size);
                (px.is_finite() && px >= 0.0).then_some(px)
            }
            _ => None,
        }
    }
}

impl From<Length> for SizeValue {
    fn from(length: Length) -> Self {
        Self::Fixed(length)
    }
}

/// Flex direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    pub fn is_row(&self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    pub fn is_reversed(&self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// Flex wrap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlexWrap {
    #[default]
    Nowrap,
    Wrap,
    WrapReverse,
}

/// Justify content (main axis, and grid column tracks)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Align items (cross axis). Also used for grid `justify-items`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignItems {
    #[default]
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
}

/// Align content (flex lines, and grid row tracks)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignContent {
    #[default]
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Flex basis
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum FlexBasis {
    #[default]
    Auto,
    Length(Length),
    Content,
}

/// Grid auto-placement direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GridAutoFlow {
    #[default]
    Row,
    Column,
    RowDense,
    ColumnDense,
}

impl GridAutoFlow {
    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column | Self::ColumnDense)
    }

    pub fn is_dense(&self) -> bool {
        matches!(self, Self::RowDense | Self::ColumnDense)
    }
}

/// Complete style of one node
#[derive(Debug, Clone)]
pub struct Style {
    pub display: Display,
    pub position: Position,
    pub insets: Insets,
    pub writing_mode: WritingMode,

    // Sizing
    pub box_sizing: BoxSizing,
    pub width: SizeValue,
    pub height: SizeValue,
    pub min_width: Option<Length>,
    pub max_width: Option<Length>,
    pub min_height: Option<Length>,
    pub max_height: Option<Length>,
    /// Width / height
    pub aspect_ratio: Option<f32>,

    // Box edges
    pub margin: Spacing,
    pub padding: Spacing,
    pub border: Spacing,

    // Text
    /// Font size; `em` inside it resolves against the root font size
    pub font_size: Option<Length>,
    /// Line height as a multiple of the font size
    pub line_height: Option<f32>,

    // Flex container
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,

    // Flex item
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: FlexBasis,
    pub order: i32,
    pub align_self: Option<AlignItems>,

    // Gaps (flex and grid)
    pub gap: Length,
    pub row_gap: Option<Length>,
    pub column_gap: Option<Length>,

    // Grid container
    pub grid_template_rows: Vec<GridTrack>,
    pub grid_template_columns: Vec<GridTrack>,
    pub grid_auto_rows: GridTrack,
    pub grid_auto_columns: GridTrack,
    pub grid_auto_flow: GridAutoFlow,
    pub grid_template_areas: Option<GridTemplateAreas>,
    pub justify_items: AlignItems,

    // Grid item
    pub grid_area: Option<String>,
    pub grid_placement: GridPlacement,
    pub justify_self: Option<AlignItems>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            display: Display::Block,
            position: Position::Static,
            insets: Insets::default(),
            writing_mode: WritingMode::HorizontalTb,
            box_sizing: BoxSizing::ContentBox,
            width: SizeValue::Auto,
            height: SizeValue::Auto,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            aspect_ratio: None,
            margin: Spacing::default(),
            padding: Spacing::default(),
            border: Spacing::default(),
            font_size: None,
            line_height: None,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Nowrap,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            align_content: AlignContent::Stretch,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: FlexBasis::Auto,
            order: 0,
            align_self: None,
            gap: Length::ZERO,
            row_gap: None,
            column_gap: None,
            grid_template_rows: Vec::new(),
            grid_template_columns: Vec::new(),
            grid_auto_rows: GridTrack::auto(),
            grid_auto_columns: GridTrack::auto(),
            grid_auto_flow: GridAutoFlow::Row,
            grid_template_areas: None,
            justify_items: AlignItems::Stretch,
            grid_area: None,
            grid_placement: GridPlacement::default(),
            justify_self: None,
        }
    }
}

impl Style {
    /// Font size in pixels, defaulting to the root font size
    pub fn font_size_px(&self, ctx: &LayoutContext) -> f32 {
        self.font_size
            .map(|size| size.resolve(ctx, ctx.root_font_size))
            .filter(|px| px.is_finite() && *px > 0.0)
            .unwrap_or(ctx.root_font_size)
    }

    /// Gap between rows, falling back to `gap`
    pub fn row_gap_px(&self, ctx: &LayoutContext, font_size: f32) -> f32 {
        resolve_gap(self.row_gap.unwrap_or(self.gap), ctx, font_size)
    }

    /// Gap between columns, falling back to `gap`
    pub fn column_gap_px(&self, ctx: &LayoutContext, font_size: f32) -> f32 {
        resolve_gap(self.column_gap.unwrap_or(self.gap), ctx, font_size)
    }

    /// Valid aspect ratio, if any
    pub fn aspect_ratio(&self) -> Option<f32> {
        self.aspect_ratio.filter(|r| r.is_finite() && *r > 0.0)
    }
}

fn resolve_gap(gap: Length, ctx: &LayoutContext, font_size: f32) -> f32 {
    let px = gap.resolve(ctx, font_size);
    if px.is_finite() { px.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = Style::default();
        assert_eq!(style.display, Display::Block);
        assert!(style.width.is_auto());
        assert_eq!(style.flex_shrink, 1.0);
        assert_eq!(style.align_items, AlignItems::Stretch);
        assert!(style.grid_auto_rows.is_auto());
    }

    #[test]
    fn test_gap_fallback() {
        let ctx = LayoutContext::default();
        let style = Style {
            gap: Length::px(8.0),
            row_gap: Some(Length::px(2.0)),
            ..Default::default()
        };
        assert_eq!(style.row_gap_px(&ctx, 16.0), 2.0);
        assert_eq!(style.column_gap_px(&ctx, 16.0), 8.0);
    }

    #[test]
    fn test_font_size() {
        let ctx = LayoutContext::default();
        assert_eq!(Style::default().font_size_px(&ctx), 16.0);

        let style = Style { font_size: Some(Length::em(2.0)), ..Default::default() };
        assert_eq!(style.font_size_px(&ctx), 32.0);
    }

    #[test]
    fn test_negative_fixed_is_auto() {
        let ctx = LayoutContext::default();
        assert_eq!(SizeValue::px(-1.0).resolve_fixed(&ctx, 16.0), None);
        assert_eq!(SizeValue::px(0.0).resolve_fixed(&ctx, 16.0), Some(0.0));
        assert_eq!(SizeValue::MaxContent.resolve_fixed(&ctx, 16.0), None);
    }

    #[test]
    fn test_aspect_ratio_validation() {
        let style = Style { aspect_ratio: Some(0.0), ..Default::default() };
        assert_eq!(style.aspect_ratio(), None);
        let style = Style { aspect_ratio: Some(2.0), ..Default::default() };
        assert_eq!(style.aspect_ratio(), Some(2.0));
    }
}
