//! CSS Box Model
//!
//! Geometry shared by every layout mode: rectangles, sizes, and the
//! four-sided edge groups used for margin, padding and border.

use crate::context::LayoutContext;
use crate::length::Length;
use crate::style::{BoxSizing, Style};

/// Rectangle, relative to the parent's border-box origin
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Resolved edge sizes in pixels (top, right, bottom, left)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeSizes {
    pub fn all(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Left + right
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top + bottom
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

/// Four-sided length group as written in a style
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spacing {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Spacing {
    /// Same length on every side
    pub fn all(length: Length) -> Self {
        Self { top: length, right: length, bottom: length, left: length }
    }

    /// Same pixel value on every side
    pub fn uniform(px: f32) -> Self {
        Self::all(Length::px(px))
    }

    /// Left and right only
    pub fn horizontal(px: f32) -> Self {
        Self { left: Length::px(px), right: Length::px(px), ..Self::default() }
    }

    /// Top and bottom only
    pub fn vertical(px: f32) -> Self {
        Self { top: Length::px(px), bottom: Length::px(px), ..Self::default() }
    }

    /// Resolve every side to pixels. Negative results clamp to zero
    /// for padding and border; callers resolving margins use
    /// [`Spacing::resolve_signed`].
    pub fn resolve(&self, ctx: &LayoutContext, font_size: f32) -> EdgeSizes {
        let edges = self.resolve_signed(ctx, font_size);
        EdgeSizes {
            top: finite_or_zero(edges.top).max(0.0),
            right: finite_or_zero(edges.right).max(0.0),
            bottom: finite_or_zero(edges.bottom).max(0.0),
            left: finite_or_zero(edges.left).max(0.0),
        }
    }

    /// Resolve every side to pixels, keeping the sign
    pub fn resolve_signed(&self, ctx: &LayoutContext, font_size: f32) -> EdgeSizes {
        EdgeSizes {
            top: finite_or_zero(self.top.resolve(ctx, font_size)),
            right: finite_or_zero(self.right.resolve(ctx, font_size)),
            bottom: finite_or_zero(self.bottom.resolve(ctx, font_size)),
            left: finite_or_zero(self.left.resolve(ctx, font_size)),
        }
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Box dimensions resolved for one node
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxDimensions {
    pub padding: EdgeSizes,
    pub border: EdgeSizes,
}

impl BoxDimensions {
    /// Resolve padding and border of a style to pixels. Margins are
    /// resolved by the parent that places the box.
    pub fn resolve(style: &Style, ctx: &LayoutContext, font_size: f32) -> Self {
        Self {
            padding: style.padding.resolve(ctx, font_size),
            border: style.border.resolve(ctx, font_size),
        }
    }

    /// Horizontal padding + border
    pub fn padding_border_horizontal(&self) -> f32 {
        self.padding.horizontal() + self.border.horizontal()
    }

    /// Vertical padding + border
    pub fn padding_border_vertical(&self) -> f32 {
        self.padding.vertical() + self.border.vertical()
    }

    /// Offset of the content box from the border-box origin
    pub fn content_origin(&self) -> (f32, f32) {
        (
            self.padding.left + self.border.left,
            self.padding.top + self.border.top,
        )
    }
}

/// Convert a specified width or height to content-box pixels
pub fn to_content_size(size: f32, box_sizing: BoxSizing, padding_border: f32) -> f32 {
    match box_sizing {
        BoxSizing::ContentBox => size,
        BoxSizing::BorderBox => (size - padding_border).max(0.0),
    }
}
