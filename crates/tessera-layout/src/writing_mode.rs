//! Writing Modes
//!
//! Maps the logical block/inline axes onto physical x/y.
//! https://www.w3.org/TR/css-writing-modes-3/

use crate::box_model::{EdgeSizes, Size};

/// Writing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritingMode {
    /// Horizontal lines, blocks stack top-to-bottom (default)
    #[default]
    HorizontalTb,
    /// Vertical lines, blocks stack right-to-left
    VerticalRl,
    /// Vertical lines, blocks stack left-to-right
    VerticalLr,
    /// Sideways, blocks stack right-to-left
    SidewaysRl,
    /// Sideways, blocks stack left-to-right
    SidewaysLr,
}

/// Physical axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Component of `size` along this axis
    pub fn of(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Build a physical size from extents along this axis and its cross axis
    pub fn size(self, along: f32, across: f32) -> Size {
        match self {
            Self::Horizontal => Size::new(along, across),
            Self::Vertical => Size::new(across, along),
        }
    }

    /// (start, end) edges along this axis
    pub fn edges(self, edges: &EdgeSizes) -> (f32, f32) {
        match self {
            Self::Horizontal => (edges.left, edges.right),
            Self::Vertical => (edges.top, edges.bottom),
        }
    }
}

impl WritingMode {
    /// Parse from CSS value
    pub fn from_css(value: &str) -> Self {
        match value {
            "horizontal-tb" => Self::HorizontalTb,
            "vertical-rl" => Self::VerticalRl,
            "vertical-lr" => Self::VerticalLr,
            "sideways-rl" => Self::SidewaysRl,
            "sideways-lr" => Self::SidewaysLr,
            _ => Self::HorizontalTb,
        }
    }

    /// Convert to CSS value
    pub fn to_css(&self) -> &'static str {
        match self {
            Self::HorizontalTb => "horizontal-tb",
            Self::VerticalRl => "vertical-rl",
            Self::VerticalLr => "vertical-lr",
            Self::SidewaysRl => "sideways-rl",
            Self::SidewaysLr => "sideways-lr",
        }
    }

    pub fn is_vertical(&self) -> bool {
        !matches!(self, Self::HorizontalTb)
    }

    pub fn is_sideways(&self) -> bool {
        matches!(self, Self::SidewaysRl | Self::SidewaysLr)
    }

    /// Blocks progress right-to-left
    pub fn is_block_reversed(&self) -> bool {
        matches!(self, Self::VerticalRl | Self::SidewaysRl)
    }

    /// Physical axis blocks stack along
    pub fn block_axis(&self) -> Axis {
        if self.is_vertical() { Axis::Horizontal } else { Axis::Vertical }
    }

    /// Physical axis text lines run along
    pub fn inline_axis(&self) -> Axis {
        self.block_axis().cross()
    }

    /// (block-start, block-end) margins for this mode
    pub fn block_edges(&self, edges: &EdgeSizes) -> (f32, f32) {
        let (start, end) = self.block_axis().edges(edges);
        if self.is_block_reversed() { (end, start) } else { (start, end) }
    }

    /// (inline-start, inline-end) margins for this mode
    pub fn inline_edges(&self, edges: &EdgeSizes) -> (f32, f32) {
        self.inline_axis().edges(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_roundtrip_names() {
        for mode in [
            WritingMode::HorizontalTb,
            WritingMode::VerticalRl,
            WritingMode::VerticalLr,
            WritingMode::SidewaysRl,
            WritingMode::SidewaysLr,
        ] {
            assert_eq!(WritingMode::from_css(mode.to_css()), mode);
        }
        assert_eq!(WritingMode::from_css("bogus"), WritingMode::HorizontalTb);
    }

    #[test]
    fn test_axes() {
        assert_eq!(WritingMode::HorizontalTb.block_axis(), Axis::Vertical);
        assert_eq!(WritingMode::VerticalLr.block_axis(), Axis::Horizontal);
        assert_eq!(WritingMode::SidewaysRl.inline_axis(), Axis::Vertical);
    }

    #[test]
    fn test_block_edges_follow_direction() {
        let margin = EdgeSizes { top: 1.0, right: 2.0, bottom: 3.0, left: 4.0 };
        assert_eq!(WritingMode::HorizontalTb.block_edges(&margin), (1.0, 3.0));
        assert_eq!(WritingMode::VerticalLr.block_edges(&margin), (4.0, 2.0));
        // vertical-rl starts on the right
        assert_eq!(WritingMode::VerticalRl.block_edges(&margin), (2.0, 4.0));
        assert_eq!(WritingMode::VerticalRl.inline_edges(&margin), (1.0, 3.0));
    }

    #[test]
    fn test_axis_size() {
        assert_eq!(Axis::Vertical.size(10.0, 20.0), Size::new(20.0, 10.0));
        assert_eq!(Axis::Horizontal.of(Size::new(3.0, 4.0)), 3.0);
    }
}
