//! Length Resolution
//!
//! Converts tagged CSS lengths to pixels.
//! Absolute units use the CSS reference of 96px per inch.
//! https://www.w3.org/TR/css-values-4/#lengths

use std::fmt;

use crate::context::LayoutContext;

const PX_PER_INCH: f32 = 96.0;

/// Length unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    /// Pixels
    #[default]
    Px,
    /// Points (1/72 in)
    Pt,
    /// Picas (12pt)
    Pc,
    /// Inches
    In,
    /// Centimeters
    Cm,
    /// Millimeters
    Mm,
    /// Quarter-millimeters
    Q,
    /// Current font size
    Em,
    /// Root font size
    Rem,
    /// Advance of the reference character
    Ch,
    /// 1% of viewport height
    Vh,
    /// 1% of viewport width
    Vw,
    /// 1% of the smaller viewport dimension
    Vmin,
    /// 1% of the larger viewport dimension
    Vmax,
}

impl LengthUnit {
    /// Parse a unit suffix. Unknown suffixes fall back to pixels so the
    /// raw number passes through unchanged.
    pub fn from_css(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pt" => Self::Pt,
            "pc" => Self::Pc,
            "in" => Self::In,
            "cm" => Self::Cm,
            "mm" => Self::Mm,
            "q" => Self::Q,
            "em" => Self::Em,
            "rem" => Self::Rem,
            "ch" => Self::Ch,
            "vh" => Self::Vh,
            "vw" => Self::Vw,
            "vmin" => Self::Vmin,
            "vmax" => Self::Vmax,
            _ => Self::Px,
        }
    }

    /// Convert to CSS suffix
    pub fn to_css(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::In => "in",
            Self::Cm => "cm",
            Self::Mm => "mm",
            Self::Q => "Q",
            Self::Em => "em",
            Self::Rem => "rem",
            Self::Ch => "ch",
            Self::Vh => "vh",
            Self::Vw => "vw",
            Self::Vmin => "vmin",
            Self::Vmax => "vmax",
        }
    }

    pub fn is_font_relative(&self) -> bool {
        matches!(self, Self::Em | Self::Rem | Self::Ch)
    }

    pub fn is_viewport_relative(&self) -> bool {
        matches!(self, Self::Vh | Self::Vw | Self::Vmin | Self::Vmax)
    }
}

/// A CSS length: numeric value plus unit
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

impl Length {
    pub const ZERO: Length = Length { value: 0.0, unit: LengthUnit::Px };

    /// Resolves to an infinite pixel size
    pub const UNBOUNDED: Length = Length { value: f32::INFINITY, unit: LengthUnit::Px };

    pub const fn new(value: f32, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub const fn px(value: f32) -> Self {
        Self::new(value, LengthUnit::Px)
    }

    pub const fn pt(value: f32) -> Self {
        Self::new(value, LengthUnit::Pt)
    }

    pub const fn pc(value: f32) -> Self {
        Self::new(value, LengthUnit::Pc)
    }

    pub const fn inches(value: f32) -> Self {
        Self::new(value, LengthUnit::In)
    }

    pub const fn cm(value: f32) -> Self {
        Self::new(value, LengthUnit::Cm)
    }

    pub const fn mm(value: f32) -> Self {
        Self::new(value, LengthUnit::Mm)
    }

    pub const fn q(value: f32) -> Self {
        Self::new(value, LengthUnit::Q)
    }

    pub const fn em(value: f32) -> Self {
        Self::new(value, LengthUnit::Em)
    }

    pub const fn rem(value: f32) -> Self {
        Self::new(value, LengthUnit::Rem)
    }

    pub const fn ch(value: f32) -> Self {
        Self::new(value, LengthUnit::Ch)
    }

    pub const fn vh(value: f32) -> Self {
        Self::new(value, LengthUnit::Vh)
    }

    pub const fn vw(value: f32) -> Self {
        Self::new(value, LengthUnit::Vw)
    }

    pub const fn vmin(value: f32) -> Self {
        Self::new(value, LengthUnit::Vmin)
    }

    pub const fn vmax(value: f32) -> Self {
        Self::new(value, LengthUnit::Vmax)
    }

    pub fn is_unbounded(&self) -> bool {
        self.value == f32::INFINITY
    }

    /// Parse `"12px"`, `"1.5em"`, `"50vh"`...
    ///
    /// Returns `None` only when no number can be read. A missing or
    /// unrecognized unit is treated as pixels.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("unbounded") || input.eq_ignore_ascii_case("infinity") {
            return Some(Self::UNBOUNDED);
        }

        let split = input
            .char_indices()
            .find(|&(i, c)| {
                !(c.is_ascii_digit()
                    || c == '.'
                    || ((c == '-' || c == '+') && i == 0)
                    || ((c == 'e' || c == 'E') && is_exponent(input, i)))
            })
            .map(|(i, _)| i)
            .unwrap_or(input.len());

        let (number, unit) = input.split_at(split);
        let value = number.parse::<f32>().ok()?;
        Some(Self::new(value, LengthUnit::from_css(unit)))
    }

    /// Resolve to pixels.
    ///
    /// `current_font_size` drives `em`; the context supplies the root
    /// font size, the viewport and the `ch` reference advance.
    pub fn resolve(&self, ctx: &LayoutContext, current_font_size: f32) -> f32 {
        if self.is_unbounded() {
            return f32::INFINITY;
        }

        let v = self.value;
        match self.unit {
            LengthUnit::Px => v,
            LengthUnit::Pt => v * PX_PER_INCH / 72.0,
            LengthUnit::Pc => v * PX_PER_INCH / 6.0,
            LengthUnit::In => v * PX_PER_INCH,
            LengthUnit::Cm => v * PX_PER_INCH / 2.54,
            LengthUnit::Mm => v * PX_PER_INCH / 25.4,
            LengthUnit::Q => v * PX_PER_INCH / 101.6,
            LengthUnit::Em => v * current_font_size,
            LengthUnit::Rem => v * ctx.root_font_size,
            LengthUnit::Ch => v * ctx.ch_advance(current_font_size),
            LengthUnit::Vh => v / 100.0 * ctx.viewport_height,
            LengthUnit::Vw => v / 100.0 * ctx.viewport_width,
            LengthUnit::Vmin => v / 100.0 * ctx.viewport_width.min(ctx.viewport_height),
            LengthUnit::Vmax => v / 100.0 * ctx.viewport_width.max(ctx.viewport_height),
        }
    }
}

// An 'e' is an exponent marker only when a digit follows it (so "2em" stays em).
fn is_exponent(input: &str, index: usize) -> bool {
    let rest = &input[index + 1..];
    let rest = rest.strip_prefix(['-', '+']).unwrap_or(rest);
    rest.chars().next().is_some_and(|c| c.is_ascii_digit())
}

impl From<f32> for Length {
    fn from(px: f32) -> Self {
        Self::px(px)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            return f.write_str("unbounded");
        }
        write!(f, "{}{}", self.value, self.unit.to_css())
    }
}
