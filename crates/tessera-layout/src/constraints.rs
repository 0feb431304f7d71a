//! Layout Constraints
//!
//! Per-axis (min, max) sizing envelope passed from a parent to a child.

use crate::box_model::Size;

/// Sizing envelope for one layout call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl Constraints {
    pub fn new(min_width: f32, max_width: f32, min_height: f32, max_height: f32) -> Self {
        Self { min_width, max_width, min_height, max_height }
    }

    /// Exactly `width` x `height`
    pub fn tight(width: f32, height: f32) -> Self {
        Self::new(width, width, height, height)
    }

    /// Anything up to `width` x `height`
    pub fn loose(width: f32, height: f32) -> Self {
        Self::new(0.0, width, 0.0, height)
    }

    /// No upper bound on either axis
    pub fn unbounded() -> Self {
        Self::loose(f32::INFINITY, f32::INFINITY)
    }

    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    pub fn has_bounded_height(&self) -> bool {
        self.max_height.is_finite()
    }

    pub fn is_tight(&self) -> bool {
        self.min_width == self.max_width && self.min_height == self.max_height
    }

    /// Whether a minimum exceeds its maximum on either axis
    pub fn is_malformed(&self) -> bool {
        self.min_width > self.max_width || self.min_height > self.max_height
    }

    /// Clamp a size into the envelope.
    ///
    /// Malformed axes (min > max) clamp toward max. Negative bounds are
    /// treated as zero and NaN sizes resolve to the minimum.
    pub fn constrain(&self, size: Size) -> Size {
        if self.is_malformed() {
            tracing::debug!(constraints = ?self, "constraint minimum exceeds maximum, clamping toward max");
        }
        Size {
            width: clamp_axis(size.width, self.min_width, self.max_width),
            height: clamp_axis(size.height, self.min_height, self.max_height),
        }
    }

    /// Whether `size` lies inside the envelope (within `f32` rounding)
    pub fn is_satisfied_by(&self, size: Size) -> bool {
        let (min_w, max_w) = normalized(self.min_width, self.max_width);
        let (min_h, max_h) = normalized(self.min_height, self.max_height);
        let eps = 1e-3;
        size.width >= min_w - eps
            && size.width <= max_w + eps
            && size.height >= min_h - eps
            && size.height <= max_h + eps
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}

fn normalized(min: f32, max: f32) -> (f32, f32) {
    let max = if max.is_nan() { f32::INFINITY } else { max.max(0.0) };
    let min = if min.is_nan() { 0.0 } else { min.max(0.0).min(max) };
    (min, max)
}

fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    let (min, max) = normalized(min, max);
    if value.is_nan() {
        return min;
    }
    value.min(max).max(min)
}
