use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel for a missing coordinate.
///
/// Points carrying this value in any coordinate are skipped by range scans
/// and step computations.
pub const MISSING: f64 = f64::MAX;

/// One data sample. `z` is an optional third coordinate (bar low value,
/// error-bar extent, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointPair {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl PointPair {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    #[must_use]
    pub const fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn missing() -> Self {
        Self {
            x: MISSING,
            y: MISSING,
            z: MISSING,
        }
    }

    /// A point is invalid when `x` or `y` is missing or non-finite.
    #[must_use]
    pub fn is_invalid(self) -> bool {
        is_missing_or_non_finite(self.x) || is_missing_or_non_finite(self.y)
    }
}

#[must_use]
pub(crate) fn is_missing_or_non_finite(value: f64) -> bool {
    value == MISSING || !value.is_finite()
}

/// Ordered, indexable sequence of points.
///
/// This is the only capability the axis core needs from a series data
/// source; storage, lazy evaluation and filtering stay with the caller.
pub trait PointList: fmt::Debug {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<PointPair>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PointList for Vec<PointPair> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<PointPair> {
        self.as_slice().get(index).copied()
    }
}

impl PointList for [PointPair] {
    fn len(&self) -> usize {
        <[PointPair]>::len(self)
    }

    fn get(&self, index: usize) -> Option<PointPair> {
        <[PointPair]>::get(self, index).copied()
    }
}

/// Axis-aligned rectangle in pixel space. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Rects of one pixel or less in either dimension cannot host a chart.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width > 1.0 && self.height > 1.0)
    }
}

/// Width/height of a measured text box, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

impl TextSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}
