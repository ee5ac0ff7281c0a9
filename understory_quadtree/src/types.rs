// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::fmt::Debug;

/// Identifier carried by a stored rectangle.
///
/// Values are opaque to the index. [`Rect::SYNTHETIC_ID`] is reserved for rectangles the
/// index builds for itself (node bounds, clipped viewports).
pub type RectId = i64;

/// Numeric scalar abstraction for canvas coordinates.
///
/// This trait provides the handful of operations the quadtree needs: edge arithmetic,
/// viewport clipping, and halving a node's extent when it subdivides.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Max of the two scalar values.
    fn max(a: Self, b: Self) -> Self;

    /// Min of the two scalar values.
    fn min(a: Self, b: Self) -> Self;

    /// Half of `v`, truncated toward zero to a whole number.
    ///
    /// For the non-negative extents a quadtree works with this is `floor(v / 2)`.
    fn half(v: Self) -> Self;
}

impl Scalar for i32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline(always)]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        core::cmp::max(a, b)
    }

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        core::cmp::min(a, b)
    }

    #[inline]
    fn half(v: Self) -> Self {
        v / 2
    }
}

impl Scalar for i64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline(always)]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        core::cmp::max(a, b)
    }

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        core::cmp::min(a, b)
    }

    #[inline]
    fn half(v: Self) -> Self {
        v / 2
    }
}

impl Scalar for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        Self::max(a, b)
    }

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        Self::min(a, b)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Truncation toward zero is the point; the range guard keeps the cast exact."
    )]
    #[inline]
    fn half(v: Self) -> Self {
        // Every f32 at or beyond 2^23 in magnitude is already whole.
        const WHOLE: f32 = 8_388_608.0;
        let h = v * 0.5;
        if h >= WHOLE || h <= -WHOLE {
            h
        } else {
            (h as i32) as Self
        }
    }
}

impl Scalar for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        Self::max(a, b)
    }

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        Self::min(a, b)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Truncation toward zero is the point; the range guard keeps the cast exact."
    )]
    #[inline]
    fn half(v: Self) -> Self {
        // Every f64 at or beyond 2^52 in magnitude is already whole.
        const WHOLE: f64 = 4_503_599_627_370_496.0;
        let h = v * 0.5;
        if h >= WHOLE || h <= -WHOLE {
            h
        } else {
            (h as i64) as Self
        }
    }
}

/// An identified, axis-aligned rectangle given by its top-left corner and size.
///
/// Rectangles are plain values: the index copies them in on insert and copies them out on
/// query. Edges are half-open, so a rectangle covers `[x, x + width) × [y, y + height)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<T> {
    /// Caller-supplied identifier.
    pub id: RectId,
    /// Left edge.
    pub x: T,
    /// Top edge.
    pub y: T,
    /// Horizontal extent. Zero or negative makes the rectangle invalid.
    pub width: T,
    /// Vertical extent. Zero or negative makes the rectangle invalid.
    pub height: T,
}

impl<T> Rect<T> {
    /// Identifier used for node bounds and query regions.
    pub const SYNTHETIC_ID: RectId = -1;

    /// Create a rectangle from an identifier, origin, and size.
    #[inline(always)]
    pub const fn new(id: RectId, x: T, y: T, width: T, height: T) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
        }
    }

    /// Create an unidentified rectangle, as used for node bounds and viewports.
    #[inline(always)]
    pub const fn synthetic(x: T, y: T, width: T, height: T) -> Self {
        Self::new(Self::SYNTHETIC_ID, x, y, width, height)
    }

    /// Whether this rectangle carries [`Rect::SYNTHETIC_ID`].
    #[inline]
    pub const fn is_synthetic(&self) -> bool {
        self.id == Self::SYNTHETIC_ID
    }
}

impl<T: Scalar> Rect<T> {
    /// The right edge, `x + width`.
    #[inline]
    pub fn right(&self) -> T {
        T::add(self.x, self.width)
    }

    /// The bottom edge, `y + height`.
    #[inline]
    pub fn bottom(&self) -> T {
        T::add(self.y, self.height)
    }

    /// Determines whether this rectangle overlaps another with positive area.
    ///
    /// Edges are half-open: two rectangles that only share an edge do *not* intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use understory_quadtree::Rect;
    ///
    /// let a = Rect::new(1, 0, 0, 10, 10);
    /// assert!(a.intersects(&Rect::new(2, 5, 5, 10, 10)));
    ///
    /// // Touching at x = 10 is not an intersection.
    /// assert!(!a.intersects(&Rect::new(3, 10, 0, 10, 10)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        if self.x >= other.right() || self.right() <= other.x {
            return false;
        }
        !(self.y >= other.bottom() || self.bottom() <= other.y)
    }

    /// Whether the rectangle has a strictly positive width and height.
    ///
    /// The index never stores invalid rectangles. Assumes no NaN.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > T::zero() && self.height > T::zero()
    }
}

#[cfg(feature = "kurbo_adapter")]
impl Rect<f64> {
    /// Create a rectangle from a [`kurbo::Rect`], normalizing inverted corners.
    pub fn from_kurbo(id: RectId, rect: kurbo::Rect) -> Self {
        let r = rect.abs();
        Self::new(id, r.x0, r.y0, r.width(), r.height())
    }

    /// The same region as a [`kurbo::Rect`]. The identifier is dropped.
    pub fn to_kurbo(&self) -> kurbo::Rect {
        kurbo::Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}
