//! Geometry primitives for the battle plane.
//!
//! Positions are [`Point`]s with two finite `f64` coordinates. The arithmetic
//! goes through [`glam::DVec2`]; `Point` itself only exists to carry the
//! finiteness invariant, so it is validated on construction and on
//! deserialization.
//!
//! Equality is exact coordinate equality. [`move_towards`] relies on this to
//! reject a zero-length direction.
//!
//! # Example
//!
//! ```
//! use skirmish_core::geometry::{distance, move_towards, Point};
//!
//! let a = Point::new(0.0, 0.0).unwrap();
//! let b = Point::new(3.0, 4.0).unwrap();
//! assert_eq!(distance(a, b), 5.0);
//!
//! let step = move_towards(a, b, 2.5).unwrap();
//! assert!((distance(a, step) - 2.5).abs() < 1e-12);
//! ```

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkirmishError};

/// A location on the battle plane.
///
/// Both coordinates are guaranteed finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct Point {
    x: f64,
    y: f64,
}

/// Unvalidated wire form of a [`Point`].
#[derive(Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
}

impl TryFrom<RawPoint> for Point {
    type Error = SkirmishError;

    fn try_from(raw: RawPoint) -> Result<Self> {
        Self::new(raw.x, raw.y)
    }
}

impl Point {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a point, rejecting NaN and infinite coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`SkirmishError::NonFiniteCoordinate`] if either coordinate is
    /// not finite.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(SkirmishError::NonFiniteCoordinate { x, y });
        }
        Ok(Self { x, y })
    }

    /// X coordinate.
    #[must_use]
    pub const fn x(self) -> f64 {
        self.x
    }

    /// Y coordinate.
    #[must_use]
    pub const fn y(self) -> f64 {
        self.y
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        distance(self, other)
    }

    fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    fn from_dvec2(v: DVec2) -> Result<Self> {
        Self::new(v.x, v.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Euclidean distance between two points.
///
/// Symmetric, and zero exactly when `a == b`.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    length(b.as_dvec2() - a.as_dvec2())
}

/// Vector length without squaring the components, which would overflow for
/// coordinates past roughly `1e154`.
fn length(v: DVec2) -> f64 {
    v.x.hypot(v.y)
}

/// Returns the point reached by walking from `source` towards `dest` by at
/// most `max_step` units along the straight line.
///
/// If `dest` is within `max_step`, `dest` itself is returned, so the walk
/// never overshoots.
///
/// # Errors
///
/// - [`SkirmishError::InvalidStep`] if `max_step` is negative or NaN.
/// - [`SkirmishError::CoincidentPoints`] if `source == dest`; the direction is
///   undefined and callers must handle the co-located case themselves.
/// - [`SkirmishError::NonFiniteCoordinate`] if the intermediate arithmetic
///   overflows (points near `f64::MAX` on opposite sides of the origin).
pub fn move_towards(source: Point, dest: Point, max_step: f64) -> Result<Point> {
    if max_step.is_nan() || max_step < 0.0 {
        return Err(SkirmishError::InvalidStep(max_step));
    }
    if source == dest {
        return Err(SkirmishError::CoincidentPoints(source));
    }

    let from = source.as_dvec2();
    let delta = dest.as_dvec2() - from;
    let dist = length(delta);
    if dist <= max_step {
        return Ok(dest);
    }

    Point::from_dvec2(from + delta * (max_step / dist))
}
