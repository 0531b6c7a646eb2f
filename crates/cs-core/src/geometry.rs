//! 2D point value type used for event positions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable 2D point in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn create(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Point2D> for kurbo::Point {
    fn from(p: Point2D) -> Self {
        kurbo::Point::new(p.x, p.y)
    }
}

impl From<kurbo::Point> for Point2D {
    fn from(p: kurbo::Point) -> Self {
        Self::create(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_compare_by_value() {
        let a = Point2D::create(40.0, 60.0);
        assert_eq!(a, Point2D { x: 40.0, y: 60.0 });
        assert_ne!(a, Point2D::ORIGIN);
        assert_eq!(a.to_string(), "(40, 60)");
    }

    #[test]
    fn kurbo_interop() {
        let p: kurbo::Point = Point2D::create(1.5, -2.0).into();
        assert_eq!(p, kurbo::Point::new(1.5, -2.0));
        assert_eq!(Point2D::from(p), Point2D::create(1.5, -2.0));
    }
}
