//! Small geometry types used by the widget layer. The renderer itself works
//! on raw `[f32; 2]` positions; widgets need named fields and clamping.

use std::ops::{Add, Sub};

/// Sentinel for a widget dimension that should be derived by the widget
/// itself (from its other dimension, or from a built-in default).
pub const AUTO_DIMENSION: f32 = f32::INFINITY;

/// A point in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from(value: (f32, f32)) -> Self {
        Point::new(value.0, value.1)
    }
}

/// A size in logical pixels. Either dimension may be [`AUTO_DIMENSION`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Both dimensions auto-derived.
    pub const AUTO: Self = Self {
        width: AUTO_DIMENSION,
        height: AUTO_DIMENSION,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<(f32, f32)> for Size {
    fn from(value: (f32, f32)) -> Self {
        Size::new(value.0, value.1)
    }
}

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: impl Into<Point>, size: impl Into<Size>) -> Self {
        Self {
            position: position.into(),
            size: size.into(),
        }
    }

    pub fn max(&self) -> Point {
        Point::new(
            self.position.x + self.size.width,
            self.position.y + self.size.height,
        )
    }

    /// True if the point lies within the rectangle, edges included.
    pub fn contains(&self, point: Point) -> bool {
        let max = self.max();
        point.x >= self.position.x
            && point.y >= self.position.y
            && point.x <= max.x
            && point.y <= max.y
    }

    /// Clamps a point componentwise into the rectangle.
    pub fn clamp_point(&self, point: Point) -> Point {
        let max = self.max();
        Point::new(
            point.x.clamp(self.position.x, max.x),
            point.y.clamp(self.position.y, max.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_includes_edges() {
        let r = Rect::new((10.0, 10.0), (20.0, 20.0));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(30.0, 30.0)));
        assert!(!r.contains(Point::new(30.1, 30.0)));
        assert!(!r.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn clamp_point_pins_to_nearest_edge() {
        let r = Rect::new((0.0, 0.0), (100.0, 50.0));
        assert_eq!(r.clamp_point(Point::new(-5.0, 25.0)), Point::new(0.0, 25.0));
        assert_eq!(
            r.clamp_point(Point::new(500.0, 500.0)),
            Point::new(100.0, 50.0)
        );
        assert_eq!(r.clamp_point(Point::new(40.0, 10.0)), Point::new(40.0, 10.0));
    }
}
