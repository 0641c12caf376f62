//! Paints describe how a shape's pixels are colored. They are evaluated on
//! the CPU at tessellation vertices; since the only gradient kind is linear,
//! per-vertex evaluation plus hardware interpolation reproduces the gradient
//! exactly.

use smallvec::SmallVec;

use crate::color::Color;
use crate::math::Point;

/// A two-stop linear gradient between `start` and `end`, clamped outside
/// that span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub from: Color,
    pub to: Color,
}

impl LinearGradient {
    pub fn new(
        start: impl Into<Point>,
        end: impl Into<Point>,
        from: Color,
        to: Color,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            from,
            to,
        }
    }
}

/// How a shape is colored when drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// A single color over the whole shape.
    Solid(Color),
    /// A linear gradient evaluated at each vertex position.
    Linear(LinearGradient),
    /// Colors pinned to the control points of a strip shape, interpolated
    /// along its length. Used for the hue strip of the color picker.
    PointColor(SmallVec<[Color; 8]>),
}

impl Paint {
    pub fn point_colors(colors: impl IntoIterator<Item = Color>) -> Self {
        Paint::PointColor(colors.into_iter().collect())
    }

    /// Evaluates the paint at a vertex. `position` is in shape-local
    /// coordinates; `t` is the normalized advancement along a stroked path
    /// (zero for filled shapes).
    pub fn eval(&self, position: Point, t: f32) -> [f32; 4] {
        match self {
            Paint::Solid(color) => color.normalize(),
            Paint::Linear(gradient) => {
                let axis = gradient.end - gradient.start;
                let len_sq = axis.x * axis.x + axis.y * axis.y;
                let factor = if len_sq == 0.0 {
                    0.0
                } else {
                    let rel = position - gradient.start;
                    ((rel.x * axis.x + rel.y * axis.y) / len_sq).clamp(0.0, 1.0)
                };
                lerp_rgba(gradient.from.normalize(), gradient.to.normalize(), factor)
            }
            Paint::PointColor(colors) => match colors.len() {
                0 => Color::WHITE.normalize(),
                1 => colors[0].normalize(),
                n => {
                    let x = t.clamp(0.0, 1.0) * (n - 1) as f32;
                    let i = (x as usize).min(n - 2);
                    lerp_rgba(colors[i].normalize(), colors[i + 1].normalize(), x - i as f32)
                }
            },
        }
    }
}

impl From<Color> for Paint {
    fn from(value: Color) -> Self {
        Paint::Solid(value)
    }
}

fn lerp_rgba(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_gradient_hits_endpoints_and_clamps() {
        let paint = Paint::Linear(LinearGradient::new(
            (0.0, 0.0),
            (100.0, 0.0),
            Color::WHITE,
            Color::WHITE.with_alpha(0),
        ));

        assert_eq!(paint.eval(Point::new(0.0, 17.0), 0.0), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(paint.eval(Point::new(100.0, 0.0), 0.0), [1.0, 1.0, 1.0, 0.0]);
        // Positions past the end stay clamped to the last stop.
        assert_eq!(paint.eval(Point::new(250.0, 0.0), 0.0), [1.0, 1.0, 1.0, 0.0]);
        let mid = paint.eval(Point::new(50.0, 0.0), 0.0);
        assert!((mid[3] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn point_colors_interpolate_along_advancement() {
        let paint = Paint::point_colors([
            Color::rgb(255, 0, 0),
            Color::rgb(0, 255, 0),
            Color::rgb(0, 0, 255),
        ]);

        assert_eq!(paint.eval(Point::ZERO, 0.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(paint.eval(Point::ZERO, 0.5), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(paint.eval(Point::ZERO, 1.0), [0.0, 0.0, 1.0, 1.0]);

        let quarter = paint.eval(Point::ZERO, 0.25);
        assert!((quarter[0] - 0.5).abs() < 1e-5);
        assert!((quarter[1] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn degenerate_gradient_uses_first_stop() {
        let paint = Paint::Linear(LinearGradient::new(
            (10.0, 10.0),
            (10.0, 10.0),
            Color::BLACK,
            Color::WHITE,
        ));
        assert_eq!(paint.eval(Point::new(99.0, 99.0), 0.0), [0.0, 0.0, 0.0, 1.0]);
    }
}
