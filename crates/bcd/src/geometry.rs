//! Planar point helpers used by the graph and its consumers.
//!
//! Coordinates follow image convention: `x` is the column, `y` grows downwards.

use nalgebra::Point2;

/// Turn direction of the path `a → b → c` in the mathematical (y-up) frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Z-component of `(b - a) × (c - a)`.
#[inline]
pub fn cross(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Orientation of three points; exact zero counts as collinear.
pub fn orientation(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Orientation {
    let z = cross(a, b, c);
    if z > 0.0 {
        Orientation::CounterClockwise
    } else if z < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

#[inline]
pub fn distance(a: Point2<f64>, b: Point2<f64>) -> f64 {
    nalgebra::distance(&a, &b)
}

#[inline]
pub fn midpoint(a: Point2<f64>, b: Point2<f64>) -> Point2<f64> {
    nalgebra::center(&a, &b)
}

/// Shoelace area of a closed polygon; positive for counterclockwise order (y-up).
pub fn signed_area(poly: &[Point2<f64>]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }
    let origin = poly[0];
    poly.windows(2)
        .skip(1)
        .map(|w| cross(origin, w[0], w[1]))
        .sum::<f64>()
        * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::point;

    #[test]
    fn orientation_of_axis_turns() {
        let a = point![0.0, 0.0];
        let b = point![1.0, 0.0];
        assert_eq!(orientation(a, b, point![1.0, 1.0]), Orientation::CounterClockwise);
        assert_eq!(orientation(a, b, point![1.0, -1.0]), Orientation::Clockwise);
        assert_eq!(orientation(a, b, point![3.0, 0.0]), Orientation::Collinear);
    }

    #[test]
    fn distance_and_midpoint() {
        let a = point![0.0, 1.0];
        let b = point![3.0, 5.0];
        assert!((distance(a, b) - 5.0).abs() < 1e-12);
        let m = midpoint(a, b);
        assert!((m.x - 1.5).abs() < 1e-12 && (m.y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn signed_area_unit_square() {
        let ccw = [
            point![0.0, 0.0],
            point![1.0, 0.0],
            point![1.0, 1.0],
            point![0.0, 1.0],
        ];
        assert!((signed_area(&ccw) - 1.0).abs() < 1e-12);
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert!((signed_area(&cw) + 1.0).abs() < 1e-12);
        assert_eq!(signed_area(&ccw[..2]), 0.0);
    }
}
