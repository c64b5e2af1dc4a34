use std::f64::consts::{PI, TAU};

/// A position in widget coordinates (x to the right, y pointing down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `angle` on the circle of `radius` around `center`.
    pub fn polar(center: Point, radius: f64, angle: f64) -> Self {
        Self::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn offset_from(&self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let (dx, dy) = self.offset_from(other);
        dx.hypot(dy)
    }

    /// Screen angle of the vector from `origin` to this point, in `(-PI, PI]`.
    pub fn angle_from(&self, origin: Point) -> f64 {
        let (dx, dy) = self.offset_from(origin);
        dy.atan2(dx)
    }
}

/// Wraps an angle into `[0, TAU)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Shortest distance between two angles, in `[0, PI]`.
pub fn angle_difference(a: f64, b: f64) -> f64 {
    ((a - b + PI).rem_euclid(TAU) - PI).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_polar_round_trip() {
        let center = Point::new(110.0, 110.0);
        for i in 0..16 {
            let angle = -PI + i as f64 * TAU / 16.0 + 0.01;
            let p = Point::polar(center, 85.0, angle);
            assert!((p.distance_to(center) - 85.0).abs() < EPS);
            assert!(angle_difference(p.angle_from(center), angle) < EPS);
        }
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < EPS);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < EPS);
        assert_eq!(normalize_angle(TAU), 0.0);
        let tiny = normalize_angle(-1e-18);
        assert!((0.0..TAU).contains(&tiny));
    }

    #[test]
    fn test_angle_difference_wraps() {
        assert!((angle_difference(0.1, TAU - 0.1) - 0.2).abs() < EPS);
        assert!((angle_difference(-PI + 0.05, PI - 0.05) - 0.1).abs() < EPS);
        assert!((angle_difference(0.0, PI) - PI).abs() < EPS);
    }

    #[test]
    fn test_screen_angles_point_down_for_positive_y() {
        let origin = Point::default();
        assert!((Point::new(0.0, 10.0).angle_from(origin) - PI / 2.0).abs() < EPS);
        assert!((Point::new(0.0, -10.0).angle_from(origin) + PI / 2.0).abs() < EPS);
    }
}
