use crate::error::DialError;
use crate::geometry::Point;
use crate::sweep::Sweep;

pub const DEFAULT_STEP: f64 = 1.0;
pub const DEFAULT_RADIUS: f64 = 85.0;
pub const DEFAULT_TOLERANCE: f64 = 32.0; // px either side of the ring

/// Construction parameters of a dial.
#[derive(Debug, Clone, PartialEq)]
pub struct DialConfig {
    pub min: f64,
    pub max: f64,
    /// Rounding granularity of the value, anchored at `min`.
    pub step: f64,
    pub sweep: Sweep,
    /// Screen angle (radians, y down) where the sweep starts.
    pub start_angle: f64,
    pub center: Point,
    pub radius: f64,
    /// Half-width of the band around `radius` that accepts pointer input.
    pub tolerance: f64,
}

impl DialConfig {
    pub fn new(min: f64, max: f64) -> Self {
        let sweep = Sweep::default();
        Self {
            min,
            max,
            step: DEFAULT_STEP,
            sweep,
            start_angle: sweep.default_start_angle(),
            center: Point::default(),
            radius: DEFAULT_RADIUS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Also resets the start angle to the sweep's natural start.
    pub fn with_sweep(mut self, sweep: Sweep) -> Self {
        self.sweep = sweep;
        self.start_angle = sweep.default_start_angle();
        self
    }

    pub fn with_start_angle(mut self, start_angle: f64) -> Self {
        self.start_angle = start_angle;
        self
    }

    pub fn with_ring(mut self, center: Point, radius: f64) -> Self {
        self.center = center;
        self.radius = radius;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<(), DialError> {
        let finite = [
            ("min", self.min),
            ("max", self.max),
            ("step", self.step),
            ("start_angle", self.start_angle),
            ("center.x", self.center.x),
            ("center.y", self.center.y),
            ("radius", self.radius),
            ("tolerance", self.tolerance),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DialError::NonFinite(*name));
        }

        if self.max <= self.min {
            return Err(DialError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        if self.step <= 0.0 {
            return Err(DialError::InvalidStep(self.step));
        }
        if self.radius <= 0.0 {
            return Err(DialError::InvalidRadius(self.radius));
        }
        if self.tolerance < 0.0 {
            return Err(DialError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert_eq!(DialConfig::new(16.0, 30.0).validate(), Ok(()));
    }

    #[test]
    fn test_invalid_configs() {
        let base = DialConfig::new(16.0, 30.0);
        let cases = vec![
            (
                DialConfig::new(30.0, 16.0),
                DialError::InvalidBounds {
                    min: 30.0,
                    max: 16.0,
                },
            ),
            (
                DialConfig::new(20.0, 20.0),
                DialError::InvalidBounds {
                    min: 20.0,
                    max: 20.0,
                },
            ),
            (base.clone().with_step(0.0), DialError::InvalidStep(0.0)),
            (
                base.clone().with_ring(Point::default(), -1.0),
                DialError::InvalidRadius(-1.0),
            ),
            (
                base.clone().with_tolerance(-4.0),
                DialError::InvalidTolerance(-4.0),
            ),
            (
                base.clone().with_step(f64::NAN),
                DialError::NonFinite("step"),
            ),
            (
                base.clone().with_ring(Point::new(f64::INFINITY, 0.0), 10.0),
                DialError::NonFinite("center.x"),
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_with_sweep_resets_start_angle() {
        let config = DialConfig::new(0.0, 1.0)
            .with_start_angle(1.0)
            .with_sweep(Sweep::FullCircle);
        assert_eq!(config.start_angle, Sweep::FullCircle.default_start_angle());
    }
}
