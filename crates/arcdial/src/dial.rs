use crate::config::DialConfig;
use crate::error::DialError;
use crate::geometry::{Point, normalize_angle};
use crate::sweep::Sweep;
use std::f64::consts::{PI, TAU};

/// Distances below this count as "on the center", where the angle is undefined.
const CENTER_EPSILON: f64 = 1e-9;

/// Outcome of mapping one pointer position onto the dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub value: f64,
    /// Sweep-relative angle the value was derived from, in `[0, span]`.
    pub angle: f64,
    /// The raw angle jumped more than half a turn and was reinterpreted across the seam.
    pub wrapped: bool,
}

/// Where to draw the handle for a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlePosition {
    pub point: Point,
    /// Sweep-relative angle in `[0, span]`.
    pub angle: f64,
    /// Absolute screen angle, `start_angle + angle`.
    pub screen_angle: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialAction {
    pub value_changed: bool,
    pub should_redraw: bool,
}

impl DialAction {
    pub fn new(value_changed: bool, should_redraw: bool) -> Self {
        Self {
            value_changed,
            should_redraw,
        }
    }

    pub fn redraw() -> Self {
        Self::new(false, true)
    }

    pub fn merge(self, other: Self) -> Self {
        Self::new(
            self.value_changed || other.value_changed,
            self.should_redraw || other.should_redraw,
        )
    }
}

/// State of one dial widget: value, ring geometry and the active drag session.
#[derive(Debug, Clone)]
pub struct DialState {
    config: DialConfig,
    value: f64,
    is_dragging: bool,
    last_angle: f64,
}

impl DialState {
    pub fn new(config: DialConfig, initial: f64) -> Result<Self, DialError> {
        config.validate()?;
        if !initial.is_finite() {
            return Err(DialError::NonFinite("initial"));
        }

        let mut state = Self {
            config,
            value: 0.0,
            is_dragging: false,
            last_angle: 0.0,
        };
        state.value = state.snap(initial);
        state.last_angle = state.angle_for(state.value);
        Ok(state)
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.config.min
    }

    pub fn max(&self) -> f64 {
        self.config.max
    }

    pub fn step_size(&self) -> f64 {
        self.config.step
    }

    pub fn sweep(&self) -> Sweep {
        self.config.sweep
    }

    pub fn center(&self) -> Point {
        self.config.center
    }

    pub fn radius(&self) -> f64 {
        self.config.radius
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn last_angle(&self) -> f64 {
        self.last_angle
    }

    /// Fraction of the range covered by the current value, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.value - self.config.min) / (self.config.max - self.config.min)
    }

    /// Maps a pointer position to a value without touching the state. The seam correction is
    /// applied against `last_angle`. `None` when the point is off the ring or degenerate.
    pub fn resolve(&self, point: Point) -> Option<Resolution> {
        self.resolve_from(point, Some(self.last_angle))
    }

    /// Maps a pointer position to a value and stores it. Rejected points leave the value as is.
    pub fn position_to_value(&mut self, point: Point) -> f64 {
        match self.resolve(point) {
            Some(resolution) => self.apply(resolution),
            None => log::trace!("Ignoring pointer off the ring at {:?}", point),
        }
        self.value
    }

    /// Inverse of [`Self::position_to_value`]. Out-of-range values are clamped first.
    pub fn value_to_position(&self, value: f64) -> HandlePosition {
        let value = if value.is_finite() {
            value.clamp(self.config.min, self.config.max)
        } else {
            self.value
        };
        let angle = self.angle_for(value);
        let screen_angle = self.config.start_angle + angle;

        HandlePosition {
            point: Point::polar(self.config.center, self.config.radius, screen_angle),
            angle,
            screen_angle,
        }
    }

    /// Decimal places of the step grid, enough to print any value without float noise.
    pub fn precision(&self) -> usize {
        let DialConfig { min, max, step, .. } = self.config;
        [min, max, step].into_iter().map(decimals).max().unwrap_or(0) as usize
    }

    /// Every value the dial can hold, ascending. Ends with `max` even when the step does not
    /// divide the range.
    pub fn grid_values(&self) -> Vec<f64> {
        let DialConfig { min, max, step, .. } = self.config;
        let count = ((max - min) / step + 1e-9).floor() as usize;
        let mut values: Vec<f64> = (0..=count)
            .map(|i| self.snap(min + i as f64 * step))
            .collect();
        values.dedup();
        if values.last().is_some_and(|&last| last < max) {
            values.push(max);
        }
        values
    }

    pub fn handle(&self) -> HandlePosition {
        self.value_to_position(self.value)
    }

    /// Begins a gesture. A touch on the ring moves the handle straight there.
    pub fn drag_start(&mut self, point: Point) -> DialAction {
        let previous = self.value;
        self.is_dragging = true;

        // a fresh gesture has no history to unwrap against
        match self.resolve_from(point, None) {
            Some(resolution) => self.apply(resolution),
            None => self.last_angle = self.angle_for(self.value),
        }

        let changed = self.value != previous;
        if changed {
            log::debug!("Dial jumped to {}", self.value);
        }
        DialAction::new(changed, true)
    }

    pub fn drag_move(&mut self, point: Point) -> DialAction {
        if !self.is_dragging {
            return DialAction::default();
        }

        let previous = self.value;
        let changed = self.position_to_value(point) != previous;
        if changed {
            log::debug!("Dial moved to {}", self.value);
        }
        DialAction::new(changed, changed)
    }

    pub fn drag_end(&mut self) -> DialAction {
        let was_dragging = std::mem::replace(&mut self.is_dragging, false);
        self.last_angle = self.angle_for(self.value);
        DialAction::new(false, was_dragging)
    }

    pub fn drag_cancel(&mut self) -> DialAction {
        self.drag_end()
    }

    /// Discrete change from +/- controls, independent of the pointer.
    pub fn step(&mut self, delta: f64) -> DialAction {
        if !delta.is_finite() {
            return DialAction::default();
        }
        self.set_value(self.value + delta)
    }

    /// Programmatic change; snapped to the step grid and clamped.
    pub fn set_value(&mut self, value: f64) -> DialAction {
        if !value.is_finite() {
            return DialAction::default();
        }

        let previous = self.value;
        self.value = self.snap(value);
        self.last_angle = self.angle_for(self.value);

        let changed = self.value != previous;
        DialAction::new(changed, changed)
    }

    /// Moves the ring after the hosting widget was resized. Invalid geometry is ignored.
    pub fn relayout(&mut self, center: Point, radius: f64) -> DialAction {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            log::warn!("Ignoring invalid dial layout {:?} r={}", center, radius);
            return DialAction::default();
        }
        if center == self.config.center && radius == self.config.radius {
            return DialAction::default();
        }

        self.config.center = center;
        self.config.radius = radius;
        DialAction::redraw()
    }

    fn apply(&mut self, resolution: Resolution) {
        if resolution.wrapped {
            log::trace!(
                "Seam crossing from {:.3} rad, pinned at {:.3} rad",
                self.last_angle,
                resolution.angle
            );
        }
        self.value = resolution.value;
        self.last_angle = resolution.angle;
    }

    fn resolve_from(&self, point: Point, reference: Option<f64>) -> Option<Resolution> {
        let angle = self.ring_angle(point)?;
        let (angle, wrapped) = match reference {
            Some(last) => unwrap_seam(angle, last),
            None => (angle, false),
        };
        let angle = angle.clamp(0.0, self.config.sweep.span());

        Some(Resolution {
            value: self.value_for(angle),
            angle,
            wrapped,
        })
    }

    /// Sweep-relative angle of a point inside the tolerance band, already pulled onto the arc.
    fn ring_angle(&self, point: Point) -> Option<f64> {
        if !point.is_finite() {
            return None;
        }

        let distance = point.distance_to(self.config.center);
        if distance < CENTER_EPSILON
            || (distance - self.config.radius).abs() > self.config.tolerance
        {
            return None;
        }

        let relative = normalize_angle(point.angle_from(self.config.center) - self.config.start_angle);
        Some(self.config.sweep.clamp_angle(relative))
    }

    fn angle_for(&self, value: f64) -> f64 {
        let DialConfig { min, max, sweep, .. } = self.config;
        ((value - min) / (max - min)).clamp(0.0, 1.0) * sweep.span()
    }

    fn value_for(&self, angle: f64) -> f64 {
        let DialConfig { min, max, sweep, .. } = self.config;
        self.snap(min + angle / sweep.span() * (max - min))
    }

    /// Nearest stop at or below `max` on the grid anchored at `min`, with `max` itself counting
    /// as a stop. Rounded to the decimals the configuration is written in.
    fn snap(&self, value: f64) -> f64 {
        let DialConfig { min, max, step, .. } = self.config;
        let steps = ((value - min) / step).round();
        let on_grid = (min + steps * step).clamp(min, max);
        let stop = if (max - value).abs() < (on_grid - value).abs() {
            max
        } else {
            on_grid
        };
        round_to(stop, self.precision() as u32).clamp(min, max)
    }
}

const MAX_DECIMALS: u32 = 6;

/// Number of decimals needed to write `x` exactly, up to [`MAX_DECIMALS`].
fn decimals(x: f64) -> u32 {
    (0..MAX_DECIMALS)
        .find(|&d| {
            let scaled = x * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() <= 1e-9 * scaled.abs().max(1.0)
        })
        .unwrap_or(MAX_DECIMALS)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// A jump of more than half a turn between frames cannot be a real drag; read it one turn over.
fn unwrap_seam(angle: f64, last: f64) -> (f64, bool) {
    let delta = angle - last;
    if delta > PI {
        (angle - TAU, true)
    } else if delta < -PI {
        (angle + TAU, true)
    } else {
        (angle, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const CENTER: Point = Point { x: 110.0, y: 110.0 };
    const RADIUS: f64 = 85.0;

    fn semicircle() -> DialState {
        let config = DialConfig::new(16.0, 30.0).with_ring(CENTER, RADIUS);
        DialState::new(config, 22.0).unwrap()
    }

    fn full_circle() -> DialState {
        let config = DialConfig::new(16.0, 30.0)
            .with_sweep(Sweep::FullCircle)
            .with_ring(CENTER, RADIUS);
        DialState::new(config, 22.0).unwrap()
    }

    /// Point on the ring at a sweep-relative angle.
    fn on_ring(state: &DialState, angle: f64, radius_offset: f64) -> Point {
        Point::polar(
            state.center(),
            state.radius() + radius_offset,
            state.config().start_angle + angle,
        )
    }

    fn grid(state: &DialState) -> Vec<f64> {
        state.grid_values()
    }

    /// 16 to 30 in steps of 6: the grid is 16, 22, 28 and then `max`.
    fn uneven() -> DialState {
        let config = DialConfig::new(16.0, 30.0)
            .with_step(6.0)
            .with_ring(CENTER, RADIUS);
        DialState::new(config, 30.0).unwrap()
    }

    #[test]
    fn test_semicircle_endpoints_and_midpoint() {
        let mut state = semicircle();

        // left end of the ring
        assert_eq!(state.position_to_value(Point::new(25.0, 110.0)), 16.0);
        // top of the ring
        assert_eq!(state.position_to_value(Point::new(110.0, 25.0)), 23.0);
        // right end of the ring
        assert_eq!(state.position_to_value(Point::new(195.0, 110.0)), 30.0);
    }

    #[test]
    fn test_round_trip_on_grid() {
        for base in [semicircle(), full_circle(), uneven()] {
            for value in grid(&base) {
                let mut state = base.clone();
                state.set_value(value);
                let handle = state.value_to_position(value);
                assert_eq!(state.position_to_value(handle.point), value);
            }
        }
    }

    #[test]
    fn test_semicircle_round_trip_from_any_state() {
        let values = grid(&semicircle());
        for &current in &values {
            for &target in &values {
                let mut state = semicircle();
                state.set_value(current);
                let point = state.value_to_position(target).point;
                assert_eq!(state.position_to_value(point), target);
            }
        }
    }

    #[test]
    fn test_half_step_granularity() {
        let config = DialConfig::new(16.0, 30.0)
            .with_step(0.5)
            .with_ring(CENTER, RADIUS);
        let mut state = DialState::new(config, 22.2).unwrap();
        assert_eq!(state.value(), 22.0);

        for value in grid(&state) {
            let point = state.value_to_position(value).point;
            state.drag_start(point);
            assert_eq!(state.value(), value);
            state.drag_end();
        }
    }

    #[test]
    fn test_max_is_a_stop_when_step_does_not_divide_range() {
        let mut state = uneven();
        assert_eq!(state.value(), 30.0);
        assert_eq!(state.grid_values(), vec![16.0, 22.0, 28.0, 30.0]);

        state.set_value(16.0);
        state.drag_start(Point::new(195.0, 110.0));
        assert_eq!(state.value(), 30.0);
        state.drag_end();

        // between 28 and 30, the closer stop wins
        assert!(state.set_value(28.9).value_changed);
        assert_eq!(state.value(), 28.0);
        state.set_value(29.2);
        assert_eq!(state.value(), 30.0);

        state.set_value(22.0);
        state.step(6.0);
        assert_eq!(state.value(), 28.0);
        state.step(6.0);
        assert_eq!(state.value(), 30.0);
        let point = state.value_to_position(30.0).point;
        assert_eq!(state.position_to_value(point), 30.0);

        state.step(-6.0);
        assert_eq!(state.value(), 22.0);
    }

    #[test]
    fn test_fractional_steps_have_no_float_noise() {
        let config = DialConfig::new(16.0, 30.0)
            .with_step(0.1)
            .with_ring(CENTER, RADIUS);
        let mut state = DialState::new(config, 16.0).unwrap();
        assert_eq!(state.precision(), 1);

        for _ in 0..140 {
            state.step(0.1);
            let printed = state.value().to_string();
            assert!(printed.len() <= 4, "noisy value {}", printed);
        }
        assert_eq!(state.value(), 30.0);

        let grid = state.grid_values();
        assert_eq!(grid.len(), 141);
        assert_eq!(grid[82], 24.2);
        assert_eq!(grid.last(), Some(&30.0));

        state.set_value(24.23);
        assert_eq!(state.value(), 24.2);
    }

    #[test]
    fn test_precision_follows_configuration() {
        assert_eq!(semicircle().precision(), 0);
        let config = DialConfig::new(16.0, 30.0).with_step(0.5);
        assert_eq!(DialState::new(config, 22.0).unwrap().precision(), 1);
        let config = DialConfig::new(-1.25, 1.0).with_step(0.25);
        assert_eq!(DialState::new(config, 0.0).unwrap().precision(), 2);
    }

    #[test]
    fn test_value_rounds_instead_of_truncating() {
        let mut state = semicircle();
        // 20.6 sits past the halfway mark between 20 and 21
        let angle = (20.6 - 16.0) / 14.0 * PI;
        assert_eq!(state.position_to_value(on_ring(&state, angle, 0.0)), 21.0);
        let angle = (20.4 - 16.0) / 14.0 * PI;
        assert_eq!(state.position_to_value(on_ring(&state, angle, 0.0)), 20.0);
    }

    #[test]
    fn test_monotonic_along_sweep() {
        for mut state in [semicircle(), full_circle()] {
            let span = state.sweep().span();
            state.drag_start(on_ring(&state, 0.0, 0.0));
            let mut previous = state.value();
            assert_eq!(previous, state.min());

            for i in 1..=720 {
                let angle = span * i as f64 / 720.0;
                let offset = (i % 7) as f64 * 3.0 - 9.0;
                state.drag_move(on_ring(&state, angle, offset));
                assert!(
                    state.value() >= previous,
                    "value went from {} to {} at {}",
                    previous,
                    state.value(),
                    angle
                );
                previous = state.value();
            }
            assert_eq!(previous, state.max());
        }
    }

    #[test]
    fn test_points_outside_tolerance_are_ignored() {
        let mut state = semicircle();
        let tolerance = state.config().tolerance;

        for point in [
            on_ring(&state, FRAC_PI_2, tolerance + 1.0),
            on_ring(&state, FRAC_PI_2, -(tolerance + 1.0)),
            on_ring(&state, 0.3, 500.0),
            CENTER,
            Point::new(f64::NAN, 40.0),
            Point::new(f64::INFINITY, f64::INFINITY),
        ] {
            assert_eq!(state.resolve(point), None);
            assert_eq!(state.position_to_value(point), 22.0);
        }

        // just inside the band still counts
        assert_eq!(
            state.position_to_value(on_ring(&state, FRAC_PI_2, tolerance - 1.0)),
            23.0
        );
    }

    #[test]
    fn test_out_of_sweep_clamps_to_nearest_end() {
        let mut state = semicircle();
        // below center, slightly right of the bottom: closer to the right end
        assert_eq!(state.position_to_value(on_ring(&state, PI + 0.4, 0.0)), 30.0);

        let mut state = semicircle();
        // just under the left end
        assert_eq!(
            state.position_to_value(on_ring(&state, TAU - 0.2, 0.0)),
            16.0
        );
    }

    #[test]
    fn test_small_drag_does_not_wrap() {
        let mut state = semicircle();
        let from = state.value_to_position(20.0).point;
        let to = state.value_to_position(21.0).point;

        state.drag_start(from);
        assert_eq!(state.value(), 20.0);
        let before = state.last_angle();

        let resolution = state.resolve(to).unwrap();
        assert!(!resolution.wrapped);
        assert!((resolution.angle - before).abs() < PI);

        let action = state.drag_move(to);
        assert!(action.value_changed);
        assert_eq!(state.value(), 21.0);
        assert!((state.last_angle() - before).abs() < PI);
    }

    #[test]
    fn test_full_circle_pins_at_max_across_seam() {
        let mut state = full_circle();
        state.drag_start(on_ring(&state, TAU - 0.3, 0.0));
        state.drag_move(on_ring(&state, TAU - 0.05, 0.0));
        assert_eq!(state.value(), 30.0);

        // crossing the top would naively snap to the minimum
        let resolution = state.resolve(on_ring(&state, 0.1, 0.0)).unwrap();
        assert!(resolution.wrapped);
        state.drag_move(on_ring(&state, 0.1, 0.0));
        state.drag_move(on_ring(&state, 0.4, 0.0));
        assert_eq!(state.value(), 30.0);

        // coming back releases the pin
        state.drag_move(on_ring(&state, TAU - 0.9, 0.0));
        assert!(state.value() < 30.0);
    }

    #[test]
    fn test_full_circle_pins_at_min_across_seam() {
        let mut state = full_circle();
        state.drag_start(on_ring(&state, 0.2, 0.0));
        state.drag_move(on_ring(&state, 0.02, 0.0));
        assert_eq!(state.value(), 16.0);

        state.drag_move(on_ring(&state, TAU - 0.1, 0.0));
        assert_eq!(state.value(), 16.0);
        assert!(state.is_dragging());
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut state = semicircle();
        assert!(!state.is_dragging());

        // moves without a session are hover, not input
        let action = state.drag_move(on_ring(&state, 0.0, 0.0));
        assert_eq!(action, DialAction::default());
        assert_eq!(state.value(), 22.0);

        let action = state.drag_start(on_ring(&state, FRAC_PI_2, 0.0));
        assert!(state.is_dragging());
        assert_eq!(action, DialAction::new(true, true));
        assert_eq!(state.value(), 23.0);

        // same bucket, no notification
        let action = state.drag_move(on_ring(&state, FRAC_PI_2 + 0.01, 0.0));
        assert_eq!(action, DialAction::default());

        let action = state.drag_end();
        assert!(!state.is_dragging());
        assert_eq!(action, DialAction::new(false, true));
        assert_eq!(state.value(), 23.0);
    }

    #[test]
    fn test_drag_start_off_ring_keeps_value() {
        let mut state = semicircle();
        let action = state.drag_start(CENTER);
        assert!(state.is_dragging());
        assert!(!action.value_changed);
        assert_eq!(state.value(), 22.0);
    }

    #[test]
    fn test_cancel_always_clears_dragging() {
        let mut state = semicircle();
        state.drag_cancel();
        assert!(!state.is_dragging());

        state.drag_start(on_ring(&state, 1.0, 0.0));
        let value = state.value();
        let action = state.drag_cancel();
        assert!(!state.is_dragging());
        assert!(action.should_redraw);
        assert_eq!(state.value(), value);
    }

    #[test]
    fn test_step_round_trip() {
        let mut state = semicircle();
        for value in grid(&state) {
            state.set_value(value);
            state.step(1.0);
            state.step(-1.0);
            if value == state.max() {
                assert_eq!(state.value(), value - 1.0);
            } else {
                assert_eq!(state.value(), value);
            }
        }
    }

    #[test]
    fn test_step_clamps_at_bounds() {
        let mut state = semicircle();
        state.set_value(30.0);
        let action = state.step(1.0);
        assert_eq!(state.value(), 30.0);
        assert!(!action.value_changed);

        state.set_value(16.0);
        state.step(-5.0);
        assert_eq!(state.value(), 16.0);
        assert_eq!(state.step(f64::NAN), DialAction::default());
    }

    #[test]
    fn test_step_keeps_handle_in_sync() {
        let mut state = semicircle();
        state.step(3.0);
        assert_eq!(state.value(), 25.0);
        let expected = (25.0 - 16.0) / 14.0 * PI;
        assert!((state.handle().angle - expected).abs() < 1e-12);
        assert!((state.last_angle() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_new_clamps_and_snaps_initial() {
        let config = DialConfig::new(16.0, 30.0);
        assert_eq!(DialState::new(config.clone(), 99.0).unwrap().value(), 30.0);
        assert_eq!(DialState::new(config.clone(), 21.4).unwrap().value(), 21.0);
        assert_eq!(
            DialState::new(config, f64::NAN).unwrap_err(),
            DialError::NonFinite("initial")
        );
    }

    #[test]
    fn test_value_to_position_geometry() {
        let state = semicircle();
        let start = state.value_to_position(16.0);
        assert!((start.point.x - 25.0).abs() < 1e-9);
        assert!((start.point.y - 110.0).abs() < 1e-9);

        let top = state.value_to_position(23.0);
        assert!((top.point.x - 110.0).abs() < 1e-9);
        assert!((top.point.y - 25.0).abs() < 1e-9);
        assert!((top.angle - FRAC_PI_2).abs() < 1e-12);

        // clamped
        assert_eq!(state.value_to_position(100.0), state.value_to_position(30.0));
    }

    #[test]
    fn test_relayout_moves_handle_and_keeps_value() {
        let mut state = semicircle();
        let action = state.relayout(Point::new(200.0, 180.0), 120.0);
        assert!(action.should_redraw);
        assert_eq!(state.value(), 22.0);

        let handle = state.handle();
        assert!((handle.point.distance_to(Point::new(200.0, 180.0)) - 120.0).abs() < 1e-9);

        assert_eq!(state.relayout(Point::new(0.0, 0.0), 0.0), DialAction::default());
        assert_eq!(state.radius(), 120.0);
    }

    #[test]
    fn test_progress() {
        let mut state = semicircle();
        state.set_value(16.0);
        assert_eq!(state.progress(), 0.0);
        state.set_value(23.0);
        assert_eq!(state.progress(), 0.5);
    }
}
