use crate::geometry::Point;
use crate::sweep::Sweep;

/// Room left around the ring for the track stroke and the enlarged drag handle.
pub const RING_MARGIN: f64 = 24.0;

/// Ring geometry fitted into a measured widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub center: Point,
    pub radius: f64,
}

impl Layout {
    /// Largest ring of the given sweep that fits `width` x `height`. Semicircles are the upper
    /// half of the ring, so the center sits near the bottom of the box they occupy.
    pub fn fit(width: f64, height: f64, sweep: Sweep) -> Option<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return None;
        }

        let layout = match sweep {
            Sweep::FullCircle => {
                let radius = width.min(height) / 2.0 - RING_MARGIN;
                Self {
                    center: Point::new(width / 2.0, height / 2.0),
                    radius,
                }
            }
            Sweep::Semicircle => {
                let radius = (width / 2.0 - RING_MARGIN).min(height - 2.0 * RING_MARGIN);
                // box of the drawn half ring: radius tall plus a margin on either side
                let top = (height - (radius + 2.0 * RING_MARGIN)) / 2.0;
                Self {
                    center: Point::new(width / 2.0, top + RING_MARGIN + radius),
                    radius,
                }
            }
        };

        (layout.radius > 0.0).then_some(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_circle_is_centered() {
        let layout = Layout::fit(300.0, 200.0, Sweep::FullCircle).unwrap();
        assert_eq!(layout.center, Point::new(150.0, 100.0));
        assert_eq!(layout.radius, 100.0 - RING_MARGIN);
    }

    #[test]
    fn test_semicircle_fits_inside_box() {
        for (w, h) in [(300.0, 200.0), (220.0, 400.0), (600.0, 150.0)] {
            let layout = Layout::fit(w, h, Sweep::Semicircle).unwrap();
            let Layout { center, radius } = layout;
            assert!(center.x - radius >= RING_MARGIN - 1e-9);
            assert!(center.x + radius <= w - RING_MARGIN + 1e-9);
            assert!(center.y - radius >= RING_MARGIN - 1e-9);
            assert!(center.y + RING_MARGIN <= h + 1e-9);
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(Layout::fit(0.0, 100.0, Sweep::FullCircle), None);
        assert_eq!(Layout::fit(30.0, 30.0, Sweep::FullCircle), None);
        assert_eq!(Layout::fit(f64::NAN, 100.0, Sweep::Semicircle), None);
        assert_eq!(Layout::fit(400.0, 40.0, Sweep::Semicircle), None);
    }
}
