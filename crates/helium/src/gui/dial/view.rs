use super::{
    ACTIVE_HANDLE_CORE_RADIUS, ACTIVE_HANDLE_RADIUS, ACTIVE_TRACK_WIDTH, ACTIVE_VALUE_FONT_SIZE,
    GLOW_OFFSET, GLOW_WIDTH, HANDLE_CORE_RADIUS, HANDLE_RADIUS, POWERED_OFF_ALPHA,
    REFERENCE_RADIUS, TRACK_WIDTH, UNIT_FONT_SIZE, VALUE_FONT_SIZE,
};
use crate::gui::remote::RemoteState;
use crate::gui::theme::ThemeColors;
use arcdial::{DialState, HandlePosition, Point, Sweep};
use cairo::{Context, FontSlant, FontWeight, LineCap};
use palette::Srgba;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialVisual {
    Dragging,
    Off,
    Idle,
}

impl DialVisual {
    /// Determines how the dial is drawn, by priority:
    /// 1. Dragging (enlarged, glowing)
    /// 2. Off (unit powered down, dimmed)
    /// 3. Idle
    fn resolve(remote: &RemoteState) -> Self {
        if remote.dial.is_dragging() {
            Self::Dragging
        } else if !remote.powered {
            Self::Off
        } else {
            Self::Idle
        }
    }

    fn progress_color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Dragging => colors.progress_active,
            Self::Off => {
                let mut color = colors.progress;
                color.alpha *= POWERED_OFF_ALPHA;
                color
            }
            Self::Idle => colors.progress,
        }
    }

    fn track_width(&self) -> f64 {
        match self {
            Self::Dragging => ACTIVE_TRACK_WIDTH,
            _ => TRACK_WIDTH,
        }
    }

    /// Outer and core radius of the handle.
    fn handle_radii(&self) -> (f64, f64) {
        match self {
            Self::Dragging => (ACTIVE_HANDLE_RADIUS, ACTIVE_HANDLE_CORE_RADIUS),
            _ => (HANDLE_RADIUS, HANDLE_CORE_RADIUS),
        }
    }

    fn font_size(&self) -> f64 {
        match self {
            Self::Dragging => ACTIVE_VALUE_FONT_SIZE,
            _ => VALUE_FONT_SIZE,
        }
    }
}

struct DialRenderer<'a> {
    dial: &'a DialState,
    visual: DialVisual,
    colors: &'a ThemeColors,
    scale: f64,
}

impl<'a> DialRenderer<'a> {
    fn new(dial: &'a DialState, visual: DialVisual, colors: &'a ThemeColors) -> Self {
        Self {
            dial,
            visual,
            colors,
            scale: dial.radius() / REFERENCE_RADIUS,
        }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        let handle = self.dial.handle();
        if self.visual == DialVisual::Dragging {
            self.draw_glow(cr)?;
        }
        self.draw_track(cr)?;
        self.draw_progress(cr, &handle)?;
        self.draw_handle(cr, &handle)?;
        self.draw_readout(cr)
    }

    fn stroke_arc(
        &self,
        cr: &Context,
        radius: f64,
        (from, to): (f64, f64),
        width: f64,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        let center = self.dial.center();
        set_source(cr, color);
        cr.set_line_width(width * self.scale);
        cr.set_line_cap(LineCap::Round);
        cr.new_path();
        cr.arc(center.x, center.y, radius, from, to);
        cr.stroke()
    }

    fn draw_glow(&self, cr: &Context) -> Result<(), cairo::Error> {
        let radius = self.dial.radius() + GLOW_OFFSET * self.scale;
        self.stroke_arc(cr, radius, (0.0, TAU), GLOW_WIDTH, self.colors.glow)
    }

    fn draw_track(&self, cr: &Context) -> Result<(), cairo::Error> {
        let start = self.dial.config().start_angle;
        self.stroke_arc(
            cr,
            self.dial.radius(),
            (start, start + self.dial.sweep().span()),
            self.visual.track_width(),
            self.colors.track,
        )
    }

    fn draw_progress(&self, cr: &Context, handle: &HandlePosition) -> Result<(), cairo::Error> {
        if handle.angle <= 0.0 {
            return Ok(());
        }
        self.stroke_arc(
            cr,
            self.dial.radius(),
            (self.dial.config().start_angle, handle.screen_angle),
            self.visual.track_width(),
            self.visual.progress_color(self.colors),
        )
    }

    fn draw_handle(&self, cr: &Context, handle: &HandlePosition) -> Result<(), cairo::Error> {
        let (outer, core) = self.visual.handle_radii();
        fill_circle(
            cr,
            handle.point,
            outer * self.scale,
            self.visual.progress_color(self.colors),
        )?;
        fill_circle(cr, handle.point, core * self.scale, self.colors.handle_core)
    }

    fn draw_readout(&self, cr: &Context) -> Result<(), cairo::Error> {
        let center = self.dial.center();
        // semicircles read out under the arch, full circles in the middle
        let baseline = match self.dial.sweep() {
            Sweep::Semicircle => center.y - self.dial.radius() * 0.25,
            Sweep::FullCircle => center.y + VALUE_FONT_SIZE * self.scale * 0.2,
        };

        set_source(cr, self.colors.text);
        cr.select_font_face("Sans", FontSlant::Normal, FontWeight::Normal);
        cr.set_font_size(self.visual.font_size() * self.scale);
        show_centered(cr, &self.dial.value().to_string(), center.x, baseline)?;

        set_source(cr, self.colors.unit);
        cr.select_font_face("Sans", FontSlant::Normal, FontWeight::Bold);
        cr.set_font_size(UNIT_FONT_SIZE * self.scale);
        show_centered(
            cr,
            "°C",
            center.x,
            baseline + UNIT_FONT_SIZE * self.scale * 1.5,
        )
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn fill_circle(
    cr: &Context,
    center: Point,
    radius: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_source(cr, color);
    cr.new_path();
    cr.arc(center.x, center.y, radius, 0.0, TAU);
    cr.fill()
}

fn show_centered(cr: &Context, text: &str, x: f64, baseline: f64) -> Result<(), cairo::Error> {
    let ext = cr.text_extents(text)?;
    cr.move_to(x - ext.width() / 2.0 - ext.x_bearing(), baseline);
    cr.show_text(text)
}

pub fn draw(cr: &Context, remote: &RemoteState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    DialRenderer::new(&remote.dial, DialVisual::resolve(remote), colors).draw(cr)
}
