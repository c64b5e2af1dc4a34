pub mod view;

pub use view::draw;

pub const REFERENCE_RADIUS: f64 = 100.0; // sizes below are tuned for this ring radius
pub const TRACK_WIDTH: f64 = 12.0;
pub const ACTIVE_TRACK_WIDTH: f64 = 16.0;
pub const HANDLE_RADIUS: f64 = 10.0;
pub const ACTIVE_HANDLE_RADIUS: f64 = 12.0;
pub const HANDLE_CORE_RADIUS: f64 = 6.0;
pub const ACTIVE_HANDLE_CORE_RADIUS: f64 = 8.0;
pub const GLOW_OFFSET: f64 = 20.0; // glow ring distance outside the track
pub const GLOW_WIDTH: f64 = 15.0;
pub const VALUE_FONT_SIZE: f64 = 52.0;
pub const ACTIVE_VALUE_FONT_SIZE: f64 = 56.0;
pub const UNIT_FONT_SIZE: f64 = 18.0;
pub const POWERED_OFF_ALPHA: f64 = 0.45;
