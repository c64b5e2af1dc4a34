//! Maps pointer positions on a circular or semicircular ring to a bounded value and back.
//!
//! [`DialState`] owns one dial: feed it drag events and read back the value and the handle
//! position to draw. Input off the ring or with undefined geometry is ignored, never an error.

pub mod config;
pub mod dial;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod sweep;

pub use config::DialConfig;
pub use dial::{DialAction, DialState, HandlePosition, Resolution};
pub use error::DialError;
pub use geometry::Point;
pub use layout::Layout;
pub use sweep::Sweep;
