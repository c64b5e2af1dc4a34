use thiserror::Error;

/// Rejected dial configuration. Only raised while building a dial; input handling never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialError {
    #[error("Invalid bounds: max ({max}) must be greater than min ({min})")]
    InvalidBounds { min: f64, max: f64 },
    #[error("Step must be positive, got {0}")]
    InvalidStep(f64),
    #[error("Radius must be positive, got {0}")]
    InvalidRadius(f64),
    #[error("Tolerance must not be negative, got {0}")]
    InvalidTolerance(f64),
    #[error("Dial parameter '{0}' is not a finite number")]
    NonFinite(&'static str),
}
