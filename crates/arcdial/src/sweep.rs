use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Angular domain a dial maps its value range onto.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Sweep {
    /// Half ring from the left end over the top to the right end.
    #[default]
    #[strum(
        to_string = "semicircle",
        serialize = "semi",
        serialize = "half",
        serialize = "arc",
        serialize = "180"
    )]
    Semicircle,
    /// Closed ring starting and ending at the top.
    #[strum(
        to_string = "fullcircle",
        serialize = "full",
        serialize = "circle",
        serialize = "ring",
        serialize = "360"
    )]
    FullCircle,
}

impl Sweep {
    /// Angular length of the sweep in radians.
    pub fn span(&self) -> f64 {
        match self {
            Self::Semicircle => PI,
            Self::FullCircle => TAU,
        }
    }

    /// Whether the sweep's start and end meet.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::FullCircle)
    }

    /// Screen angle of the sweep start when none is configured.
    pub fn default_start_angle(&self) -> f64 {
        match self {
            Self::Semicircle => PI,
            Self::FullCircle => -FRAC_PI_2,
        }
    }

    /// Pulls a sweep-relative angle in `[0, TAU)` onto the arc. Angles in the gap past the end
    /// go to whichever endpoint is angularly closer.
    pub fn clamp_angle(&self, angle: f64) -> f64 {
        let span = self.span();
        if angle <= span {
            angle
        } else if angle - span < TAU - angle {
            span
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_deserialization() {
        let cases = vec![
            ("\"semicircle\"", Sweep::Semicircle),
            ("\"Semicircle\"", Sweep::Semicircle),
            ("\"half\"", Sweep::Semicircle),
            ("\"180\"", Sweep::Semicircle),
            ("\"full\"", Sweep::FullCircle),
            ("\"RING\"", Sweep::FullCircle),
            ("\"fullcircle\"", Sweep::FullCircle),
            ("\"360\"", Sweep::FullCircle),
        ];

        for (json, expected) in cases {
            let deserialized: Sweep = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_sweep_serializes_to_its_parseable_name() {
        for sweep in [Sweep::Semicircle, Sweep::FullCircle] {
            let json = serde_json::to_string(&sweep).unwrap();
            assert_eq!(json, format!("\"{}\"", sweep));
            let back: Sweep = serde_json::from_str(&json).unwrap();
            assert_eq!(back, sweep);
        }
    }

    #[test]
    fn test_unknown_sweep_is_rejected() {
        assert!(serde_json::from_str::<Sweep>("\"spiral\"").is_err());
    }

    #[test]
    fn test_clamp_angle_picks_nearest_endpoint() {
        let half = Sweep::Semicircle;
        assert_eq!(half.clamp_angle(PI / 3.0), PI / 3.0);
        assert_eq!(half.clamp_angle(PI + 0.2), PI);
        assert_eq!(half.clamp_angle(TAU - 0.2), 0.0);

        let full = Sweep::FullCircle;
        assert_eq!(full.clamp_angle(TAU - 0.2), TAU - 0.2);
    }
}
