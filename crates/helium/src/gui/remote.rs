use crate::config::{Config, ConfigError};
use arcdial::{DialAction, DialState, Layout};
use derive_more::{Deref, Display, From, Into};
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Deref, From, Into)]
#[display("{_0}°C")]
pub struct Celsius(f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, EnumIter)]
pub enum CoolingMode {
    #[default]
    Cool,
    Auto,
    Fan,
}

impl CoolingMode {
    pub fn next(self) -> Self {
        Self::iter()
            .cycle()
            .skip_while(|mode| *mode != self)
            .nth(1)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum Swing {
    #[default]
    Off,
    Horizontal,
    Vertical,
}

/// Local state of the remote panel. Nothing here talks to a device.
#[derive(Debug, Clone)]
pub struct RemoteState {
    pub dial: DialState,
    pub powered: bool,
    pub mode: CoolingMode,
    pub swing: Swing,
    pub smart_save: bool,
    size: Option<(f64, f64)>,
}

impl RemoteState {
    pub fn new(dial: DialState) -> Self {
        Self {
            dial,
            powered: false,
            mode: CoolingMode::default(),
            swing: Swing::default(),
            smart_save: true,
            size: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(config.dial.build_state(None)?))
    }

    pub fn temperature(&self) -> Celsius {
        Celsius::from(self.dial.value())
    }

    /// Returns whether the power state changed.
    pub fn set_power(&mut self, on: bool) -> bool {
        std::mem::replace(&mut self.powered, on) != on
    }

    /// Selecting the active swing direction again turns swing off.
    pub fn toggle_swing(&mut self, swing: Swing) {
        self.swing = if self.swing == swing {
            Swing::Off
        } else {
            swing
        };
    }

    pub fn set_smart_save(&mut self, enabled: bool) {
        self.smart_save = enabled;
    }

    /// Manual mode selection is only offered with smart-save off.
    pub fn advanced_controls_visible(&self) -> bool {
        !self.smart_save
    }

    pub fn cycle_mode(&mut self) -> CoolingMode {
        self.mode = self.mode.next();
        self.mode
    }

    pub fn increase(&mut self) -> DialAction {
        let step = self.dial.step_size();
        self.dial.step(step)
    }

    pub fn decrease(&mut self) -> DialAction {
        let step = self.dial.step_size();
        self.dial.step(-step)
    }

    /// Refits the ring into the drawing area's new size.
    pub fn resize(&mut self, width: f64, height: f64) -> DialAction {
        self.size = Some((width, height));
        self.fit()
    }

    /// Swaps in a dial built from new settings, keeping the current temperature where the new
    /// bounds allow it.
    pub fn apply_config(&mut self, config: &Config) -> Result<DialAction, ConfigError> {
        let previous = self.dial.value();
        self.dial = config.dial.build_state(Some(previous))?;
        let fitted = self.fit();
        Ok(DialAction::new(self.dial.value() != previous, true).merge(fitted))
    }

    fn fit(&mut self) -> DialAction {
        let Some((width, height)) = self.size else {
            return DialAction::default();
        };
        match Layout::fit(width, height, self.dial.sweep()) {
            Some(layout) => self.dial.relayout(layout.center, layout.radius),
            None => DialAction::default(),
        }
    }
}
