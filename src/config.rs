//! Startup configuration for the engine.
//!
//! Values only; there is no on-disk format. The binary fills this in from
//! defaults (and a couple of command-line switches); embedders construct it
//! directly.

use crate::error::ConfigError;

/// Engine settings, validated before the simulation is built.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Grid width in cells. Resizable at runtime through the controller.
    pub grid_width: u32,
    /// Grid height in cells.
    pub grid_height: u32,
    /// Initial window width in physical pixels.
    pub window_width: u32,
    /// Initial window height in physical pixels.
    pub window_height: u32,
    /// Simulation step rate while speed limiting is on. Must be positive.
    pub updates_per_second: f64,
    /// When false, the simulation steps on every tick of the event loop.
    pub limit_speed: bool,
    /// Present with vsync. Rendering concern only.
    pub vsync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: 960,
            grid_height: 540,
            window_width: 1280,
            window_height: 720,
            updates_per_second: 30.0,
            limit_speed: true,
            vsync: true,
        }
    }
}

impl Settings {
    /// Check every field, reporting the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::InvalidGridSize {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::InvalidWindowSize {
                width: self.window_width,
                height: self.window_height,
            });
        }
        if !(self.updates_per_second > 0.0) {
            return Err(ConfigError::InvalidUpdateRate(self.updates_per_second));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn zero_grid_dimension_is_rejected() {
        let mut settings = Settings::default();
        settings.grid_width = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidGridSize { .. })
        ));
    }

    #[test]
    fn non_positive_update_rate_is_rejected() {
        let mut settings = Settings::default();
        settings.updates_per_second = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidUpdateRate(_))
        ));

        settings.updates_per_second = f64::NAN;
        assert!(settings.validate().is_err());
    }
}
