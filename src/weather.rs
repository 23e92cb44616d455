//! Seasonal weather model.
//!
//! Temperature and precipitation follow the Earth's angle around the sun,
//! with bounded uniform noise on top.

use serde::{Deserialize, Serialize};

use crate::config::WeatherConfig;
use crate::rng::RngExt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temperature: f32,
    pub precipitation: f32,
}

#[derive(Debug, Clone)]
pub struct WeatherModel {
    config: WeatherConfig,
}

impl WeatherModel {
    pub fn new(config: WeatherConfig) -> Self {
        Self { config }
    }

    /// Mid-month orbital angle in radians: 15 degrees for January, then 30
    /// degrees per month.
    pub fn orbit_angle(month: u8) -> f32 {
        (30.0 * month as f32 + 15.0).to_radians()
    }

    /// Weather for `month` without noise.
    pub fn seasonal(&self, month: u8) -> Weather {
        let angle = Self::orbit_angle(month);
        Weather {
            temperature: self.config.avg_temp - self.config.amp_temp * angle.cos(),
            precipitation: (self.config.avg_precip + self.config.amp_precip * angle.sin())
                .max(0.0),
        }
    }

    /// Weather for `month` with noise drawn from `rng`. Temperature noise is
    /// drawn before precipitation noise.
    pub fn sample<R: RngExt>(&self, month: u8, rng: &mut R) -> Weather {
        let angle = Self::orbit_angle(month);
        let temperature = self.config.avg_temp - self.config.amp_temp * angle.cos()
            + rng.noise(self.config.temp_noise);
        let precipitation = self.config.avg_precip
            + self.config.amp_precip * angle.sin()
            + rng.noise(self.config.precip_noise);
        Weather {
            temperature,
            precipitation: precipitation.max(0.0),
        }
    }
}
