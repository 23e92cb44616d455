//! Scenario configuration.
//!
//! Every physical constant of the model lives here. A scenario can be loaded
//! from YAML; any omitted field falls back to the built-in defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::barrier::WaitStrategy;
use crate::calendar::{SimDate, MONTHS_PER_YEAR};
use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    pub start: SimDate,
    /// Exclusive end boundary: the run stops once the clock reaches it.
    pub end: SimDate,
    pub initial: InitialState,
    pub crop: CropConfig,
    pub weeds: WeedConfig,
    pub weather: WeatherConfig,
    pub barrier: BarrierConfig,
    pub logging: LoggingConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            start: SimDate::start_of(2025),
            end: SimDate::start_of(2031),
            initial: InitialState::default(),
            crop: CropConfig::default(),
            weeds: WeedConfig::default(),
            weather: WeatherConfig::default(),
            barrier: BarrierConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialState {
    pub population: u32,
    pub height: f32,
    pub weed_density: f32,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            population: 2,
            height: 5.0,
            weed_density: 0.1,
        }
    }
}

/// A Gaussian suitability curve centred on `optimum`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Suitability {
    pub optimum: f32,
    pub width: f32,
}

impl Suitability {
    pub const fn new(optimum: f32, width: f32) -> Self {
        Self { optimum, width }
    }

    /// `exp(-((x - optimum) / width)^2)`, in (0, 1].
    pub fn factor(&self, x: f32) -> f32 {
        let scaled = (x - self.optimum) / self.width;
        (-(scaled * scaled)).exp()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub grows_per_month: f32,
    pub eaten_per_capita: f32,
    /// Fraction of growth lost at full weed density.
    pub weed_impact: f32,
    pub temperature: Suitability,
    pub precipitation: Suitability,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            grows_per_month: 12.0,
            eaten_per_capita: 1.0,
            weed_impact: 0.5,
            temperature: Suitability::new(40.0, 10.0),
            precipitation: Suitability::new(10.0, 10.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeedConfig {
    pub growth_rate: f32,
    pub max_density: f32,
    /// Fraction of the weed field that dies during a winter month.
    pub winter_dieoff: f32,
    /// Crop height at which shading cancels weed growth.
    pub shade_height: f32,
    pub winter_months: Vec<u8>,
    pub temperature: Suitability,
    pub precipitation: Suitability,
}

impl Default for WeedConfig {
    fn default() -> Self {
        Self {
            growth_rate: 0.1,
            max_density: 1.0,
            winter_dieoff: 0.7,
            shade_height: 20.0,
            winter_months: vec![11, 0, 1],
            temperature: Suitability::new(70.0, 30.0),
            precipitation: Suitability::new(8.0, 10.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub avg_temp: f32,
    pub amp_temp: f32,
    pub temp_noise: f32,
    pub avg_precip: f32,
    pub amp_precip: f32,
    pub precip_noise: f32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            avg_temp: 60.0,
            amp_temp: 20.0,
            temp_noise: 10.0,
            avg_precip: 7.0,
            amp_precip: 6.0,
            precip_noise: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrierConfig {
    pub wait: WaitStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl SimConfig {
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(text: &str) -> SimResult<Self> {
        let config: SimConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> SimResult<()> {
        fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }

    pub fn to_yaml_string(&self) -> SimResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Number of monthly rows a run of this scenario produces.
    pub fn months(&self) -> u64 {
        self.start.months_until(self.end)
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.start.is_valid() {
            return Err(invalid(format!(
                "start month {} is outside 0..{MONTHS_PER_YEAR}",
                self.start.month
            )));
        }
        if !self.end.is_valid() {
            return Err(invalid(format!(
                "end month {} is outside 0..{MONTHS_PER_YEAR}",
                self.end.month
            )));
        }
        if self.end < self.start {
            return Err(invalid(format!(
                "end boundary {} precedes start {}",
                self.end, self.start
            )));
        }

        if self.initial.height.is_nan() || self.initial.height < 0.0 {
            return Err(invalid("initial crop height must be non-negative"));
        }
        if !(0.0..=self.weeds.max_density).contains(&self.initial.weed_density) {
            return Err(invalid(format!(
                "initial weed density {} is outside [0, {}]",
                self.initial.weed_density, self.weeds.max_density
            )));
        }

        check_fraction("crop.weed_impact", self.crop.weed_impact)?;
        check_fraction("weeds.max_density", self.weeds.max_density)?;
        check_fraction("weeds.winter_dieoff", self.weeds.winter_dieoff)?;
        check_width("crop.temperature", self.crop.temperature)?;
        check_width("crop.precipitation", self.crop.precipitation)?;
        check_width("weeds.temperature", self.weeds.temperature)?;
        check_width("weeds.precipitation", self.weeds.precipitation)?;

        if self.weeds.shade_height.is_nan() || self.weeds.shade_height <= 0.0 {
            return Err(invalid("weeds.shade_height must be positive"));
        }
        if let Some(month) = self
            .weeds
            .winter_months
            .iter()
            .find(|m| **m >= MONTHS_PER_YEAR)
        {
            return Err(invalid(format!("winter month {month} is outside 0..12")));
        }

        if [self.weather.temp_noise, self.weather.precip_noise]
            .iter()
            .any(|bound| bound.is_nan() || *bound < 0.0)
        {
            return Err(invalid("weather noise bounds must be non-negative"));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> SimError {
    SimError::Config(msg.into())
}

fn check_fraction(name: &str, value: f32) -> SimResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{name} = {value} is outside [0, 1]")))
    }
}

fn check_width(name: &str, curve: Suitability) -> SimResult<()> {
    if curve.width > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name}.width must be positive")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_six_years() {
        let config = SimConfig::default();
        config.validate().unwrap();
        assert_eq!(config.start, SimDate::new(2025, 0));
        assert_eq!(config.end, SimDate::new(2031, 0));
        assert_eq!(config.months(), 72);
    }

    #[test]
    fn suitability_peaks_at_optimum() {
        let curve = Suitability::new(40.0, 10.0);
        assert_eq!(curve.factor(40.0), 1.0);
        assert!((curve.factor(50.0) - (-1.0f32).exp()).abs() < 1e-6);
        assert!(curve.factor(30.0) < 1.0);
        assert!(curve.factor(1000.0) >= 0.0);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = SimConfig::from_yaml_str(
            "seed: 42\nend:\n  year: 2026\n  month: 0\ninitial:\n  population: 7\n",
        )
        .unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.initial.population, 7);
        assert_eq!(config.initial.height, 5.0);
        assert_eq!(config.crop, CropConfig::default());
        assert_eq!(config.months(), 12);
    }

    #[test]
    fn yaml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.yaml");
        let mut config = SimConfig::default();
        config.seed = 9;
        config.barrier.wait = WaitStrategy::Spin;
        config.to_yaml(&path).unwrap();

        let loaded = SimConfig::from_yaml(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn rejects_end_before_start() {
        let mut config = SimConfig::default();
        config.end = SimDate::new(2024, 5);
        assert!(matches!(config.validate(), Err(SimError::Config(_))));
    }

    #[test]
    fn rejects_out_of_range_month() {
        let mut config = SimConfig::default();
        config.start.month = 12;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.weeds.winter_months.push(14);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_fractions_and_widths() {
        let mut config = SimConfig::default();
        config.weeds.winter_dieoff = 1.5;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.crop.temperature.width = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.initial.weed_density = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_nan_magnitudes() {
        let mut config = SimConfig::default();
        config.initial.height = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.weather.temp_noise = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.weather.precip_noise = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.weeds.shade_height = f32::NAN;
        assert!(config.validate().is_err());
    }
}
