use std::any::Any;

use crate::agents::Agent;
use crate::config::WeedConfig;
use crate::state::{SimulationState, StateSnapshot};

/// Weed density after one month, clamped to `[0, max_density]`.
///
/// Tall crops shade the weeds out; above `shade_height` the growth term
/// turns negative and the final clamp bounds the result. `current.date` is
/// the month being simulated, before the clock advances. A negative
/// `max_density` yields 0.
pub fn next_density(config: &WeedConfig, current: &StateSnapshot) -> f32 {
    let weather = current.weather;
    let shading = 1.0 - current.height / config.shade_height;
    let growth = config.growth_rate
        * config.temperature.factor(weather.temperature)
        * config.precipitation.factor(weather.precipitation)
        * shading;
    let seasonal = if config.winter_months.contains(&current.date.month) {
        1.0 - config.winter_dieoff
    } else {
        1.0
    };
    ((current.weed_density + growth) * seasonal)
        .min(config.max_density)
        .max(0.0)
}

#[derive(Debug)]
pub struct WeedAgent {
    config: WeedConfig,
    next: Option<f32>,
}

impl WeedAgent {
    pub fn new(config: WeedConfig) -> Self {
        Self { config, next: None }
    }
}

impl Agent for WeedAgent {
    fn name(&self) -> &str {
        "weeds"
    }

    fn compute(&mut self, state: &SimulationState) {
        self.next = Some(next_density(&self.config, &state.snapshot()));
    }

    fn commit(&mut self, state: &SimulationState) {
        if let Some(next) = self.next.take() {
            state.set_weed_density(next);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::SimDate;
    use crate::rng::{RngExt, SimRng};
    use crate::weather::Weather;

    fn snapshot(
        month: u8,
        height: f32,
        temperature: f32,
        precipitation: f32,
        density: f32,
    ) -> StateSnapshot {
        StateSnapshot {
            date: SimDate::new(2026, month),
            weather: Weather {
                temperature,
                precipitation,
            },
            height,
            population: 0,
            weed_density: density,
        }
    }

    #[test]
    fn ideal_summer_without_shade_adds_full_rate() {
        let config = WeedConfig::default();
        let next = next_density(&config, &snapshot(6, 0.0, 70.0, 8.0, 0.2));
        assert!((next - 0.3).abs() < 1e-6);
    }

    #[test]
    fn winter_kills_most_weeds() {
        let config = WeedConfig::default();
        let next = next_density(&config, &snapshot(0, 0.0, 70.0, 8.0, 0.5));
        // (0.5 + 0.1) * 0.3
        assert!((next - 0.18).abs() < 1e-6);
        let december = next_density(&config, &snapshot(11, 0.0, 70.0, 8.0, 0.5));
        assert!((december - next).abs() < 1e-6);
    }

    #[test]
    fn tall_crop_shades_weeds_out() {
        let config = WeedConfig::default();
        let next = next_density(&config, &snapshot(6, 40.0, 70.0, 8.0, 0.05));
        // growth = 0.1 * (1 - 2) = -0.1
        assert_eq!(next, 0.0);
    }

    #[test]
    fn density_saturates_at_max() {
        let config = WeedConfig::default();
        assert_eq!(next_density(&config, &snapshot(6, 0.0, 70.0, 8.0, 0.99)), 1.0);
    }

    #[test]
    fn negative_ceiling_floors_at_zero() {
        let config = WeedConfig {
            max_density: -0.5,
            ..WeedConfig::default()
        };
        assert_eq!(next_density(&config, &snapshot(6, 0.0, 70.0, 8.0, 0.4)), 0.0);
    }

    #[test]
    fn density_stays_in_unit_interval() {
        let config = WeedConfig::default();
        let mut rng = SimRng::new(31);
        for _ in 0..10_000 {
            let current = snapshot(
                rng.random_f32(0.0, 11.99) as u8,
                rng.random_f32(0.0, 60.0),
                rng.random_f32(20.0, 100.0),
                rng.random_f32(0.0, 20.0),
                rng.random_f32(0.0, 1.0),
            );
            let next = next_density(&config, &current);
            assert!((0.0..=1.0).contains(&next), "density {next} from {current:?}");
        }
    }
}
