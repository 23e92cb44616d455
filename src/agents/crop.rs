use std::any::Any;

use crate::agents::Agent;
use crate::config::CropConfig;
use crate::state::{SimulationState, StateSnapshot};

/// Crop height after one month of growth and grazing, floored at zero.
pub fn next_height(config: &CropConfig, current: &StateSnapshot) -> f32 {
    let weather = current.weather;
    let growth = config.grows_per_month
        * config.temperature.factor(weather.temperature)
        * config.precipitation.factor(weather.precipitation)
        * (1.0 - config.weed_impact * current.weed_density);
    let grazing = current.population as f32 * config.eaten_per_capita;
    (current.height + growth - grazing).max(0.0)
}

#[derive(Debug)]
pub struct CropAgent {
    config: CropConfig,
    next: Option<f32>,
}

impl CropAgent {
    pub fn new(config: CropConfig) -> Self {
        Self { config, next: None }
    }
}

impl Agent for CropAgent {
    fn name(&self) -> &str {
        "crop"
    }

    fn compute(&mut self, state: &SimulationState) {
        self.next = Some(next_height(&self.config, &state.snapshot()));
    }

    fn commit(&mut self, state: &SimulationState) {
        if let Some(next) = self.next.take() {
            state.set_height(next);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
