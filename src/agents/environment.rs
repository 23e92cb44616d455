use std::any::Any;

use tracing::debug;

use crate::agents::Agent;
use crate::config::WeatherConfig;
use crate::history::{HistoryLog, MonthRecord};
use crate::rng::SimRng;
use crate::state::SimulationState;
use crate::weather::{Weather, WeatherModel};

/// Owns the clock, the weather and the run's history.
///
/// It has nothing to compute or commit. During observation it records the
/// month that just completed, advances the clock and draws the weather for
/// the new month.
pub struct EnvironmentAgent {
    model: WeatherModel,
    rng: SimRng,
    history: HistoryLog,
}

impl EnvironmentAgent {
    pub fn new(config: WeatherConfig, rng: SimRng) -> Self {
        Self {
            model: WeatherModel::new(config),
            rng,
            history: HistoryLog::default(),
        }
    }

    /// Draw the weather for `month` from the run's generator.
    pub fn draw_weather(&mut self, month: u8) -> Weather {
        self.model.sample(month, &mut self.rng)
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn take_history(&mut self) -> HistoryLog {
        std::mem::take(&mut self.history)
    }
}

impl Agent for EnvironmentAgent {
    fn name(&self) -> &str {
        "environment"
    }

    fn compute(&mut self, _state: &SimulationState) {}

    fn commit(&mut self, _state: &SimulationState) {}

    fn observe(&mut self, state: &SimulationState) {
        let completed = state.snapshot();
        self.history.push(MonthRecord::from(completed));

        let date = completed.date.next();
        let weather = self.draw_weather(date.month);
        state.set_date(date);
        state.set_weather(weather);

        debug!(
            completed = %completed.date,
            height = completed.height,
            population = completed.population,
            weed_density = completed.weed_density,
            "month recorded"
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
