use std::any::Any;
use std::cmp::Ordering;

use crate::agents::Agent;
use crate::state::SimulationState;

/// Moves the population one step towards the carrying capacity, which is
/// the crop height truncated to a whole number.
pub fn next_population(current: u32, height: f32) -> u32 {
    let capacity = height.max(0.0) as u64;
    match (current as u64).cmp(&capacity) {
        Ordering::Less => current.saturating_add(1),
        Ordering::Greater => current.saturating_sub(1),
        Ordering::Equal => current,
    }
}

#[derive(Debug, Default)]
pub struct PopulationAgent {
    next: Option<u32>,
}

impl PopulationAgent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Agent for PopulationAgent {
    fn name(&self) -> &str {
        "population"
    }

    fn compute(&mut self, state: &SimulationState) {
        self.next = Some(next_population(state.population(), state.height()));
    }

    fn commit(&mut self, state: &SimulationState) {
        if let Some(next) = self.next.take() {
            state.set_population(next);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
