//! Agents and the three-phase protocol they share.
//!
//! Every agent owns one field of [`SimulationState`] and runs the same loop:
//!
//! 1. compute a candidate for its field from the current state
//! 2. barrier
//! 3. commit the candidate
//! 4. barrier
//! 5. observe (only the environment agent does anything here)
//! 6. barrier
//!
//! The loop ends once the clock reaches the end boundary. The clock only
//! changes during observe, so all agents see the same date at the top of
//! the loop and stop on the same iteration.

mod crop;
mod environment;
mod population;
mod weeds;

use std::any::Any;

pub use crop::{next_height, CropAgent};
pub use environment::EnvironmentAgent;
pub use population::{next_population, PopulationAgent};
pub use weeds::{next_density, WeedAgent};

use crate::barrier::SpinBarrier;
use crate::calendar::SimDate;
use crate::state::SimulationState;

pub trait Agent: Send {
    fn name(&self) -> &str;

    /// Compute phase. Must not mutate `state`.
    fn compute(&mut self, state: &SimulationState);

    /// Commit phase. Writes the owned field only.
    fn commit(&mut self, state: &SimulationState);

    /// Observation phase.
    fn observe(&mut self, _state: &SimulationState) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Drive `agent` through the protocol until the clock reaches `end`.
/// Returns the number of months the agent took part in.
pub fn run_protocol(
    agent: &mut dyn Agent,
    barrier: &SpinBarrier,
    state: &SimulationState,
    end: SimDate,
) -> u64 {
    let mut iterations = 0;
    while state.date() < end {
        agent.compute(state);
        barrier.wait();

        agent.commit(state);
        barrier.wait();

        agent.observe(state);
        barrier.wait();

        iterations += 1;
    }
    iterations
}
