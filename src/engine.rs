use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::agents::{run_protocol, Agent, CropAgent, EnvironmentAgent, PopulationAgent, WeedAgent};
use crate::barrier::SpinBarrier;
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::history::HistoryLog;
use crate::rng::SimRng;
use crate::state::SimulationState;

pub struct EngineBuilder {
    config: SimConfig,
    agents: Vec<Box<dyn Agent>>,
}

impl EngineBuilder {
    /// A builder with no agents registered.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            agents: Vec::new(),
        }
    }

    /// A builder with the population, crop, weed and environment agents.
    pub fn standard(config: SimConfig) -> Self {
        let rng = SimRng::new(config.seed);
        let population = PopulationAgent::new();
        let crop = CropAgent::new(config.crop.clone());
        let weeds = WeedAgent::new(config.weeds.clone());
        let environment = EnvironmentAgent::new(config.weather.clone(), rng);
        Self::new(config)
            .with_agent(population)
            .with_agent(crop)
            .with_agent(environment)
            .with_agent(weeds)
    }

    pub fn with_agent(mut self, agent: impl Agent + 'static) -> Self {
        self.agents.push(Box::new(agent));
        self
    }

    /// Validate the configuration and seed the opening month's weather from
    /// the environment agent's generator.
    pub fn build(mut self) -> SimResult<Engine> {
        self.config.validate()?;
        if self.agents.is_empty() {
            return Err(SimError::EmptyTeam);
        }

        let environments = self
            .agents
            .iter()
            .filter(|agent| agent.as_any().is::<EnvironmentAgent>())
            .count();
        let environment = match environments {
            1 => self
                .agents
                .iter_mut()
                .find_map(|agent| agent.as_any_mut().downcast_mut::<EnvironmentAgent>()),
            _ => None,
        }
        .ok_or(SimError::MissingEnvironment(environments))?;

        let weather = environment.draw_weather(self.config.start.month);
        let state = SimulationState::new(self.config.start, weather, &self.config.initial);

        Ok(Engine {
            config: self.config,
            state,
            agents: self.agents,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub history: HistoryLog,
    pub months: u64,
    pub barrier_rounds: u64,
    pub elapsed: Duration,
}

pub struct Engine {
    config: SimConfig,
    state: SimulationState,
    agents: Vec<Box<dyn Agent>>,
}

impl Engine {
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.iter().map(|agent| agent.name()).collect()
    }

    /// Run every agent on its own thread until the clock reaches the end
    /// boundary, then hand back the environment agent's history.
    ///
    /// Blocks forever if an agent stops taking part in the protocol.
    pub fn run(self) -> SimResult<RunSummary> {
        let Engine {
            config,
            state,
            agents,
        } = self;
        let barrier = SpinBarrier::with_strategy(agents.len(), config.barrier.wait)?;
        let end = config.end;

        info!(
            start = %config.start,
            end = %end,
            seed = config.seed,
            agents = barrier.participants(),
            wait = ?barrier.strategy(),
            "starting simulation"
        );
        let started = Instant::now();

        let mut agents = thread::scope(|scope| -> SimResult<Vec<Box<dyn Agent>>> {
            let barrier = &barrier;
            let state = &state;
            let mut handles = Vec::with_capacity(agents.len());
            for mut agent in agents {
                let name = format!("agent-{}", agent.name());
                let handle = thread::Builder::new()
                    .name(name.clone())
                    .spawn_scoped(scope, move || {
                        let months = run_protocol(agent.as_mut(), barrier, state, end);
                        debug!(agent = agent.name(), months, "agent finished");
                        agent
                    })
                    .map_err(|source| SimError::Spawn {
                        name: name.clone(),
                        source,
                    })?;
                handles.push((name, handle));
            }

            handles
                .into_iter()
                .map(|(name, handle)| handle.join().map_err(|_| SimError::AgentPanicked(name)))
                .collect()
        })?;

        let history = agents
            .iter_mut()
            .find_map(|agent| agent.as_any_mut().downcast_mut::<EnvironmentAgent>())
            .map(EnvironmentAgent::take_history)
            .ok_or(SimError::MissingEnvironment(0))?;

        let summary = RunSummary {
            months: history.len() as u64,
            history,
            barrier_rounds: barrier.rounds(),
            elapsed: started.elapsed(),
        };
        info!(
            months = summary.months,
            barrier_rounds = summary.barrier_rounds,
            elapsed_ms = summary.elapsed.as_secs_f64() * 1_000.0,
            final_date = %state.date(),
            "simulation finished"
        );
        Ok(summary)
    }
}
