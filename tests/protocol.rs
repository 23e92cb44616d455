use std::any::Any;
use std::sync::{Arc, Mutex};

use agristep::agents::{run_protocol, Agent, EnvironmentAgent};
use agristep::config::InitialState;
use agristep::rng::SimRng;
use agristep::state::{SimulationState, StateSnapshot};
use agristep::weather::Weather;
use agristep::{EngineBuilder, SimConfig, SimDate, SpinBarrier};

/// Records what it sees at the start of every compute phase and owns no
/// field itself.
struct Recorder {
    seen: Arc<Mutex<Vec<StateSnapshot>>>,
}

impl Agent for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn compute(&mut self, state: &SimulationState) {
        self.seen.lock().unwrap().push(state.snapshot());
    }

    fn commit(&mut self, _state: &SimulationState) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn short_config() -> SimConfig {
    SimConfig {
        seed: 21,
        end: SimDate::new(2027, 0),
        ..SimConfig::default()
    }
}

#[test]
fn extra_agent_grows_the_team() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let summary = EngineBuilder::standard(short_config())
        .with_agent(Recorder {
            seen: Arc::clone(&seen),
        })
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.months, 24);
    assert_eq!(summary.barrier_rounds, 72);
    assert_eq!(seen.lock().unwrap().len(), 24);
}

#[test]
fn compute_phase_sees_previous_commit() {
    let config = short_config();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let summary = EngineBuilder::standard(config.clone())
        .with_agent(Recorder {
            seen: Arc::clone(&seen),
        })
        .build()
        .unwrap()
        .run()
        .unwrap();

    let seen = seen.lock().unwrap();
    let records = summary.history.records();

    assert_eq!(seen[0].height, config.initial.height);
    assert_eq!(seen[0].population, config.initial.population);
    assert_eq!(seen[0].weed_density, config.initial.weed_density);

    for (month, snapshot) in seen.iter().enumerate() {
        let record = records[month];
        assert_eq!(snapshot.date, record.date());
        assert_eq!(snapshot.weather.temperature, record.temperature);
        assert_eq!(snapshot.weather.precipitation, record.precipitation);
        if month > 0 {
            let previous = records[month - 1];
            assert_eq!(snapshot.height, previous.height);
            assert_eq!(snapshot.population, previous.population);
            assert_eq!(snapshot.weed_density, previous.weed_density);
        }
    }
}

#[test]
fn lone_environment_agent_runs_without_partners() {
    let state = SimulationState::new(
        SimDate::new(2025, 10),
        Weather {
            temperature: 45.0,
            precipitation: 4.0,
        },
        &InitialState::default(),
    );
    let barrier = SpinBarrier::new(1).unwrap();
    let mut agent = EnvironmentAgent::new(SimConfig::default().weather, SimRng::new(8));

    let months = run_protocol(&mut agent, &barrier, &state, SimDate::new(2026, 2));

    assert_eq!(months, 4);
    assert_eq!(barrier.rounds(), 12);
    assert_eq!(state.date(), SimDate::new(2026, 2));
    // Nobody else owns these fields, so they never move.
    assert_eq!(state.height(), 5.0);
    assert_eq!(state.population(), 2);
    assert_eq!(agent.history().len(), 4);
}

#[test]
fn protocol_stops_immediately_past_the_end() {
    let state = SimulationState::new(
        SimDate::new(2031, 0),
        Weather {
            temperature: 45.0,
            precipitation: 4.0,
        },
        &InitialState::default(),
    );
    let barrier = SpinBarrier::new(1).unwrap();
    let mut agent = EnvironmentAgent::new(SimConfig::default().weather, SimRng::new(8));
    assert_eq!(
        run_protocol(&mut agent, &barrier, &state, SimDate::new(2031, 0)),
        0
    );
    assert_eq!(barrier.rounds(), 0);
}
