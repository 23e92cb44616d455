//! The shared simulation record.
//!
//! Every agent reads and writes this one record. There are no per-field
//! locks: each field has exactly one writer, writes only happen in the
//! commit and observe phases, and the barrier between phases orders every
//! write before every subsequent read. Fields are atomics so the record can
//! be shared across threads; relaxed accesses suffice because the barrier
//! supplies the acquire/release edges.

use std::sync::atomic::{AtomicI32, AtomicU32, AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::calendar::SimDate;
use crate::config::InitialState;
use crate::weather::Weather;

#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// A consistent copy of the whole record, taken between barriers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub date: SimDate,
    pub weather: Weather,
    pub height: f32,
    pub population: u32,
    pub weed_density: f32,
}

/// Field ownership:
///
/// | field                  | writer            |
/// |------------------------|-------------------|
/// | date, weather          | environment agent |
/// | height                 | crop agent        |
/// | population             | population agent  |
/// | weed_density           | weed agent        |
#[derive(Debug)]
pub struct SimulationState {
    year: AtomicI32,
    month: AtomicU8,
    temperature: AtomicF32,
    precipitation: AtomicF32,
    height: AtomicF32,
    population: AtomicU32,
    weed_density: AtomicF32,
}

impl SimulationState {
    pub fn new(date: SimDate, weather: Weather, initial: &InitialState) -> Self {
        Self {
            year: AtomicI32::new(date.year),
            month: AtomicU8::new(date.month),
            temperature: AtomicF32::new(weather.temperature),
            precipitation: AtomicF32::new(weather.precipitation),
            height: AtomicF32::new(initial.height),
            population: AtomicU32::new(initial.population),
            weed_density: AtomicF32::new(initial.weed_density),
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            date: self.date(),
            weather: self.weather(),
            height: self.height(),
            population: self.population(),
            weed_density: self.weed_density(),
        }
    }

    pub fn date(&self) -> SimDate {
        SimDate {
            year: self.year.load(Ordering::Relaxed),
            month: self.month.load(Ordering::Relaxed),
        }
    }

    pub fn weather(&self) -> Weather {
        Weather {
            temperature: self.temperature.load(),
            precipitation: self.precipitation.load(),
        }
    }

    pub fn height(&self) -> f32 {
        self.height.load()
    }

    pub fn population(&self) -> u32 {
        self.population.load(Ordering::Relaxed)
    }

    pub fn weed_density(&self) -> f32 {
        self.weed_density.load()
    }

    pub fn set_date(&self, date: SimDate) {
        self.year.store(date.year, Ordering::Relaxed);
        self.month.store(date.month, Ordering::Relaxed);
    }

    pub fn set_weather(&self, weather: Weather) {
        self.temperature.store(weather.temperature);
        self.precipitation.store(weather.precipitation);
    }

    pub fn set_height(&self, height: f32) {
        self.height.store(height);
    }

    pub fn set_population(&self, population: u32) {
        self.population.store(population, Ordering::Relaxed);
    }

    pub fn set_weed_density(&self, density: f32) {
        self.weed_density.store(density);
    }
}
