pub mod agents;
pub mod barrier;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod rng;
pub mod state;
pub mod weather;

pub use barrier::{SpinBarrier, WaitStrategy};
pub use calendar::SimDate;
pub use config::SimConfig;
pub use engine::{Engine, EngineBuilder, RunSummary};
pub use error::{SimError, SimResult};
pub use history::{HistoryLog, MonthRecord, ReportFormat};
