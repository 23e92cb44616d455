//! Reusable rendezvous for a fixed team of threads.
//!
//! A round completes when the last of `participants` callers arrives. The
//! last arriver keeps the entry lock until every other participant has
//! registered its departure, so nobody can start counting the next round
//! while a slow participant is still observing the release of this one.
//!
//! There is no timeout: a participant that never calls [`SpinBarrier::wait`]
//! leaves the rest of the team waiting forever.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{SimError, SimResult};

/// How a blocked participant passes time while it waits.
///
/// `Spin` never gives up the core, which is the lowest-latency choice when
/// every participant has a core of its own. `Yield` offers the core back to
/// the scheduler on each poll so a team larger than the machine still makes
/// progress. The ordering contract is identical.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum WaitStrategy {
    Spin,
    #[default]
    Yield,
}

impl WaitStrategy {
    #[inline]
    fn pause(self) {
        match self {
            WaitStrategy::Spin => std::hint::spin_loop(),
            WaitStrategy::Yield => std::thread::yield_now(),
        }
    }
}

pub struct SpinBarrier {
    participants: usize,
    strategy: WaitStrategy,
    entry: Mutex<()>,
    arrived: AtomicUsize,
    departed: AtomicUsize,
    rounds: AtomicU64,
}

impl SpinBarrier {
    pub fn new(participants: usize) -> SimResult<Self> {
        Self::with_strategy(participants, WaitStrategy::default())
    }

    pub fn with_strategy(participants: usize, strategy: WaitStrategy) -> SimResult<Self> {
        if participants == 0 {
            return Err(SimError::EmptyTeam);
        }
        Ok(Self {
            participants,
            strategy,
            entry: Mutex::new(()),
            arrived: AtomicUsize::new(0),
            departed: AtomicUsize::new(0),
            rounds: AtomicU64::new(0),
        })
    }

    pub fn participants(&self) -> usize {
        self.participants
    }

    pub fn strategy(&self) -> WaitStrategy {
        self.strategy
    }

    /// Completed rounds so far.
    pub fn rounds(&self) -> u64 {
        self.rounds.load(Ordering::Acquire)
    }

    /// Block until all participants of the current round have arrived.
    ///
    /// Writes made by any participant before its call are visible to every
    /// participant after this returns.
    pub fn wait(&self) {
        // The guard protects no data, so a poisoned lock is still usable.
        let guard = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        let arrived = self.arrived.load(Ordering::Relaxed) + 1;

        if arrived == self.participants {
            self.departed.store(0, Ordering::Relaxed);
            let round = self.rounds.fetch_add(1, Ordering::AcqRel) + 1;
            self.arrived.store(0, Ordering::Release);

            let others = self.participants - 1;
            while self.departed.load(Ordering::Acquire) != others {
                self.strategy.pause();
            }
            trace!(round, participants = self.participants, "barrier released");
            drop(guard);
            return;
        }

        self.arrived.store(arrived, Ordering::Relaxed);
        drop(guard);

        while self.arrived.load(Ordering::Acquire) != 0 {
            self.strategy.pause();
        }
        self.departed.fetch_add(1, Ordering::AcqRel);
    }
}
