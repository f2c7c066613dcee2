//! Simulation context: every piece of mutable run state, owned by the engine
//! and lent to each system in turn.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use wavestrike_core::events::GameEvent;
use wavestrike_core::tuning::Tuning;
use wavestrike_core::types::{Millis, SimTime};

use crate::scheduler::Scheduler;
use crate::session::{PlayerState, WaveState};
use crate::store::EntityStore;

pub struct SimContext {
    pub store: EntityStore,
    pub player: PlayerState,
    pub wave: WaveState,
    pub scheduler: Scheduler,
    pub rng: ChaCha8Rng,
    pub tuning: Tuning,
    pub time: SimTime,
    /// Events raised this tick, drained into the snapshot.
    pub events: Vec<GameEvent>,
    /// Set once lives reach zero; freezes the simulation.
    pub run_over: bool,
}

impl SimContext {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            store: EntityStore::new(),
            player: PlayerState::new(&tuning),
            wave: WaveState::new(&tuning),
            scheduler: Scheduler::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            tuning,
            time: SimTime::default(),
            events: Vec::new(),
            run_over: false,
        }
    }

    /// Current simulation clock.
    pub fn now(&self) -> Millis {
        self.time.now_ms
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
