//! Simulation engine
//!
//! All gameplay logic lives here:
//! - One `GameState` value owns everything a run mutates
//! - Seeded RNG only (`Pcg32`), so equal seeds and inputs replay equally
//! - Entities live in generational arenas with stable iteration order
//! - No rendering, input capture or storage dependencies

pub mod arena;
pub mod autopilot;
pub mod collision;
pub mod entities;
pub mod glitch;
pub mod ledger;
pub mod player;
pub mod quest;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use arena::{EntityArena, EntityId};
pub use glitch::{GlitchDirector, GlitchKind};
pub use ledger::{RunStats, ScoreLedger};
pub use quest::{Quest, QuestKind, QuestTracker};
pub use snapshot::{PaletteTier, Snapshot};
pub use state::{
    Camera, Field, GameEvent, GameState, Hazard, HazardKind, HudSnapshot, Mode, Orb, OrbKind,
    Particle, Player, PowerUp, PowerUpKind, TextPopup,
};
pub use tick::{TickInput, end_run, pause, restart, resume, start, tick, toggle, trigger_dash};
pub use timers::{SlowMotion, TimerSet};
