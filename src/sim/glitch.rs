//! Glitch director: randomly scheduled global modifiers
//!
//! Single slot. While nothing is active, simulated time accumulates until a
//! randomized threshold is crossed; then one glitch runs for a fixed duration.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// First glitch fires after this much simulated time
pub const INITIAL_GLITCH_DELAY: f32 = 15.0;
/// Later thresholds are drawn from this range
pub const GLITCH_DELAY_MIN: f32 = 20.0;
pub const GLITCH_DELAY_MAX: f32 = 30.0;
/// How long each glitch lasts
pub const GLITCH_DURATION: f32 = 8.0;

/// Horizontal wind push (units/second, rightward)
pub const WIND_SPEED: f32 = 150.0;
/// Camera zoom while the zoom glitch is active
pub const GLITCH_ZOOM: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlitchKind {
    /// Movement axes flipped
    Invert,
    /// Constant rightward push
    Wind,
    /// Camera zoomed in
    Zoom,
    /// Hazards spawn twice as often and move 1.5x faster
    Hyper,
    /// Palette cycling, cosmetic only
    Disco,
}

impl GlitchKind {
    pub const ALL: [GlitchKind; 5] = [
        GlitchKind::Invert,
        GlitchKind::Wind,
        GlitchKind::Zoom,
        GlitchKind::Hyper,
        GlitchKind::Disco,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GlitchKind::Invert => "CONTROLS FLIPPED",
            GlitchKind::Wind => "HIGH WINDS",
            GlitchKind::Zoom => "OPTICAL ZOOM",
            GlitchKind::Hyper => "HYPER SPEED",
            GlitchKind::Disco => "PARTY MODE",
        }
    }

    /// Multiplier on the hazard spawn interval
    pub fn spawn_interval_factor(&self) -> f32 {
        match self {
            GlitchKind::Hyper => 0.5,
            _ => 1.0,
        }
    }

    /// Multiplier on active hazard speed
    pub fn hazard_speed_factor(&self) -> f32 {
        match self {
            GlitchKind::Hyper => 1.5,
            _ => 1.0,
        }
    }

    /// Camera zoom requested while active
    pub fn zoom(&self) -> f32 {
        match self {
            GlitchKind::Zoom => GLITCH_ZOOM,
            _ => 1.0,
        }
    }
}

/// The glitch currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlitchEvent {
    pub kind: GlitchKind,
    pub remaining: f32,
}

/// Result of advancing the director one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlitchTransition {
    None,
    Started(GlitchKind),
    Ended(GlitchKind),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlitchDirector {
    pub active: Option<GlitchEvent>,
    /// Simulated time since the last glitch ended (or the run began)
    pub accumulator: f32,
    /// Accumulator value that triggers the next glitch
    pub threshold: f32,
}

impl Default for GlitchDirector {
    fn default() -> Self {
        Self {
            active: None,
            accumulator: 0.0,
            threshold: INITIAL_GLITCH_DELAY,
        }
    }
}

impl GlitchDirector {
    pub fn active_kind(&self) -> Option<GlitchKind> {
        self.active.map(|g| g.kind)
    }

    pub fn is(&self, kind: GlitchKind) -> bool {
        self.active_kind() == Some(kind)
    }

    /// Advance by simulated time, possibly starting or ending a glitch
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng) -> GlitchTransition {
        if let Some(glitch) = self.active.as_mut() {
            glitch.remaining = (glitch.remaining - dt).max(0.0);
            if glitch.remaining <= 0.0 {
                let kind = glitch.kind;
                self.active = None;
                return GlitchTransition::Ended(kind);
            }
            return GlitchTransition::None;
        }

        self.accumulator += dt;
        if self.accumulator > self.threshold {
            let kind = GlitchKind::ALL[rng.random_range(0..GlitchKind::ALL.len())];
            self.start(kind, rng);
            return GlitchTransition::Started(kind);
        }
        GlitchTransition::None
    }

    /// Force a specific glitch, resetting the schedule as a natural trigger would
    pub fn start(&mut self, kind: GlitchKind, rng: &mut impl Rng) {
        self.active = Some(GlitchEvent {
            kind,
            remaining: GLITCH_DURATION,
        });
        self.accumulator = 0.0;
        self.threshold = rng.random_range(GLITCH_DELAY_MIN..GLITCH_DELAY_MAX);
    }
}
