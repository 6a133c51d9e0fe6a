//! Countdown timers and slow-motion clock scaling

use crate::consts::*;

/// Slow-motion window that scales simulated time relative to real time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlowMotion {
    /// Remaining window (real seconds)
    pub remaining: f32,
    /// Current time scale applied to real dt
    pub factor: f32,
}

impl Default for SlowMotion {
    fn default() -> Self {
        Self {
            remaining: 0.0,
            factor: 1.0,
        }
    }
}

impl SlowMotion {
    /// (Re)start a window. Triggers overwrite the countdown, never extend it.
    pub fn trigger(&mut self, secs: f32) {
        self.remaining = secs;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Advance by real time and return the simulated delta for this tick
    pub fn scale(&mut self, real_dt: f32) -> f32 {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - real_dt).max(0.0);
            self.factor = SLOW_MOTION_FACTOR;
        } else {
            self.factor = (self.factor + real_dt * SLOW_MOTION_RECOVERY).min(1.0);
        }
        real_dt * self.factor
    }
}

/// What expired during a decay step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expired {
    pub size_down: bool,
}

/// All per-run countdowns. Every field decays toward zero and never below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimerSet {
    pub shield: f32,
    pub dash: f32,
    pub dash_cooldown: f32,
    pub magnet: f32,
    /// Remaining size-down window; the player radius reverts when it hits zero
    pub size_down: f32,
    pub slow_motion: SlowMotion,
}

impl TimerSet {
    pub fn dash_ready(&self) -> bool {
        self.dash_cooldown <= DASH_READY_EPSILON
    }

    pub fn dashing(&self) -> bool {
        self.dash > 0.0
    }

    pub fn shielded(&self) -> bool {
        self.shield > 0.0
    }

    pub fn magnet_active(&self) -> bool {
        self.magnet > 0.0
    }

    /// Start a dash. Caller checks [`Self::dash_ready`].
    pub fn start_dash(&mut self) {
        self.dash = DASH_DURATION;
        self.dash_cooldown = DASH_COOLDOWN;
    }

    /// Decay gameplay timers by simulated time
    pub fn decay(&mut self, dt: f32) -> Expired {
        let had_size_down = self.size_down > 0.0;

        self.shield = (self.shield - dt).max(0.0);
        self.dash = (self.dash - dt).max(0.0);
        self.dash_cooldown = (self.dash_cooldown - dt).max(0.0);
        self.magnet = (self.magnet - dt).max(0.0);
        self.size_down = (self.size_down - dt).max(0.0);

        Expired {
            size_down: had_size_down && self.size_down <= 0.0,
        }
    }
}
