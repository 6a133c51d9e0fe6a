//! Score ledger: score, multiplier, streak, lives and run statistics

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Per-run statistics shown on the game-over card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub near_misses: u32,
    pub damage_blocked: u32,
    pub orbs_collected: u32,
}

/// Outcome of collecting an orb
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbAward {
    pub points: f64,
    pub extra_life: bool,
}

/// Outcome of an unshielded hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// The player was on their final life before this hit
    pub last_chance: bool,
    /// A streak longer than 5 was lost
    pub combo_broken: bool,
    pub lives_left: u8,
}

impl DamageOutcome {
    pub fn is_fatal(&self) -> bool {
        self.lives_left == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreLedger {
    pub score: f64,
    pub multiplier: f32,
    pub streak: u32,
    pub lives: u8,
    /// Best floored score across runs; never decreases
    pub best: u64,
    pub stats: RunStats,
}

impl ScoreLedger {
    pub fn new(best: u64) -> Self {
        Self {
            score: 0.0,
            multiplier: MIN_MULTIPLIER,
            streak: 0,
            lives: STARTING_LIVES,
            best,
            stats: RunStats::default(),
        }
    }

    /// Start-of-run reset. Best survives.
    pub fn reset(&mut self, hardcore: bool) {
        *self = Self::new(self.best);
        self.lives = if hardcore { HARDCORE_LIVES } else { STARTING_LIVES };
    }

    /// Score shown on the HUD
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    /// Passive score for surviving `dt` simulated seconds
    pub fn accrue(&mut self, dt: f32) {
        self.score += dt as f64 * SCORE_PER_SECOND * self.multiplier as f64;
    }

    pub fn award(&mut self, points: f64) {
        self.score += points;
    }

    pub fn collect_orb(&mut self) -> OrbAward {
        self.multiplier = (self.multiplier + ORB_MULTIPLIER_STEP).min(MAX_MULTIPLIER);
        let points = ORB_SCORE * self.multiplier as f64;
        self.score += points;
        self.streak += 1;
        self.stats.orbs_collected += 1;

        let extra_life = self.streak % STREAK_LIFE_INTERVAL == 0 && self.lives < MAX_LIVES;
        if extra_life {
            self.lives += 1;
        }
        OrbAward { points, extra_life }
    }

    pub fn record_near_miss(&mut self) {
        self.stats.near_misses += 1;
    }

    /// Shield absorbed a hit
    pub fn shield_block(&mut self) {
        self.streak = 0;
        self.multiplier = (self.multiplier - SHIELD_MULTIPLIER_PENALTY).max(MIN_MULTIPLIER);
        self.stats.damage_blocked += 1;
    }

    /// Unprotected hit: lose a life, streak and multiplier
    pub fn take_damage(&mut self) -> DamageOutcome {
        let last_chance = self.lives == 1;
        self.lives = self.lives.saturating_sub(1);
        let combo_broken = self.streak > 5;
        self.streak = 0;
        self.multiplier = MIN_MULTIPLIER;
        DamageOutcome {
            last_chance,
            combo_broken,
            lives_left: self.lives,
        }
    }

    /// Fold the run's score into best; returns true on a new best
    pub fn finalize(&mut self) -> bool {
        let score = self.display_score();
        if score > self.best {
            self.best = score;
            return true;
        }
        false
    }
}
