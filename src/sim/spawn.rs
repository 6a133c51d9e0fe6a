//! Entity spawning: orbs, hazards and power-ups on their own cadences

use glam::Vec2;
use rand::Rng;

use super::glitch::GlitchKind;
use super::state::{
    GameState, HAZARD_TELEGRAPH, Hazard, HazardKind, ORB_LIFETIME, Orb, OrbKind, POWERUP_RADIUS,
    PowerUp, PowerUpKind,
};

pub const ORB_SPAWN_INTERVAL: f32 = 0.9;
pub const MAX_ORBS: usize = 6;
pub const ORB_PADDING: f32 = 26.0;

pub const HAZARD_INTERVAL_START: f32 = 1.05;
pub const HAZARD_INTERVAL_FLOOR: f32 = 0.35;
/// Interval shrink per elapsed second
pub const HAZARD_INTERVAL_DECAY: f32 = 0.015;
pub const HAZARD_BASE_SPEED: f32 = 120.0;
pub const HAZARD_SPEED_SPREAD: f32 = 180.0;
/// Extra speed per elapsed second
pub const HAZARD_SPEED_RAMP: f32 = 3.0;
pub const ELITE_CHANCE: f64 = 0.2;
/// Hazards enter from just outside the field
pub const HAZARD_ENTRY_OFFSET: f32 = 20.0;

pub const POWERUP_PADDING: f32 = 30.0;
pub const POWERUP_INTERVAL_MIN: f32 = 15.0;
pub const POWERUP_INTERVAL_MAX: f32 = 30.0;

/// Current hazard spawn interval
pub fn hazard_interval(elapsed: f32, glitch: Option<GlitchKind>) -> f32 {
    let base = (HAZARD_INTERVAL_START - elapsed * HAZARD_INTERVAL_DECAY).max(HAZARD_INTERVAL_FLOOR);
    base * glitch.map_or(1.0, |g| g.spawn_interval_factor())
}

/// Advance spawn timers and create whatever is due
pub fn run_spawners(state: &mut GameState, dt: f32) {
    state.spawn.orb += dt;
    if state.spawn.orb > ORB_SPAWN_INTERVAL {
        state.spawn.orb = 0.0;
        if state.orbs.len() < MAX_ORBS {
            spawn_orb(state, OrbKind::Normal);
        }
    }

    state.spawn.hazard += dt;
    let interval = hazard_interval(state.elapsed, state.glitch.active_kind());
    if state.spawn.hazard > interval {
        state.spawn.hazard = 0.0;
        spawn_hazard(state);
    }

    state.spawn.powerup += dt;
    if state.spawn.powerup > state.spawn.next_powerup {
        state.spawn.powerup = 0.0;
        state.spawn.next_powerup = state
            .rng
            .random_range(POWERUP_INTERVAL_MIN..POWERUP_INTERVAL_MAX);
        let kind = if state.rng.random_bool(0.5) {
            PowerUpKind::Shield
        } else {
            PowerUpKind::SPECIALS[state.rng.random_range(0..PowerUpKind::SPECIALS.len())]
        };
        spawn_powerup(state, kind);
    }
}

pub fn spawn_orb(state: &mut GameState, kind: OrbKind) {
    let pos = state.field.random_point(ORB_PADDING, &mut state.rng);
    let orb = Orb {
        pos,
        radius: 10.0 + state.rng.random::<f32>() * 8.0,
        pulse: state.rng.random::<f32>() * std::f32::consts::TAU,
        kind,
        life: ORB_LIFETIME,
    };
    state.orbs.insert(orb);
}

/// Spawn a hazard at an edge. Pacifist runs never get one.
pub fn spawn_hazard(state: &mut GameState) {
    if state.run_modifiers.pacifist {
        return;
    }

    let rng = &mut state.rng;
    let base = if state.run_modifiers.double_speed {
        HAZARD_BASE_SPEED * 2.0
    } else {
        HAZARD_BASE_SPEED
    };
    let speed = base + rng.random::<f32>() * HAZARD_SPEED_SPREAD + state.elapsed * HAZARD_SPEED_RAMP;

    let edge = rng.random::<f32>();
    let field = state.field;
    let pos = if edge > 0.7 {
        // Side entry
        let x = if edge > 0.85 {
            -HAZARD_ENTRY_OFFSET
        } else {
            field.width + HAZARD_ENTRY_OFFSET
        };
        Vec2::new(x, rng.random::<f32>() * field.height)
    } else {
        Vec2::new(rng.random::<f32>() * field.width, -HAZARD_ENTRY_OFFSET)
    };

    let kind = if rng.random_bool(ELITE_CHANCE) {
        if rng.random_bool(0.5) {
            HazardKind::Homing
        } else {
            HazardKind::Zigzag
        }
    } else {
        HazardKind::Normal
    };

    let hazard = Hazard {
        pos,
        size: 12.0 + rng.random::<f32>() * 10.0,
        speed,
        spin: rng.random::<f32>() * std::f32::consts::TAU,
        drift: (rng.random::<f32>() - 0.5) * 90.0,
        kind,
        telegraph: HAZARD_TELEGRAPH,
    };
    log::debug!("Hazard spawned: {:?} at {:?}", hazard.kind, hazard.pos);
    state.hazards.insert(hazard);
}

pub fn spawn_powerup(state: &mut GameState, kind: PowerUpKind) {
    let pos = state.field.random_point(POWERUP_PADDING, &mut state.rng);
    let powerup = PowerUp {
        pos,
        radius: POWERUP_RADIUS,
        pulse: state.rng.random::<f32>() * std::f32::consts::TAU,
        kind,
    };
    log::debug!("Power-up spawned: {:?}", kind);
    state.powerups.insert(powerup);
}
