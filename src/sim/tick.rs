//! Per-frame simulation tick and mode transitions
//!
//! The pipeline runs in a fixed order and only while the mode is
//! [`Mode::Running`]:
//! - toggle handling, dash request
//! - clock: slow motion, elapsed time, score accrual, timer decay
//! - glitch director, player movement, spawning, aging
//! - collisions (orbs, power-ups, hazards), quest evaluation, HUD refresh

use glam::Vec2;

use super::autopilot;
use super::collision::{complete_quest, resolve_collisions};
use super::entities::age_entities;
use super::glitch::GlitchTransition;
use super::player::{move_player, resolve_intent};
use super::quest::QuestUpdate;
use super::spawn::run_spawners;
use super::state::{GameEvent, GameState, Mode, colors};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Digital direction, components in [-1, 1]
    pub keys: Vec2,
    /// Held pointer target in field coordinates
    pub pointer: Option<Vec2>,
    /// Device tilt; when present it overrides keys and pointer
    pub tilt: Option<Vec2>,
    /// Dash request (edge-triggered)
    pub dash: bool,
    /// Play/pause button (edge-triggered)
    pub toggle: bool,
    /// Demo mode: the autopilot replaces the movement inputs
    pub autopilot: bool,
}

/// Reset and enter Running. No-op unless idle or over.
pub fn start(state: &mut GameState) {
    if matches!(state.mode, Mode::Idle | Mode::Over) {
        restart(state);
    }
}

/// Reset and enter Running from any mode
pub fn restart(state: &mut GameState) {
    state.reset();
    state.mode = Mode::Running;
}

pub fn pause(state: &mut GameState) {
    if state.mode == Mode::Running {
        state.mode = Mode::Paused;
        state.push_event(GameEvent::Paused);
        log::info!("Paused at {:.1}s", state.elapsed);
    }
}

pub fn resume(state: &mut GameState) {
    if state.mode == Mode::Paused {
        state.mode = Mode::Running;
        state.push_event(GameEvent::Resumed);
        log::info!("Resumed");
    }
}

/// The single play/pause control
pub fn toggle(state: &mut GameState) {
    match state.mode {
        Mode::Running => pause(state),
        Mode::Paused => resume(state),
        Mode::Idle | Mode::Over => restart(state),
    }
}

/// Try to start a dash; returns whether it happened
pub fn trigger_dash(state: &mut GameState) -> bool {
    if state.mode != Mode::Running || !state.timers.dash_ready() {
        return false;
    }
    state.timers.start_dash();
    state.player.leave_ghost();
    let pos = state.player.pos;
    state.spawn_particles(pos, 10, colors::WHITE);
    state.push_event(GameEvent::DashStarted);
    true
}

/// Final hit landed: freeze the run and fold the score into best
pub fn end_run(state: &mut GameState) {
    state.mode = Mode::Over;
    let new_best = state.ledger.finalize();
    state.quests.clear();
    state.timers.size_down = 0.0;
    let score = state.ledger.display_score();
    let best = state.ledger.best;
    state.push_event(GameEvent::RunEnded {
        score,
        best,
        new_best,
    });
    state.refresh_hud();
    log::info!(
        "Run over: score {} (best {}{}), {:.1}s, stats {:?}",
        score,
        best,
        if new_best { ", new" } else { "" },
        state.elapsed,
        state.ledger.stats
    );
}

/// Advance the game by one frame of `real_dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, real_dt: f32) {
    if input.toggle {
        toggle(state);
    }

    // Nothing moves outside Running
    if state.mode != Mode::Running {
        return;
    }

    let dt = real_dt.clamp(0.0, MAX_FRAME_DT);

    let input = if input.autopilot {
        autopilot::steer(state, input)
    } else {
        input.clone()
    };

    if input.dash {
        trigger_dash(state);
    }

    // Clock
    let game_dt = state.timers.slow_motion.scale(dt);
    state.elapsed += game_dt;
    state.ledger.accrue(game_dt);
    let expired = state.timers.decay(game_dt);
    if expired.size_down {
        state.player.radius = state.default_radius();
    }

    advance_glitch(state, game_dt);

    let intent = resolve_intent(&input, state.player.pos);
    move_player(state, intent, game_dt);

    run_spawners(state, game_dt);
    age_entities(state, game_dt, dt);
    let regen_pending = state.quests.regen.is_some();
    resolve_collisions(state);

    // A fatal hit already froze the run
    if state.mode == Mode::Running {
        // A quest finished during collisions starts its delay next tick
        let just_completed = !regen_pending && state.quests.regen.is_some();
        let update = if just_completed {
            QuestUpdate::None
        } else {
            state.quests.advance(game_dt, &mut state.rng)
        };
        match update {
            QuestUpdate::Completed(quest) => complete_quest(state, quest.reward),
            QuestUpdate::Started(kind) => {
                log::debug!("New quest: {:?}", kind);
                state.push_event(GameEvent::QuestStarted(kind));
            }
            QuestUpdate::None => {}
        }
        state.refresh_hud();
    }
}

fn advance_glitch(state: &mut GameState, dt: f32) {
    match state.glitch.advance(dt, &mut state.rng) {
        GlitchTransition::Started(kind) => {
            state.camera.zoom = kind.zoom();
            state.push_event(GameEvent::GlitchStarted(kind));
            let center = state.field.center();
            state.spawn_popup(center, "⚠ ANOMALY DETECTED ⚠");
            log::info!("Glitch started: {}", kind.label());
        }
        GlitchTransition::Ended(kind) => {
            state.camera.zoom = 1.0;
            state.push_event(GameEvent::GlitchEnded);
            log::info!("Glitch ended: {}", kind.label());
        }
        GlitchTransition::None => {}
    }
}
