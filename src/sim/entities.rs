//! Entity aging and movement, plus pruning of expired entities

use super::state::{GameState, HazardMotion, POPUP_RISE_SPEED};
use crate::consts::SHAKE_DECAY;

/// Move and age every entity collection by one tick.
///
/// `dt` is simulated time; `real_dt` drives purely cosmetic decay
/// (camera shake, ghost fade) that should not stretch under slow motion.
pub fn age_entities(state: &mut GameState, dt: f32, real_dt: f32) {
    let motion = HazardMotion {
        player: state.player.pos,
        elapsed: state.elapsed,
        speed_factor: state
            .glitch
            .active_kind()
            .map_or(1.0, |g| g.hazard_speed_factor()),
    };
    let field = state.field;
    for hazard in state.hazards.iter_mut() {
        hazard.advance(dt, &motion);
    }
    state.hazards.retain(|h| h.in_bounds(&field));

    let magnet_target = state.timers.magnet_active().then_some(state.player.pos);
    for orb in state.orbs.iter_mut() {
        orb.advance(dt, magnet_target);
    }
    state.orbs.retain(|o| o.life > 0.0);

    for powerup in state.powerups.iter_mut() {
        powerup.pulse += dt * 2.0;
    }

    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.life -= dt;
    }
    state.particles.retain(|p| p.life > 0.0);

    for popup in state.popups.iter_mut() {
        popup.pos.y -= POPUP_RISE_SPEED * dt;
        popup.life -= dt;
    }
    state.popups.retain(|t| t.life > 0.0);

    state.player.fade_ghosts(real_dt);

    if state.camera.shake > 0.0 {
        state.camera.shake = (state.camera.shake - real_dt * SHAKE_DECAY).max(0.0);
    }
}
