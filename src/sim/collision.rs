//! Collision detection and resolution
//!
//! Everything is a circle. Passes run in a fixed order (orbs, power-ups,
//! hazards) and walk arena slots by index so the entity being resolved can
//! be removed on the spot.

use glam::Vec2;

use super::quest::QuestUpdate;
use super::state::{GameEvent, GameState, Hazard, PowerUpKind, colors};
use crate::consts::*;

/// Extra reach granted when grabbing power-ups
pub const POWERUP_TOLERANCE: f32 = 4.0;
/// Hazard hitboxes are this much smaller than their drawn size
pub const HAZARD_HIT_INSET: f32 = 4.0;
/// Width of the near-miss band outside the hazard's touch distance
pub const NEAR_MISS_BAND: f32 = 20.0;

/// How a hazard relates to the player this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardContact {
    Clear,
    NearMiss,
    Hit,
}

/// `distance <= reach` between two circle centres
#[inline]
pub fn within(a: Vec2, b: Vec2, reach: f32) -> bool {
    a.distance(b) <= reach
}

/// Classify a non-telegraphing hazard against the player
pub fn hazard_contact(hazard: &Hazard, player_pos: Vec2, player_radius: f32) -> HazardContact {
    if hazard.is_telegraphing() {
        return HazardContact::Clear;
    }
    let dist = hazard.pos.distance(player_pos);
    let touch = hazard.size + player_radius;
    if dist < touch - HAZARD_HIT_INSET {
        HazardContact::Hit
    } else if dist > touch && dist < touch + NEAR_MISS_BAND {
        HazardContact::NearMiss
    } else {
        HazardContact::Clear
    }
}

/// Run every collision pass in order
pub fn resolve_collisions(state: &mut GameState) {
    resolve_orbs(state);
    resolve_powerups(state);
    resolve_hazards(state);
}

pub fn resolve_orbs(state: &mut GameState) {
    for index in 0..state.orbs.slot_count() {
        let Some((id, orb)) = state.orbs.occupied_at(index) else {
            continue;
        };
        let orb = *orb;
        if !within(orb.pos, state.player.pos, orb.radius + state.player.radius) {
            continue;
        }
        state.orbs.remove(id);

        let award = state.ledger.collect_orb();
        let streak = state.ledger.streak;
        state.spawn_particles(orb.pos, 5, colors::CYAN);
        state.push_event(GameEvent::OrbCollected { streak });

        if let QuestUpdate::Completed(quest) = state.quests.on_orb_collected(streak) {
            complete_quest(state, quest.reward);
        }

        if award.extra_life {
            state.push_event(GameEvent::ExtraLife);
        }
    }
}

pub fn resolve_powerups(state: &mut GameState) {
    for index in 0..state.powerups.slot_count() {
        let Some((id, powerup)) = state.powerups.occupied_at(index) else {
            continue;
        };
        let powerup = *powerup;
        let reach = powerup.radius + state.player.radius + POWERUP_TOLERANCE;
        if !within(powerup.pos, state.player.pos, reach) {
            continue;
        }
        state.powerups.remove(id);

        match powerup.kind {
            PowerUpKind::Shield => state.timers.shield = SHIELD_DURATION,
            PowerUpKind::SizeDown => {
                state.player.radius = PLAYER_TINY_RADIUS;
                state.timers.size_down = SIZE_DOWN_DURATION;
            }
            PowerUpKind::Magnet => state.timers.magnet = MAGNET_DURATION,
            PowerUpKind::Freeze => state.timers.slow_motion.trigger(FREEZE_DURATION),
        }
        log::debug!("Power-up collected: {:?}", powerup.kind);
        state.push_event(GameEvent::PowerUp(powerup.kind));
    }
}

pub fn resolve_hazards(state: &mut GameState) {
    for index in 0..state.hazards.slot_count() {
        if state.mode != super::state::Mode::Running {
            break;
        }
        let Some((id, hazard)) = state.hazards.occupied_at(index) else {
            continue;
        };
        let hazard = *hazard;
        match hazard_contact(&hazard, state.player.pos, state.player.radius) {
            HazardContact::Clear => {}
            HazardContact::NearMiss => state.ledger.record_near_miss(),
            HazardContact::Hit => {
                state.hazards.remove(id);
                hazard_hit(state, &hazard);
            }
        }
    }
}

/// Resolve a hit by priority: dash kill, then shield, then damage
fn hazard_hit(state: &mut GameState, hazard: &Hazard) {
    if state.timers.dashing() {
        state.spawn_particles(hazard.pos, 8, colors::PINK);
        state.ledger.award(GHOST_KILL_SCORE);
        state.spawn_popup(hazard.pos, "Ghost Kill!");
        state.push_event(GameEvent::GhostKill);
        return;
    }

    if state.timers.shielded() {
        state.timers.shield = 0.0;
        state.ledger.shield_block();
        state.quests.on_streak_reset();
        state.spawn_particles(hazard.pos, 10, colors::WHITE);
        state.push_event(GameEvent::ShieldReflect);
        return;
    }

    let outcome = state.ledger.take_damage();
    state.quests.on_streak_reset();
    if outcome.last_chance {
        state.timers.slow_motion.trigger(LAST_CHANCE_DURATION);
        state.push_event(GameEvent::LastChance);
    }
    if outcome.combo_broken {
        state.timers.slow_motion.trigger(COMBO_BROKEN_DURATION);
        state.push_event(GameEvent::ComboBroken);
    }
    if state.settings.shake {
        state.camera.shake = DAMAGE_SHAKE;
    }
    state.push_event(GameEvent::Damaged {
        lives_left: outcome.lives_left,
    });

    if outcome.is_fatal() {
        super::tick::end_run(state);
    }
}

/// Pay out a finished quest
pub fn complete_quest(state: &mut GameState, reward: u32) {
    state.ledger.award(reward as f64);
    let pos = state.player.pos - Vec2::new(0.0, 20.0);
    state.spawn_popup(pos, format!("Quest Complete! +{}", reward));
    state.push_event(GameEvent::QuestCompleted { reward });
    log::debug!("Quest completed (+{})", reward);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{HazardKind, Mode, Orb, OrbKind, PowerUp, POWERUP_RADIUS};

    fn running_state() -> GameState {
        let mut state = GameState::new(41, 0);
        state.reset();
        state.mode = Mode::Running;
        state
    }

    fn hazard_at(pos: Vec2) -> Hazard {
        Hazard {
            pos,
            size: 15.0,
            speed: 100.0,
            spin: 0.0,
            drift: 0.0,
            kind: HazardKind::Normal,
            telegraph: 0.0,
        }
    }

    fn orb_at(pos: Vec2) -> Orb {
        Orb {
            pos,
            radius: 10.0,
            pulse: 0.0,
            kind: OrbKind::Normal,
            life: 10.0,
        }
    }

    #[test]
    fn test_hazard_contact_bands() {
        let hazard = hazard_at(Vec2::ZERO);
        // touch = 30, hit < 26, near miss in (30, 50)
        assert_eq!(hazard_contact(&hazard, Vec2::new(25.0, 0.0), 15.0), HazardContact::Hit);
        assert_eq!(hazard_contact(&hazard, Vec2::new(28.0, 0.0), 15.0), HazardContact::Clear);
        assert_eq!(hazard_contact(&hazard, Vec2::new(40.0, 0.0), 15.0), HazardContact::NearMiss);
        assert_eq!(hazard_contact(&hazard, Vec2::new(50.0, 0.0), 15.0), HazardContact::Clear);
    }

    #[test]
    fn test_telegraphing_hazard_never_collides() {
        let mut hazard = hazard_at(Vec2::ZERO);
        hazard.telegraph = 0.5;
        assert_eq!(hazard_contact(&hazard, Vec2::ZERO, 15.0), HazardContact::Clear);
    }

    #[test]
    fn test_orb_hit_scores_and_removes() {
        let mut state = running_state();
        let pos = state.player.pos;
        state.orbs.insert(orb_at(pos + Vec2::new(20.0, 0.0)));
        resolve_orbs(&mut state);
        assert!(state.orbs.is_empty());
        assert_eq!(state.ledger.streak, 1);
        assert!((state.ledger.multiplier - 1.2).abs() < 1e-6);
        assert!((state.ledger.score - 72.0).abs() < 1e-3);
        assert_eq!(state.ledger.stats.orbs_collected, 1);
    }

    #[test]
    fn test_orb_out_of_reach_stays() {
        let mut state = running_state();
        let pos = state.player.pos;
        state.orbs.insert(orb_at(pos + Vec2::new(26.0, 0.0)));
        resolve_orbs(&mut state);
        assert_eq!(state.orbs.len(), 1);
    }

    #[test]
    fn test_powerup_effects() {
        let mut state = running_state();
        let pos = state.player.pos;
        for kind in [
            PowerUpKind::Shield,
            PowerUpKind::SizeDown,
            PowerUpKind::Magnet,
            PowerUpKind::Freeze,
        ] {
            state.powerups.insert(PowerUp {
                pos: pos + Vec2::new(POWERUP_RADIUS + 8.0 + 3.0, 0.0),
                radius: POWERUP_RADIUS,
                pulse: 0.0,
                kind,
            });
        }
        resolve_powerups(&mut state);
        assert!(state.powerups.is_empty());
        assert_eq!(state.timers.shield, SHIELD_DURATION);
        assert_eq!(state.player.radius, PLAYER_TINY_RADIUS);
        assert_eq!(state.timers.size_down, SIZE_DOWN_DURATION);
        assert_eq!(state.timers.magnet, MAGNET_DURATION);
        assert_eq!(state.timers.slow_motion.remaining, FREEZE_DURATION);
    }

    #[test]
    fn test_dash_kill_beats_shield() {
        let mut state = running_state();
        state.timers.start_dash();
        state.timers.shield = 3.0;
        let lives = state.ledger.lives;
        state.hazards.insert(hazard_at(state.player.pos));
        resolve_hazards(&mut state);
        assert!(state.hazards.is_empty());
        assert_eq!(state.ledger.lives, lives);
        assert_eq!(state.timers.shield, 3.0);
        assert_eq!(state.ledger.score, GHOST_KILL_SCORE);
        assert!(state.events().contains(&GameEvent::GhostKill));
    }

    #[test]
    fn test_dash_kill_without_shield() {
        let mut state = running_state();
        state.timers.start_dash();
        state.ledger.streak = 7;
        state.ledger.multiplier = 2.4;
        state.hazards.insert(hazard_at(state.player.pos));
        resolve_hazards(&mut state);
        assert!(state.hazards.is_empty());
        assert_eq!(state.ledger.lives, STARTING_LIVES);
        assert_eq!(state.ledger.streak, 7);
        assert!((state.ledger.multiplier - 2.4).abs() < 1e-6);
        assert_eq!(state.ledger.score, GHOST_KILL_SCORE);
        assert_eq!(state.timers.slow_motion.remaining, 0.0);
        assert_eq!(state.timers.shield, 0.0);
        assert!(state.popups.values().any(|p| p.text == "Ghost Kill!"));
        assert!(state.events().contains(&GameEvent::GhostKill));
        assert!(!state.events().iter().any(|e| matches!(e, GameEvent::Damaged { .. })));
    }

    #[test]
    fn test_shield_absorbs_hit() {
        let mut state = running_state();
        state.timers.shield = 3.0;
        state.ledger.multiplier = 2.0;
        state.ledger.streak = 4;
        let lives = state.ledger.lives;
        state.hazards.insert(hazard_at(state.player.pos));
        resolve_hazards(&mut state);
        assert!(state.hazards.is_empty());
        assert_eq!(state.timers.shield, 0.0);
        assert_eq!(state.ledger.lives, lives);
        assert_eq!(state.ledger.streak, 0);
        assert!((state.ledger.multiplier - 1.6).abs() < 1e-6);
        assert_eq!(state.ledger.stats.damage_blocked, 1);
    }

    #[test]
    fn test_damage_breaks_combo_and_shakes() {
        let mut state = running_state();
        state.ledger.streak = 8;
        state.ledger.multiplier = 3.0;
        state.hazards.insert(hazard_at(state.player.pos));
        resolve_hazards(&mut state);
        assert_eq!(state.ledger.lives, STARTING_LIVES - 1);
        assert_eq!(state.ledger.streak, 0);
        assert_eq!(state.ledger.multiplier, 1.0);
        assert_eq!(state.timers.slow_motion.remaining, COMBO_BROKEN_DURATION);
        assert_eq!(state.camera.shake, DAMAGE_SHAKE);
        assert!(state.events().contains(&GameEvent::ComboBroken));
    }

    #[test]
    fn test_shake_respects_setting() {
        let mut state = running_state();
        state.settings.shake = false;
        state.hazards.insert(hazard_at(state.player.pos));
        resolve_hazards(&mut state);
        assert_eq!(state.camera.shake, 0.0);
    }

    #[test]
    fn test_last_life_hit_ends_run() {
        let mut state = running_state();
        state.ledger.lives = 1;
        state.ledger.score = 1234.6;
        state.hazards.insert(hazard_at(state.player.pos));
        state.hazards.insert(hazard_at(state.player.pos));
        resolve_hazards(&mut state);
        assert_eq!(state.mode, Mode::Over);
        assert_eq!(state.ledger.lives, 0);
        assert_eq!(state.ledger.best, 1234);
        assert_eq!(state.timers.slow_motion.remaining, LAST_CHANCE_DURATION);
        // The second hazard is left alone once the run is over
        assert_eq!(state.hazards.len(), 1);
    }

    #[test]
    fn test_near_miss_counted() {
        let mut state = running_state();
        let pos = state.player.pos + Vec2::new(40.0, 0.0);
        state.hazards.insert(hazard_at(pos));
        resolve_hazards(&mut state);
        assert_eq!(state.ledger.stats.near_misses, 1);
        assert_eq!(state.hazards.len(), 1);
    }
}
