//! Demo-mode AI
//!
//! Produces movement for attract screens and the headless demo. It flees
//! nearby hazards, otherwise heads for the nearest pickup, and dashes
//! through hazards it can't avoid.

use glam::Vec2;

use super::glitch::GlitchKind;
use super::state::GameState;
use super::tick::TickInput;

/// Hazards farther than this are ignored
const DANGER_RADIUS: f32 = 140.0;
/// Dash when a hazard's edge is this close to the player's edge
const DASH_MARGIN: f32 = 18.0;
/// Distance from a wall where the AI starts steering back inward
const WALL_MARGIN: f32 = 60.0;
const FLEE_WEIGHT: f32 = 2.5;

/// Build the input the AI would send this tick. Toggle passes through.
pub fn steer(state: &GameState, input: &TickInput) -> TickInput {
    let pos = state.player.pos;
    let radius = state.player.radius;

    // Repulsion from everything dangerous, weighted by proximity
    let mut flee = Vec2::ZERO;
    let mut closest_gap = f32::MAX;
    for hazard in state.hazards.values() {
        let dist = hazard.pos.distance(pos);
        if dist > DANGER_RADIUS {
            continue;
        }
        flee += crate::direction_to(hazard.pos, pos) * (1.0 - dist / DANGER_RADIUS);
        if !hazard.is_telegraphing() {
            closest_gap = closest_gap.min(dist - hazard.size - radius);
        }
    }

    let field = state.field;
    let mut wall = Vec2::ZERO;
    if pos.x < WALL_MARGIN {
        wall.x += 1.0;
    } else if pos.x > field.width - WALL_MARGIN {
        wall.x -= 1.0;
    }
    if pos.y < WALL_MARGIN {
        wall.y += 1.0;
    } else if pos.y > field.height - WALL_MARGIN {
        wall.y -= 1.0;
    }

    // Power-ups first, then orbs
    let target = nearest(pos, state.powerups.values().map(|p| p.pos))
        .or_else(|| nearest(pos, state.orbs.values().map(|o| o.pos)));

    let seek = match target {
        Some(target) => crate::direction_to(pos, target),
        None => {
            // Idle drift so the demo never stands still
            let t = state.elapsed * 0.7;
            let wander = field.center() + Vec2::new(t.cos(), (t * 1.3).sin()) * 120.0;
            crate::direction_to(pos, wander) * 0.5
        }
    };

    let mut keys = (seek + flee * FLEE_WEIGHT + wall).normalize_or_zero();
    // The controller flips inverted input back
    if state.glitch.is(GlitchKind::Invert) {
        keys = -keys;
    }

    let dash = closest_gap < DASH_MARGIN && state.timers.dash_ready();

    TickInput {
        keys,
        pointer: None,
        tilt: None,
        dash: dash || input.dash,
        toggle: input.toggle,
        autopilot: true,
    }
}

fn nearest(pos: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    points.min_by(|a, b| {
        a.distance_squared(pos)
            .partial_cmp(&b.distance_squared(pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Hazard, HazardKind, Orb, OrbKind};

    fn running_state() -> GameState {
        let mut state = GameState::new(51, 0);
        state.reset();
        state
    }

    fn hazard_at(pos: Vec2, telegraph: f32) -> Hazard {
        Hazard {
            pos,
            size: 15.0,
            speed: 100.0,
            spin: 0.0,
            drift: 0.0,
            kind: HazardKind::Normal,
            telegraph,
        }
    }

    #[test]
    fn test_seeks_nearest_orb() {
        let mut state = running_state();
        let pos = state.player.pos;
        for offset in [Vec2::new(200.0, 0.0), Vec2::new(0.0, -80.0)] {
            state.orbs.insert(Orb {
                pos: pos + offset,
                radius: 10.0,
                pulse: 0.0,
                kind: OrbKind::Normal,
                life: 10.0,
            });
        }
        let input = steer(&state, &TickInput::default());
        assert!(input.keys.y < -0.9);
        assert!(!input.dash);
    }

    #[test]
    fn test_flees_hazard() {
        let mut state = running_state();
        let pos = state.player.pos;
        state.hazards.insert(hazard_at(pos + Vec2::new(70.0, 0.0), 0.5));
        let input = steer(&state, &TickInput::default());
        assert!(input.keys.x < 0.0);
        // Still telegraphing: no reason to dash yet
        assert!(!input.dash);
    }

    #[test]
    fn test_dashes_when_cornered() {
        let mut state = running_state();
        let pos = state.player.pos;
        state.hazards.insert(hazard_at(pos + Vec2::new(40.0, 0.0), 0.0));
        assert!(steer(&state, &TickInput::default()).dash);

        state.timers.start_dash();
        assert!(!steer(&state, &TickInput::default()).dash);
    }

    #[test]
    fn test_toggle_passes_through() {
        let state = running_state();
        let input = TickInput {
            toggle: true,
            autopilot: true,
            ..Default::default()
        };
        assert!(steer(&state, &input).toggle);
    }
}
