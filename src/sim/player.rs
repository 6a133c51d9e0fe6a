//! Player controller: input resolution, movement integration, trail upkeep

use glam::Vec2;

use super::glitch::{GlitchKind, WIND_SPEED};
use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// Pointer targets closer than this are ignored
pub const POINTER_DEAD_ZONE: f32 = 10.0;
/// Tilt magnitudes at or below this are treated as level
pub const TILT_DEAD_ZONE: f32 = 0.12;

/// Resolved movement request: direction (not necessarily unit) and analog scale
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub dir: Vec2,
    pub scale: f32,
}

impl MoveIntent {
    pub fn is_idle(&self) -> bool {
        self.scale <= 0.0
    }
}

/// Merge the available input sources into one intent.
///
/// Keys are the baseline. A held pointer overrides them unless tilt is on;
/// tilt, when present, always wins (including its dead zone).
pub fn resolve_intent(input: &TickInput, player_pos: Vec2) -> MoveIntent {
    let keys = input.keys.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    let mut intent = MoveIntent {
        dir: keys,
        scale: if keys.length_squared() > 0.0 { 1.0 } else { 0.0 },
    };

    if input.tilt.is_none() {
        if let Some(target) = input.pointer {
            let to_target = target - player_pos;
            if to_target.length() > POINTER_DEAD_ZONE {
                intent = MoveIntent {
                    dir: to_target.normalize_or_zero(),
                    scale: 1.0,
                };
            }
        }
    }

    if let Some(tilt) = input.tilt {
        let len = tilt.length().min(1.0);
        intent = if len > TILT_DEAD_ZONE {
            MoveIntent {
                dir: tilt / len,
                scale: len,
            }
        } else {
            MoveIntent::default()
        };
    }

    intent
}

/// Integrate one tick of player movement, then clamp and record the trail
pub fn move_player(state: &mut GameState, mut intent: MoveIntent, dt: f32) {
    let dashing = state.timers.dashing();
    let boost = if dashing { DASH_MULTIPLIER } else { 1.0 };
    let step = state.player.speed * dt * boost;

    match state.glitch.active_kind() {
        Some(GlitchKind::Invert) => intent.dir = -intent.dir,
        Some(GlitchKind::Wind) => state.player.pos.x += WIND_SPEED * dt,
        _ => {}
    }

    if !intent.is_idle() {
        let norm = intent.dir.length();
        let norm = if norm > 0.0 { norm } else { 1.0 };
        state.player.pos += intent.dir / norm * step * intent.scale;
    }

    let field = state.field;
    state.player.pos = crate::clamp_to_field(
        state.player.pos,
        state.player.radius,
        field.width,
        field.height,
    );

    state.player.age_trail(dt);
    state.player.record_trail(dashing);
}
