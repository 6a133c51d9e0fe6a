//! Read-only view of a game for renderers and HUDs

use serde::{Deserialize, Serialize};

use super::arena::EntityArena;
use super::glitch::GlitchKind;
use super::state::{
    Camera, Field, GameState, Hazard, HudSnapshot, Mode, Orb, Particle, Player, PowerUp,
    TextPopup,
};
use crate::settings::Settings;

/// Background palette, driven by the multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteTier {
    Base,
    /// Multiplier above 2
    Warm,
    /// Multiplier above 3
    Hot,
    /// Disco glitch; overrides the multiplier tiers
    Disco,
}

impl PaletteTier {
    pub fn for_state(multiplier: f32, glitch: Option<GlitchKind>) -> Self {
        if glitch == Some(GlitchKind::Disco) {
            PaletteTier::Disco
        } else if multiplier > 3.0 {
            PaletteTier::Hot
        } else if multiplier > 2.0 {
            PaletteTier::Warm
        } else {
            PaletteTier::Base
        }
    }
}

/// Everything a frame needs to draw, borrowed from the state
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub mode: Mode,
    pub field: Field,
    pub player: &'a Player,
    pub orbs: &'a EntityArena<Orb>,
    pub hazards: &'a EntityArena<Hazard>,
    pub powerups: &'a EntityArena<PowerUp>,
    pub particles: &'a EntityArena<Particle>,
    pub popups: &'a EntityArena<TextPopup>,
    pub camera: Camera,
    pub glitch: Option<GlitchKind>,
    pub palette: PaletteTier,
    pub shielded: bool,
    pub dashing: bool,
    pub magnet: bool,
    /// A slow-motion window is running
    pub slow_motion: bool,
    pub hud: &'a HudSnapshot,
    pub settings: Settings,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot<'_> {
        let glitch = self.glitch.active_kind();
        Snapshot {
            mode: self.mode,
            field: self.field,
            player: &self.player,
            orbs: &self.orbs,
            hazards: &self.hazards,
            powerups: &self.powerups,
            particles: &self.particles,
            popups: &self.popups,
            camera: self.camera,
            glitch,
            palette: PaletteTier::for_state(self.ledger.multiplier, glitch),
            shielded: self.timers.shielded(),
            dashing: self.timers.dashing(),
            magnet: self.timers.magnet_active(),
            slow_motion: self.timers.slow_motion.is_active(),
            hud: &self.hud,
            settings: self.settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_tiers() {
        assert_eq!(PaletteTier::for_state(1.0, None), PaletteTier::Base);
        assert_eq!(PaletteTier::for_state(2.0, None), PaletteTier::Base);
        assert_eq!(PaletteTier::for_state(2.2, None), PaletteTier::Warm);
        assert_eq!(PaletteTier::for_state(3.2, None), PaletteTier::Hot);
        assert_eq!(
            PaletteTier::for_state(1.0, Some(GlitchKind::Disco)),
            PaletteTier::Disco
        );
        assert_eq!(
            PaletteTier::for_state(4.0, Some(GlitchKind::Wind)),
            PaletteTier::Hot
        );
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(61, 0);
        state.reset();
        state.timers.shield = 2.0;
        state.ledger.multiplier = 3.4;
        state.timers.slow_motion.trigger(1.0);
        let snap = state.snapshot();
        assert!(snap.shielded);
        assert!(!snap.dashing);
        assert!(snap.slow_motion);
        assert_eq!(snap.palette, PaletteTier::Hot);
        assert_eq!(snap.player.pos, state.field.center());
        assert_eq!(snap.camera.zoom, 1.0);
    }
}
