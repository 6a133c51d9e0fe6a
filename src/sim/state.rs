//! Game state and core simulation types
//!
//! Everything a run mutates lives in one [`GameState`] value, so several
//! independent simulations can coexist and tests can poke at any field.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::EntityArena;
use super::glitch::{GlitchDirector, GlitchKind};
use super::ledger::ScoreLedger;
use super::quest::{QuestKind, QuestTracker};
use super::timers::TimerSet;
use crate::consts::*;
use crate::settings::{Modifiers, Settings};

/// Current game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Before the first run
    Idle,
    /// Active gameplay
    Running,
    /// Fully suspended
    Paused,
    /// Run ended
    Over,
}

/// Playing field bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Random point at least `padding` away from every edge
    pub fn random_point(&self, padding: f32, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            padding + rng.random::<f32>() * (self.width - padding * 2.0),
            padding + rng.random::<f32>() * (self.height - padding * 2.0),
        )
    }
}

/// Trail point for player rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Remaining life in seconds
    pub life: f32,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 100;
pub const TRAIL_LIFE: f32 = 0.42;
pub const TRAIL_LIFE_DASHING: f32 = 0.18;
/// Ghost opacity lost per second
pub const GHOST_FADE_RATE: f32 = 2.0;

/// Dash afterimage
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ghost {
    pub pos: Vec2,
    pub opacity: f32,
}

/// The player-controlled agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Oldest first
    pub trail: Vec<TrailPoint>,
    pub ghosts: Vec<Ghost>,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            speed: PLAYER_SPEED,
            trail: Vec::with_capacity(TRAIL_LENGTH + 1),
            ghosts: Vec::new(),
        }
    }

    /// Record current position to trail (call each tick)
    pub fn record_trail(&mut self, dashing: bool) {
        let life = if dashing { TRAIL_LIFE_DASHING } else { TRAIL_LIFE };
        self.trail.push(TrailPoint {
            pos: self.pos,
            life,
        });
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
    }

    /// Age trail points by simulated time
    pub fn age_trail(&mut self, dt: f32) {
        for point in &mut self.trail {
            point.life -= dt;
        }
        self.trail.retain(|p| p.life > 0.0);
    }

    pub fn leave_ghost(&mut self) {
        self.ghosts.push(Ghost {
            pos: self.pos,
            opacity: 1.0,
        });
    }

    /// Fade ghosts by real time
    pub fn fade_ghosts(&mut self, real_dt: f32) {
        for ghost in &mut self.ghosts {
            ghost.opacity -= real_dt * GHOST_FADE_RATE;
        }
        self.ghosts.retain(|g| g.opacity > 0.0);
    }
}

/// Orb variants; only the tint differs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrbKind {
    #[default]
    Normal,
    Magnet,
    Freeze,
}

pub const ORB_LIFETIME: f32 = 10.0;
/// Orb pull toward the player while a magnet is active (units/second)
pub const MAGNET_PULL_SPEED: f32 = 300.0;

/// A collectible orb
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Orb {
    pub pos: Vec2,
    pub radius: f32,
    pub pulse: f32,
    pub kind: OrbKind,
    /// Seconds until despawn
    pub life: f32,
}

impl Orb {
    /// Age and, when `magnet_target` is set, drift toward it
    pub fn advance(&mut self, dt: f32, magnet_target: Option<Vec2>) {
        self.pulse += dt * 3.0;
        self.life -= dt;
        if let Some(target) = magnet_target {
            self.pos += crate::direction_to(self.pos, target) * MAGNET_PULL_SPEED * dt;
        }
    }
}

/// Hazard movement patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HazardKind {
    /// Falls with a fixed lateral drift
    #[default]
    Normal,
    /// Steers toward the player at reduced speed
    Homing,
    /// Falls while swaying sideways
    Zigzag,
}

pub const HAZARD_TELEGRAPH: f32 = 1.0;
pub const HOMING_SPEED_FACTOR: f32 = 0.6;
pub const ZIGZAG_AMPLITUDE: f32 = 100.0;
pub const ZIGZAG_RATE: f32 = 5.0;
pub const HAZARD_SPIN_RATE: f32 = 3.0;
/// Margins outside the field before a hazard is pruned
pub const HAZARD_MARGIN_Y: f32 = 40.0;
pub const HAZARD_MARGIN_X: f32 = 60.0;

/// Shared per-tick inputs for hazard movement
#[derive(Debug, Clone, Copy)]
pub struct HazardMotion {
    pub player: Vec2,
    pub elapsed: f32,
    pub speed_factor: f32,
}

/// A falling or chasing hazard
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub spin: f32,
    /// Lateral drift (units/second) for normal hazards
    pub drift: f32,
    pub kind: HazardKind,
    /// Warm-up countdown; no collisions while positive
    pub telegraph: f32,
}

impl Hazard {
    pub fn is_telegraphing(&self) -> bool {
        self.telegraph > 0.0
    }

    pub fn advance(&mut self, dt: f32, motion: &HazardMotion) {
        if self.is_telegraphing() {
            self.telegraph -= dt;
            return;
        }

        let speed = self.speed * motion.speed_factor;
        match self.kind {
            HazardKind::Homing => {
                let dir = crate::direction_to(self.pos, motion.player);
                self.pos += dir * speed * HOMING_SPEED_FACTOR * dt;
            }
            HazardKind::Zigzag => {
                self.pos.y += speed * dt;
                self.pos.x += (motion.elapsed * ZIGZAG_RATE).sin() * ZIGZAG_AMPLITUDE * dt;
            }
            HazardKind::Normal => {
                self.pos.y += speed * dt;
                self.pos.x += self.drift * dt;
            }
        }
        self.spin += dt * HAZARD_SPIN_RATE;
    }

    pub fn in_bounds(&self, field: &Field) -> bool {
        self.pos.y < field.height + HAZARD_MARGIN_Y
            && self.pos.y > -HAZARD_MARGIN_Y
            && self.pos.x > -HAZARD_MARGIN_X
            && self.pos.x < field.width + HAZARD_MARGIN_X
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    SizeDown,
    Magnet,
    Freeze,
}

impl PowerUpKind {
    /// Kinds rolled when a spawn is not a shield
    pub const SPECIALS: [PowerUpKind; 3] =
        [PowerUpKind::SizeDown, PowerUpKind::Magnet, PowerUpKind::Freeze];
}

pub const POWERUP_RADIUS: f32 = 13.0;

/// A pickup entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub radius: f32,
    pub pulse: f32,
    pub kind: PowerUpKind,
}

/// Packed 0xRRGGBB particle colors
pub mod colors {
    pub const WHITE: u32 = 0xffffff;
    pub const CYAN: u32 = 0x8af5ff;
    pub const PINK: u32 = 0xff6dd6;
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub color: u32,
}

pub const POPUP_LIFE: f32 = 1.5;
pub const POPUP_RISE_SPEED: f32 = 20.0;

/// Floating text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPopup {
    pub pos: Vec2,
    pub text: String,
    pub life: f32,
}

/// Camera hints for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub zoom: f32,
    pub shake: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            shake: 0.0,
        }
    }
}

/// Spawn cadence timers (simulated seconds since the last spawn)
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnClock {
    pub orb: f32,
    pub hazard: f32,
    pub powerup: f32,
    /// Threshold for the next power-up spawn
    pub next_powerup: f32,
}

/// First power-up of a run arrives in [6, 12) seconds
pub const FIRST_POWERUP_MIN: f32 = 6.0;
pub const FIRST_POWERUP_SPREAD: f32 = 6.0;

impl SpawnClock {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            orb: 0.0,
            hazard: 0.0,
            powerup: 0.0,
            next_powerup: FIRST_POWERUP_MIN + rng.random::<f32>() * FIRST_POWERUP_SPREAD,
        }
    }
}

/// Feedback for UI collaborators (overlay flashes, narrative log, sounds)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RunStarted,
    Paused,
    Resumed,
    DashStarted,
    OrbCollected { streak: u32 },
    ExtraLife,
    PowerUp(PowerUpKind),
    GhostKill,
    ShieldReflect,
    LastChance,
    ComboBroken,
    Damaged { lives_left: u8 },
    GlitchStarted(GlitchKind),
    GlitchEnded,
    QuestStarted(QuestKind),
    QuestCompleted { reward: u32 },
    RunEnded { score: u64, best: u64, new_best: bool },
}

impl GameEvent {
    /// Overlay text, if the event flashes one
    pub fn message(&self) -> Option<String> {
        let text = match self {
            GameEvent::RunStarted => "System Online. Good luck, Pilot.",
            GameEvent::Paused => "Paused",
            GameEvent::DashStarted => "Dash!",
            GameEvent::ExtraLife => "+1 life streak",
            GameEvent::PowerUp(PowerUpKind::Shield) => "Shielded",
            GameEvent::PowerUp(PowerUpKind::SizeDown) => "Tiny Mode",
            GameEvent::PowerUp(PowerUpKind::Magnet) => "Magnet Active",
            GameEvent::PowerUp(PowerUpKind::Freeze) => "Time Freeze",
            GameEvent::ShieldReflect => "Shield Reflect!",
            GameEvent::LastChance => "LAST CHANCE!",
            GameEvent::ComboBroken => "Combo Broken...",
            GameEvent::Damaged { lives_left } if *lives_left > 0 => "Ouch!",
            GameEvent::GlitchStarted(kind) => return Some(format!("GLITCH: {}", kind.label())),
            GameEvent::GlitchEnded => "System Stabilized",
            _ => return None,
        };
        Some(text.to_string())
    }
}

/// HUD numbers refreshed at the end of every running tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub multiplier: f32,
    pub elapsed: f32,
    pub lives: u8,
    pub streak: u32,
    pub best: u64,
    /// Remaining shield, `None` when down
    pub shield: Option<f32>,
    /// Remaining dash cooldown, `None` when ready
    pub dash_cooldown: Option<f32>,
    /// Quest description and completion fraction
    pub quest: Option<(String, f32)>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: Mode,
    pub field: Field,
    /// Simulated seconds since the run began
    pub elapsed: f32,
    pub player: Player,
    pub orbs: EntityArena<Orb>,
    pub hazards: EntityArena<Hazard>,
    pub powerups: EntityArena<PowerUp>,
    pub particles: EntityArena<Particle>,
    pub popups: EntityArena<TextPopup>,
    pub ledger: ScoreLedger,
    pub timers: TimerSet,
    pub glitch: GlitchDirector,
    pub quests: QuestTracker,
    pub spawn: SpawnClock,
    pub camera: Camera,
    /// Feedback settings; may change at any time
    pub settings: Settings,
    /// Modifiers applied at the next reset
    pub modifiers: Modifiers,
    /// Modifiers in force for the current run
    pub run_modifiers: Modifiers,
    pub hud: HudSnapshot,
    /// Gameplay randomness
    pub rng: Pcg32,
    /// Cosmetic randomness (particles), split from `rng` at every reset so
    /// feedback settings never shift the gameplay stream
    pub fx_rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game state with the given seed and stored best score
    pub fn new(seed: u64, best: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let field = Field::default();
        let spawn = SpawnClock::new(&mut rng);
        let fx_rng = Pcg32::seed_from_u64(rng.random());
        let mut state = Self {
            mode: Mode::Idle,
            field,
            elapsed: 0.0,
            player: Player::new(field.center(), PLAYER_RADIUS),
            orbs: EntityArena::new(),
            hazards: EntityArena::new(),
            powerups: EntityArena::new(),
            particles: EntityArena::new(),
            popups: EntityArena::new(),
            ledger: ScoreLedger::new(best),
            timers: TimerSet::default(),
            glitch: GlitchDirector::default(),
            quests: QuestTracker::default(),
            spawn,
            camera: Camera::default(),
            settings: Settings::default(),
            modifiers: Modifiers::default(),
            run_modifiers: Modifiers::default(),
            hud: HudSnapshot::default(),
            rng,
            fx_rng,
            events: Vec::new(),
        };
        state.refresh_hud();
        state
    }

    /// Player radius implied by the run's modifiers
    pub fn default_radius(&self) -> f32 {
        if self.run_modifiers.tiny {
            PLAYER_TINY_RADIUS
        } else {
            PLAYER_RADIUS
        }
    }

    /// Clear everything a run owns. Only best score and configuration survive.
    pub fn reset(&mut self) {
        self.run_modifiers = self.modifiers;
        self.elapsed = 0.0;
        self.ledger.reset(self.run_modifiers.hardcore);
        self.timers = TimerSet::default();
        self.glitch = GlitchDirector::default();
        self.spawn = SpawnClock::new(&mut self.rng);
        self.fx_rng = Pcg32::seed_from_u64(self.rng.random());
        self.camera = Camera::default();

        self.orbs.clear();
        self.hazards.clear();
        self.powerups.clear();
        self.particles.clear();
        self.popups.clear();
        self.events.clear();

        self.player = Player::new(self.field.center(), self.default_radius());

        let quest = self.quests.reset(&mut self.rng);
        self.push_event(GameEvent::RunStarted);
        self.push_event(GameEvent::QuestStarted(quest));
        self.refresh_hud();
        log::info!(
            "Run reset (lives {}, modifiers {:?})",
            self.ledger.lives,
            self.run_modifiers
        );
    }

    /// Resize the field, scaling the player position to match and keeping
    /// the player fully inside
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let scale = Vec2::new(width / self.field.width, height / self.field.height);
        self.field = Field { width, height };
        self.player.pos = crate::clamp_to_field(
            self.player.pos * scale,
            self.player.radius,
            width,
            height,
        );
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand queued events to a UI collaborator
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Burst of cosmetic particles; suppressed when the setting is off
    pub fn spawn_particles(&mut self, pos: Vec2, count: usize, color: u32) {
        if !self.settings.particles {
            return;
        }
        for _ in 0..count {
            let vel = Vec2::new(
                (self.fx_rng.random::<f32>() - 0.5) * 200.0,
                (self.fx_rng.random::<f32>() - 0.5) * 200.0,
            );
            let life = 0.5 + self.fx_rng.random::<f32>() * 0.5;
            self.particles.insert(Particle {
                pos,
                vel,
                life,
                color,
            });
        }
    }

    pub fn spawn_popup(&mut self, pos: Vec2, text: impl Into<String>) {
        self.popups.insert(TextPopup {
            pos,
            text: text.into(),
            life: POPUP_LIFE,
        });
    }

    /// Copy current numbers into the HUD snapshot
    pub fn refresh_hud(&mut self) {
        self.hud = HudSnapshot {
            score: self.ledger.display_score(),
            multiplier: self.ledger.multiplier,
            elapsed: self.elapsed,
            lives: self.ledger.lives,
            streak: self.ledger.streak,
            best: self.ledger.best,
            shield: self.timers.shielded().then_some(self.timers.shield),
            dash_cooldown: (self.timers.dash_cooldown > 0.0).then_some(self.timers.dash_cooldown),
            quest: self.quests.active.map(|q| (q.describe(), q.fraction())),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_is_bounded() {
        let mut player = Player::new(Vec2::ZERO, PLAYER_RADIUS);
        for i in 0..150 {
            player.pos.x = i as f32;
            player.record_trail(false);
        }
        assert_eq!(player.trail.len(), TRAIL_LENGTH);
        // Oldest discarded first
        assert_eq!(player.trail[0].pos.x, 50.0);
        assert_eq!(player.trail.last().map(|p| p.pos.x), Some(149.0));
    }

    #[test]
    fn test_dash_trail_is_shorter_lived() {
        let mut player = Player::new(Vec2::ZERO, PLAYER_RADIUS);
        player.record_trail(true);
        player.record_trail(false);
        assert_eq!(player.trail[0].life, TRAIL_LIFE_DASHING);
        assert_eq!(player.trail[1].life, TRAIL_LIFE);
        player.age_trail(0.2);
        assert_eq!(player.trail.len(), 1);
    }

    #[test]
    fn test_ghost_fades_at_two_per_second() {
        let mut player = Player::new(Vec2::ZERO, PLAYER_RADIUS);
        player.leave_ghost();
        player.fade_ghosts(0.25);
        assert!((player.ghosts[0].opacity - 0.5).abs() < 1e-6);
        player.fade_ghosts(0.25);
        assert!(player.ghosts.is_empty());
    }

    #[test]
    fn test_telegraph_blocks_motion() {
        let mut hazard = Hazard {
            pos: Vec2::new(100.0, 0.0),
            size: 15.0,
            speed: 200.0,
            spin: 0.0,
            drift: 10.0,
            kind: HazardKind::Normal,
            telegraph: HAZARD_TELEGRAPH,
        };
        let motion = HazardMotion {
            player: Vec2::ZERO,
            elapsed: 0.0,
            speed_factor: 1.0,
        };
        hazard.advance(0.5, &motion);
        assert_eq!(hazard.pos, Vec2::new(100.0, 0.0));
        hazard.advance(0.5, &motion);
        assert!(!hazard.is_telegraphing());
        hazard.advance(0.5, &motion);
        assert_eq!(hazard.pos, Vec2::new(105.0, 100.0));
    }

    #[test]
    fn test_homing_moves_toward_player() {
        let mut hazard = Hazard {
            pos: Vec2::new(0.0, 0.0),
            size: 15.0,
            speed: 100.0,
            spin: 0.0,
            drift: 0.0,
            kind: HazardKind::Homing,
            telegraph: 0.0,
        };
        let motion = HazardMotion {
            player: Vec2::new(100.0, 0.0),
            elapsed: 0.0,
            speed_factor: 1.0,
        };
        hazard.advance(1.0, &motion);
        assert!((hazard.pos.x - 60.0).abs() < 1e-4);
        assert!(hazard.pos.y.abs() < 1e-4);
    }

    #[test]
    fn test_hazard_bounds_margins() {
        let field = Field::default();
        let mut hazard = Hazard {
            pos: Vec2::new(-59.0, 100.0),
            size: 15.0,
            speed: 0.0,
            spin: 0.0,
            drift: 0.0,
            kind: HazardKind::Normal,
            telegraph: 0.0,
        };
        assert!(hazard.in_bounds(&field));
        hazard.pos.x = -60.0;
        assert!(!hazard.in_bounds(&field));
        hazard.pos = Vec2::new(100.0, field.height + 40.0);
        assert!(!hazard.in_bounds(&field));
    }

    #[test]
    fn test_resize_scales_player() {
        let mut state = GameState::new(1, 0);
        state.player.pos = Vec2::new(450.0, 270.0);
        state.resize(450.0, 540.0);
        assert_eq!(state.player.pos, Vec2::new(225.0, 270.0));
    }

    #[test]
    fn test_resize_keeps_player_inside() {
        let mut state = GameState::new(1, 0);
        state.player.pos = Vec2::new(890.0, 530.0);
        // Scaled position (445, 29.4) is within the radius of two edges
        state.resize(450.0, 30.0);
        assert_eq!(state.player.pos.x, 450.0 - PLAYER_RADIUS);
        assert_eq!(state.player.pos.y, PLAYER_RADIUS);
    }

    #[test]
    fn test_zigzag_sways_while_falling() {
        let mut hazard = Hazard {
            pos: Vec2::new(100.0, 0.0),
            size: 15.0,
            speed: 100.0,
            spin: 0.0,
            drift: 40.0,
            kind: HazardKind::Zigzag,
            telegraph: 0.0,
        };
        let motion = HazardMotion {
            player: Vec2::ZERO,
            elapsed: 0.1,
            speed_factor: 1.0,
        };
        hazard.advance(0.1, &motion);
        // Drift is ignored; sway is sin(0.1 * 5) * 100 units/s
        let sway = (0.5f32).sin() * 100.0 * 0.1;
        assert!((hazard.pos.x - (100.0 + sway)).abs() < 1e-4);
        assert!((hazard.pos.y - 10.0).abs() < 1e-4);

        let motion = HazardMotion {
            elapsed: 0.1,
            speed_factor: 1.5,
            ..motion
        };
        hazard.advance(0.1, &motion);
        assert!((hazard.pos.x - (100.0 + sway * 2.0)).abs() < 1e-4);
        assert!((hazard.pos.y - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_event_messages() {
        assert_eq!(GameEvent::DashStarted.message().as_deref(), Some("Dash!"));
        assert_eq!(
            GameEvent::GlitchStarted(GlitchKind::Wind).message().as_deref(),
            Some("GLITCH: HIGH WINDS")
        );
        assert_eq!(GameEvent::Damaged { lives_left: 0 }.message(), None);
        assert_eq!(GameEvent::OrbCollected { streak: 3 }.message(), None);
    }
}
