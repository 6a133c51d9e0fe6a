//! Frame driver
//!
//! Owns a [`GameState`] and a storage backend. The host feeds it wall-clock
//! deltas and input; the session clamps the delta, ticks the simulation,
//! clears one-shot inputs and persists the best score when a run ends.

use crate::consts::MAX_FRAME_DT;
use crate::highscores::BestScore;
use crate::persistence::Storage;
use crate::settings::{Modifiers, Settings};
use crate::sim::{GameEvent, GameState, Mode, TickInput, tick};

pub struct Session<S: Storage> {
    state: GameState,
    storage: S,
    best: BestScore,
    /// Input for the next frame; `dash` and `toggle` are cleared after use
    pub input: TickInput,
    /// Mode seen at the end of the previous frame
    last_mode: Mode,
}

impl<S: Storage> Session<S> {
    /// Load persisted best score and configuration into a fresh idle game
    pub fn new(storage: S, seed: u64) -> Self {
        let best = BestScore::load(&storage);
        let mut state = GameState::new(seed, best.value);
        state.settings = Settings::load(&storage);
        state.modifiers = Modifiers::load(&storage);
        log::info!("Session initialized with seed {}", seed);
        Self {
            last_mode: state.mode,
            state,
            storage,
            best,
            input: TickInput::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn best(&self) -> u64 {
        self.best.value
    }

    /// Queue a play/pause press for the next frame
    pub fn press_toggle(&mut self) {
        self.input.toggle = true;
    }

    /// Queue a dash press for the next frame
    pub fn press_dash(&mut self) {
        self.input.dash = true;
    }

    /// Run one frame of `dt` wall-clock seconds and return the events it produced
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = dt.min(MAX_FRAME_DT);
        let input = self.input.clone();
        tick(&mut self.state, &input, dt);

        // Clear one-shot inputs after processing
        self.input.dash = false;
        self.input.toggle = false;

        let mode = self.state.mode;
        if mode != self.last_mode {
            if mode == Mode::Over {
                self.save_best();
            }
            self.last_mode = mode;
        }

        self.state.drain_events()
    }

    /// Change feedback settings; they take effect immediately
    pub fn set_settings(&mut self, settings: Settings) {
        self.state.settings = settings;
        if let Err(e) = settings.save(&mut self.storage) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    /// Change run modifiers; they apply from the next reset
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.state.modifiers = modifiers;
        if let Err(e) = modifiers.save(&mut self.storage) {
            log::warn!("Could not save modifiers: {}", e);
        }
    }

    fn save_best(&mut self) {
        if !self.best.record(self.state.ledger.best) {
            return;
        }
        if let Err(e) = self.best.save(&mut self.storage) {
            log::warn!("Could not save best score: {}", e);
        }
    }
}
