//! Neon Drift headless demo
//!
//! Plays a few autopilot rounds, persists the best score to a JSON file and
//! prints a JSON summary of every round.
//!
//! Usage: `neon-drift [seed] [rounds] [storage-path]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;

    use serde::Serialize;

    use neon_drift::Session;
    use neon_drift::persistence::FileStorage;
    use neon_drift::sim::{GameEvent, Mode, RunStats, restart};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Rounds still alive after this many simulated seconds are cut short
    const ROUND_LIMIT_SECS: f32 = 180.0;

    #[derive(Debug, Serialize)]
    struct RoundSummary {
        round: u32,
        score: u64,
        elapsed: f32,
        lives: u8,
        finished: bool,
        new_best: bool,
        glitches: u32,
        quests_completed: u32,
        stats: RunStats,
    }

    #[derive(Debug, Serialize)]
    struct Summary {
        seed: u64,
        best: u64,
        rounds: Vec<RoundSummary>,
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        env_logger::init();

        let mut args = std::env::args().skip(1);
        let seed: u64 = match args.next() {
            Some(raw) => raw.parse()?,
            None => rand::random(),
        };
        let rounds: u32 = match args.next() {
            Some(raw) => raw.parse()?,
            None => 3,
        };
        let path = args.next().unwrap_or_else(|| "neon-drift.json".to_string());

        let storage = FileStorage::open_or_reset(&path)?;
        log::info!(
            "Neon Drift demo: seed {}, {} rounds, storage {}",
            seed,
            rounds,
            storage.path().display()
        );

        let mut session = Session::new(storage, seed);
        session.input.autopilot = true;

        let mut summaries = Vec::with_capacity(rounds as usize);
        for round in 1..=rounds {
            restart(session.state_mut());
            let mut glitches = 0;
            let mut quests_completed = 0;
            let mut new_best = false;

            while session.state().mode == Mode::Running
                && session.state().elapsed < ROUND_LIMIT_SECS
            {
                for event in session.frame(FRAME_DT) {
                    match event {
                        GameEvent::GlitchStarted(_) => glitches += 1,
                        GameEvent::QuestCompleted { .. } => quests_completed += 1,
                        GameEvent::RunEnded { new_best: best, .. } => new_best = best,
                        _ => {}
                    }
                }
            }

            let state = session.state();
            summaries.push(RoundSummary {
                round,
                score: state.ledger.display_score(),
                elapsed: state.elapsed,
                lives: state.ledger.lives,
                finished: state.mode == Mode::Over,
                new_best,
                glitches,
                quests_completed,
                stats: state.ledger.stats,
            });
        }

        let summary = Summary {
            seed,
            best: session.best(),
            rounds: summaries,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run() {
        eprintln!("neon-drift: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `neon_drift::Session` directly
}
