//! Quest tracker: one short-lived goal at a time
//!
//! Regeneration after a completed quest runs on simulated time so pausing
//! also pauses the countdown, and a reset cancels it outright.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Delay between completing a quest and the next one appearing
pub const QUEST_REGEN_DELAY: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestKind {
    /// Collect N orbs
    Collect,
    /// Stay alive for N seconds
    Survive,
    /// Reach a streak of N
    Streak,
}

impl QuestKind {
    pub const ALL: [QuestKind; 3] = [QuestKind::Collect, QuestKind::Survive, QuestKind::Streak];

    /// Fixed (target, reward) for each quest kind
    pub fn terms(&self) -> (f32, u32) {
        match self {
            QuestKind::Collect => (5.0, 500),
            QuestKind::Survive => (10.0, 300),
            QuestKind::Streak => (10.0, 1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub kind: QuestKind,
    pub target: f32,
    pub progress: f32,
    pub reward: u32,
}

impl Quest {
    pub fn new(kind: QuestKind) -> Self {
        let (target, reward) = kind.terms();
        Self {
            kind,
            target,
            progress: 0.0,
            reward,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }

    /// Progress as a fraction in [0, 1]
    pub fn fraction(&self) -> f32 {
        (self.progress / self.target).clamp(0.0, 1.0)
    }

    /// HUD description
    pub fn describe(&self) -> String {
        match self.kind {
            QuestKind::Collect => format!("Collect {} Orbs", self.target as u32),
            QuestKind::Survive => format!("Survive {}s", self.target as u32),
            QuestKind::Streak => format!("Reach {} Streak", self.target as u32),
        }
    }
}

/// Emitted when the tracker changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuestUpdate {
    None,
    Started(QuestKind),
    Completed(Quest),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestTracker {
    pub active: Option<Quest>,
    /// Pending regeneration countdown (simulated seconds)
    pub regen: Option<f32>,
}

impl QuestTracker {
    /// Drop any quest and pending regeneration, then roll a fresh quest
    pub fn reset(&mut self, rng: &mut impl Rng) -> QuestKind {
        self.regen = None;
        self.generate(rng)
    }

    /// Cancel everything, including a pending regeneration
    pub fn clear(&mut self) {
        self.active = None;
        self.regen = None;
    }

    pub fn generate(&mut self, rng: &mut impl Rng) -> QuestKind {
        let kind = QuestKind::ALL[rng.random_range(0..QuestKind::ALL.len())];
        self.active = Some(Quest::new(kind));
        kind
    }

    /// An orb was collected; `streak` is the streak after the pickup
    pub fn on_orb_collected(&mut self, streak: u32) -> QuestUpdate {
        let Some(quest) = self.active.as_mut() else {
            return QuestUpdate::None;
        };
        match quest.kind {
            QuestKind::Collect => quest.progress += 1.0,
            QuestKind::Streak => quest.progress = streak as f32,
            QuestKind::Survive => return QuestUpdate::None,
        }
        self.complete_if_done()
    }

    /// Streak dropped to zero; streak quests track the live streak
    pub fn on_streak_reset(&mut self) {
        if let Some(quest) = self.active.as_mut() {
            if quest.kind == QuestKind::Streak {
                quest.progress = 0.0;
            }
        }
    }

    /// Per-tick evaluation: survive progress and the regeneration countdown
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng) -> QuestUpdate {
        if let Some(remaining) = self.regen.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.regen = None;
                return QuestUpdate::Started(self.generate(rng));
            }
            return QuestUpdate::None;
        }

        match self.active.as_mut() {
            Some(quest) if quest.kind == QuestKind::Survive => {
                quest.progress += dt;
                self.complete_if_done()
            }
            _ => QuestUpdate::None,
        }
    }

    fn complete_if_done(&mut self) -> QuestUpdate {
        match self.active {
            Some(quest) if quest.is_complete() => {
                self.active = None;
                self.regen = Some(QUEST_REGEN_DELAY);
                QuestUpdate::Completed(quest)
            }
            _ => QuestUpdate::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn tracker_with(kind: QuestKind) -> QuestTracker {
        QuestTracker {
            active: Some(Quest::new(kind)),
            regen: None,
        }
    }

    #[test]
    fn test_collect_quest_completes_on_fifth_orb() {
        let mut tracker = tracker_with(QuestKind::Collect);
        for streak in 1..5 {
            assert_eq!(tracker.on_orb_collected(streak), QuestUpdate::None);
        }
        match tracker.on_orb_collected(5) {
            QuestUpdate::Completed(q) => assert_eq!(q.reward, 500),
            other => panic!("expected completion, got {:?}", other),
        }
        assert!(tracker.active.is_none());
        assert_eq!(tracker.regen, Some(QUEST_REGEN_DELAY));
    }

    #[test]
    fn test_streak_quest_follows_streak() {
        let mut tracker = tracker_with(QuestKind::Streak);
        tracker.on_orb_collected(4);
        tracker.on_streak_reset();
        assert_eq!(tracker.active.map(|q| q.progress), Some(0.0));
        assert!(matches!(
            tracker.on_orb_collected(10),
            QuestUpdate::Completed(Quest { reward: 1000, .. })
        ));
    }

    #[test]
    fn test_survive_quest_uses_simulated_time() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut tracker = tracker_with(QuestKind::Survive);
        for _ in 0..79 {
            assert_eq!(tracker.advance(0.125, &mut rng), QuestUpdate::None);
        }
        assert!(matches!(
            tracker.advance(0.125, &mut rng),
            QuestUpdate::Completed(Quest { reward: 300, .. })
        ));
    }

    #[test]
    fn test_regeneration_after_delay() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut tracker = tracker_with(QuestKind::Collect);
        if let Some(quest) = tracker.active.as_mut() {
            quest.progress = 4.0;
        }
        tracker.on_orb_collected(1);
        assert!(tracker.active.is_none());

        for _ in 0..39 {
            assert_eq!(tracker.advance(0.125, &mut rng), QuestUpdate::None);
        }
        assert!(matches!(
            tracker.advance(0.125, &mut rng),
            QuestUpdate::Started(_)
        ));
        assert!(tracker.active.is_some());
        assert!(tracker.regen.is_none());
    }

    #[test]
    fn test_reset_cancels_pending_regeneration() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut tracker = QuestTracker {
            active: None,
            regen: Some(2.0),
        };
        tracker.reset(&mut rng);
        assert!(tracker.regen.is_none());
        assert!(tracker.active.is_some());
    }
}
