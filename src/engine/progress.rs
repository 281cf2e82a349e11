use serde::Serialize;

use crate::config::Config;
use crate::error::ConfigError;
use crate::levels::LevelId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Active,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Phase::Active)
    }
}

/// Notifications for the surrounding application. Each is produced exactly
/// once per transition that causes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressEvent {
    LevelComplete,
    LevelFailed,
    LevelRestart,
}

/// Where the application should go after a completed level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    NextLevel(LevelId),
    LevelSelect,
}

/// Result of leaving a completed level: the restart notification for the
/// level being left, then where to go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelExit {
    pub event: ProgressEvent,
    pub navigation: Navigation,
}

/// Counts correct answers and mistakes for one level instance.
///
/// The tracker is `Active` until either threshold is reached, then stays in
/// the terminal phase and ignores further answers until `reset`.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    tasks_completed: u32,
    mistakes: u32,
    tasks_to_complete: u32,
    max_mistakes: u32,
    phase: Phase,
}

impl ProgressTracker {
    pub fn new(tasks_to_complete: u32, max_mistakes: u32) -> Result<Self, ConfigError> {
        if tasks_to_complete == 0 {
            return Err(ConfigError::InvalidThreshold {
                name: "tasks_to_complete",
            });
        }
        if max_mistakes == 0 {
            return Err(ConfigError::InvalidThreshold {
                name: "max_mistakes",
            });
        }
        Ok(Self {
            tasks_completed: 0,
            mistakes: 0,
            tasks_to_complete,
            max_mistakes,
            phase: Phase::Active,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(config.tasks_to_complete, config.max_mistakes)
    }

    pub fn correct(&mut self) -> Option<ProgressEvent> {
        if self.phase != Phase::Active {
            tracing::debug!(phase = ?self.phase, "ignoring correct answer outside active phase");
            return None;
        }
        self.tasks_completed += 1;
        tracing::debug!(
            tasks_completed = self.tasks_completed,
            tasks_to_complete = self.tasks_to_complete,
            "correct answer"
        );
        if self.tasks_completed >= self.tasks_to_complete {
            self.phase = Phase::Succeeded;
            tracing::info!(mistakes = self.mistakes, "level complete");
            return Some(ProgressEvent::LevelComplete);
        }
        None
    }

    pub fn incorrect(&mut self) -> Option<ProgressEvent> {
        if self.phase != Phase::Active {
            tracing::debug!(phase = ?self.phase, "ignoring incorrect answer outside active phase");
            return None;
        }
        self.mistakes += 1;
        tracing::debug!(
            mistakes = self.mistakes,
            max_mistakes = self.max_mistakes,
            "incorrect answer"
        );
        if self.mistakes >= self.max_mistakes {
            self.phase = Phase::Failed;
            tracing::info!(tasks_completed = self.tasks_completed, "level failed");
            return Some(ProgressEvent::LevelFailed);
        }
        None
    }

    /// Zero both counters and return to `Active`.
    pub fn reset(&mut self) -> ProgressEvent {
        self.tasks_completed = 0;
        self.mistakes = 0;
        self.phase = Phase::Active;
        tracing::info!("level restart");
        ProgressEvent::LevelRestart
    }

    /// Leave a completed level. Only valid once `Succeeded`; resets the
    /// tracker and reports where to go, `next` being the following level if
    /// there is one.
    pub fn advance(&mut self, next: Option<LevelId>) -> Option<LevelExit> {
        if self.phase != Phase::Succeeded {
            return None;
        }
        let event = self.reset();
        let navigation = match next {
            Some(id) => Navigation::NextLevel(id),
            None => Navigation::LevelSelect,
        };
        Some(LevelExit { event, navigation })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn tasks_completed(&self) -> u32 {
        self.tasks_completed
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn tasks_to_complete(&self) -> u32 {
        self.tasks_to_complete
    }

    pub fn max_mistakes(&self) -> u32 {
        self.max_mistakes
    }

    /// Hearts left to show.
    pub fn remaining_mistakes(&self) -> u32 {
        self.max_mistakes.saturating_sub(self.mistakes)
    }

    /// Fraction of the level's tasks done, for the progress bar.
    pub fn progress(&self) -> f64 {
        self.tasks_completed as f64 / self.tasks_to_complete as f64
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            tasks_completed: self.tasks_completed,
            mistakes: self.mistakes,
            tasks_to_complete: self.tasks_to_complete,
            max_mistakes: self.max_mistakes,
            remaining_mistakes: self.remaining_mistakes(),
            phase: self.phase,
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self {
            tasks_completed: 0,
            mistakes: 0,
            tasks_to_complete: 10,
            max_mistakes: 3,
            phase: Phase::Active,
        }
    }
}

/// What a view needs to draw hearts, the progress bar and the end-of-level
/// dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub tasks_completed: u32,
    pub mistakes: u32,
    pub tasks_to_complete: u32,
    pub max_mistakes: u32,
    pub remaining_mistakes: u32,
    pub phase: Phase,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::GameKind;

    #[test]
    fn test_new_tracker_is_active() {
        let tracker = ProgressTracker::default();
        assert_eq!(tracker.phase(), Phase::Active);
        assert_eq!(tracker.tasks_completed(), 0);
        assert_eq!(tracker.remaining_mistakes(), 3);
        assert_eq!(tracker.progress(), 0.0);
    }

    #[test]
    fn test_zero_thresholds_rejected() {
        assert!(ProgressTracker::new(0, 3).is_err());
        assert!(ProgressTracker::new(10, 0).is_err());
    }

    #[test]
    fn test_mistakes_before_completion_fail_level() {
        let mut tracker = ProgressTracker::new(10, 3).unwrap();
        for _ in 0..9 {
            assert_eq!(tracker.correct(), None);
        }
        assert_eq!(tracker.incorrect(), None);
        assert_eq!(tracker.incorrect(), None);
        assert_eq!(tracker.incorrect(), Some(ProgressEvent::LevelFailed));
        assert_eq!(tracker.phase(), Phase::Failed);
        assert_eq!(tracker.tasks_completed(), 9);
        assert_eq!(tracker.remaining_mistakes(), 0);
    }

    #[test]
    fn test_reset_from_failed() {
        let mut tracker = ProgressTracker::new(10, 1).unwrap();
        tracker.correct();
        tracker.incorrect();
        assert_eq!(tracker.phase(), Phase::Failed);
        assert_eq!(tracker.reset(), ProgressEvent::LevelRestart);
        assert_eq!(tracker.phase(), Phase::Active);
        assert_eq!(tracker.tasks_completed(), 0);
        assert_eq!(tracker.mistakes(), 0);
    }

    #[test]
    fn test_level_complete_fires_once() {
        let mut tracker = ProgressTracker::new(2, 3).unwrap();
        assert_eq!(tracker.correct(), None);
        assert_eq!(tracker.correct(), Some(ProgressEvent::LevelComplete));
        assert_eq!(tracker.correct(), None);
        assert_eq!(tracker.tasks_completed(), 2);
        assert_eq!(tracker.progress(), 1.0);
    }

    #[test]
    fn test_terminal_phase_ignores_answers() {
        let mut tracker = ProgressTracker::new(1, 3).unwrap();
        tracker.correct();
        assert_eq!(tracker.incorrect(), None);
        assert_eq!(tracker.mistakes(), 0);
        assert_eq!(tracker.phase(), Phase::Succeeded);
    }

    #[test]
    fn test_advance_only_after_success() {
        let next = Some(LevelId::new(GameKind::Math, 1));
        let mut tracker = ProgressTracker::new(1, 1).unwrap();
        assert_eq!(tracker.advance(next), None);
        tracker.incorrect();
        assert_eq!(tracker.advance(next), None);
        assert_eq!(tracker.phase(), Phase::Failed);

        tracker.reset();
        tracker.correct();
        let exit = tracker.advance(next).unwrap();
        assert_eq!(exit.event, ProgressEvent::LevelRestart);
        assert_eq!(
            exit.navigation,
            Navigation::NextLevel(LevelId::new(GameKind::Math, 1))
        );
        assert_eq!(tracker.phase(), Phase::Active);
        assert_eq!(tracker.tasks_completed(), 0);
    }

    #[test]
    fn test_advance_past_last_level_goes_to_select() {
        let mut tracker = ProgressTracker::new(1, 1).unwrap();
        tracker.correct();
        let exit = tracker.advance(None).unwrap();
        assert_eq!(exit.navigation, Navigation::LevelSelect);
        assert_eq!(exit.event, ProgressEvent::LevelRestart);
        assert_eq!(tracker.advance(None), None);
    }

    #[test]
    fn test_snapshot_serializes_phase() {
        let mut tracker = ProgressTracker::new(3, 2).unwrap();
        tracker.correct();
        tracker.incorrect();
        let json = serde_json::to_value(tracker.snapshot()).unwrap();
        assert_eq!(json["tasks_completed"], 1);
        assert_eq!(json["remaining_mistakes"], 1);
        assert_eq!(json["phase"], "active");
    }
}
