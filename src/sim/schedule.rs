//! Deferred mode transitions
//!
//! A missed ball keeps flying for a short grace period before the game over
//! screen appears. The delay is stored as a deadline on the state and checked
//! at the start of each frame against the caller's clock, so it can be driven
//! by a virtual clock in tests.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameMode, SimulationState};

/// A mode change that takes effect once its deadline has passed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTransition {
    /// Clock time (ms) at which the transition applies
    pub due_at_ms: f64,
    pub target: GameMode,
}

impl ScheduledTransition {
    pub fn new(due_at_ms: f64, target: GameMode) -> Self {
        Self { due_at_ms, target }
    }

    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms >= self.due_at_ms
    }
}

/// Schedule `target` at `now_ms + delay_ms`.
///
/// If a transition is already pending the earlier deadline wins, so repeated
/// scheduling while the ball flies past collapses into one transition.
pub fn schedule(state: &mut SimulationState, target: GameMode, now_ms: f64, delay_ms: f64) {
    let due = now_ms + delay_ms;
    match &mut state.pending {
        Some(pending) if pending.target == target => {
            pending.due_at_ms = pending.due_at_ms.min(due);
        }
        slot => *slot = Some(ScheduledTransition::new(due, target)),
    }
}

/// Apply the pending transition if it is due.
///
/// Returns the resulting event when the mode actually changed. Applying again,
/// or applying when already in the target mode, does nothing.
pub fn apply_due(state: &mut SimulationState, now_ms: f64) -> Option<GameEvent> {
    let pending = state.pending?;
    if !pending.is_due(now_ms) {
        return None;
    }
    state.pending = None;

    if state.mode == pending.target {
        return None;
    }
    state.mode = pending.target;

    match pending.target {
        GameMode::GameOver => {
            log::info!("Game over with score {}", state.score);
            Some(GameEvent::GameOver { score: state.score })
        }
        GameMode::Playing => Some(GameEvent::GameStarted),
        GameMode::Menu => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn playing() -> SimulationState {
        let config = GameConfig::default();
        let mut state = SimulationState::new(&config);
        state.start_game(&config);
        state
    }

    #[test]
    fn test_not_applied_before_deadline() {
        let mut state = playing();
        schedule(&mut state, GameMode::GameOver, 1000.0, 250.0);
        assert_eq!(apply_due(&mut state, 1249.0), None);
        assert_eq!(state.mode, GameMode::Playing);
        assert!(state.pending.is_some());
    }

    #[test]
    fn test_applied_at_deadline() {
        let mut state = playing();
        state.score = 4;
        schedule(&mut state, GameMode::GameOver, 1000.0, 250.0);
        assert_eq!(
            apply_due(&mut state, 1250.0),
            Some(GameEvent::GameOver { score: 4 })
        );
        assert_eq!(state.mode, GameMode::GameOver);
        assert!(state.pending.is_none());
    }

    #[test]
    fn test_repeated_schedule_keeps_earliest() {
        let mut state = playing();
        schedule(&mut state, GameMode::GameOver, 1000.0, 250.0);
        schedule(&mut state, GameMode::GameOver, 1016.0, 250.0);
        schedule(&mut state, GameMode::GameOver, 1033.0, 250.0);
        assert_eq!(state.pending.map(|p| p.due_at_ms), Some(1250.0));
    }

    #[test]
    fn test_apply_twice_transitions_once() {
        let mut state = playing();
        schedule(&mut state, GameMode::GameOver, 0.0, 250.0);
        let first = apply_due(&mut state, 300.0);
        let second = apply_due(&mut state, 300.0);
        assert!(matches!(first, Some(GameEvent::GameOver { .. })));
        assert_eq!(second, None);
        assert_eq!(state.mode, GameMode::GameOver);
    }

    #[test]
    fn test_duplicate_after_transition_is_harmless() {
        let mut state = playing();
        schedule(&mut state, GameMode::GameOver, 0.0, 250.0);
        apply_due(&mut state, 250.0);
        // A late duplicate for the mode we're already in is dropped
        schedule(&mut state, GameMode::GameOver, 260.0, 250.0);
        assert_eq!(apply_due(&mut state, 600.0), None);
        assert_eq!(state.mode, GameMode::GameOver);
        assert!(state.pending.is_none());
    }
}
