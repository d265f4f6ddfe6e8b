//! Application state: the single mutable state object driving the UI.
//!
//! No ambient globals: `AppState` is a plain struct owned by the root
//! controller (`app::App`) and handed to subcontrollers by `&mut`. The crate
//! is single-threaded per the browser-style event-loop model, so no locking.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::BASE_MODULE;
use crate::domain::{AnswerRecord, ChatTurn, Position, Question, UserProfile};

/// What the presentation layer should show next. Controllers return view data
/// instead of rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Welcome,
    Onboarding(u8),
    Main,
}

/// One run of a tactics test, tracked start to finish.
///
/// `selected_answer` is per-question scratch state: set by selection, kept
/// through grading so the graded view still reflects the choice, cleared on
/// advance.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QuizSession {
    pub started: bool,
    /// Finalized and awaiting the user's acknowledgment; review is available.
    pub completed: bool,
    pub current_question: usize,
    pub questions: Vec<Question>,
    pub answers: Vec<AnswerRecord>,
    pub score: u32,
    pub current_module: Option<String>,
    pub selected_answer: Option<usize>,
}

impl QuizSession {
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current_question)
    }

    /// True once the current question's outcome has been recorded.
    pub fn current_graded(&self) -> bool {
        self.answers.len() > self.current_question
    }
}

#[derive(Debug)]
pub struct AppState {
    pub user: UserProfile,
    pub onboarding_step: u8,
    pub show_onboarding: bool,
    pub selected_position: Option<Position>,
    pub quiz: QuizSession,
    pub unlocked_tactics: BTreeSet<String>,
    pub chat: Vec<ChatTurn>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            user: UserProfile::default(),
            onboarding_step: 0,
            show_onboarding: true,
            selected_position: None,
            quiz: QuizSession::default(),
            unlocked_tactics: BTreeSet::from([BASE_MODULE.to_string()]),
            chat: Vec::new(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, module: &str) -> bool {
        self.unlocked_tactics.contains(module)
    }

    /// Monotonic insert; returns true if the module was newly unlocked.
    pub fn unlock(&mut self, module: &str) -> bool {
        self.unlocked_tactics.insert(module.to_string())
    }

    /// View data for the tactics tab: every catalog module paired with its
    /// lock state. Lock state comes from the unlock set only; the advisory
    /// star/level thresholds on the catalog are not consulted.
    pub fn tactics_overview(&self) -> Vec<(crate::catalog::TacticsModule, bool)> {
        crate::catalog::tactics_modules()
            .into_iter()
            .map(|module| {
                let locked = !self.is_unlocked(module.title);
                (module, locked)
            })
            .collect()
    }

    /// Full teardown on logout: fresh profile, empty session and transcript,
    /// onboarding restarted from step 0.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_shape() {
        let state = AppState::new();
        assert_eq!(state.user.stars, 0);
        assert_eq!(state.onboarding_step, 0);
        assert!(state.show_onboarding);
        assert!(state.selected_position.is_none());
        assert!(!state.quiz.started);
        assert!(state.chat.is_empty());
        assert!(state.is_unlocked(BASE_MODULE));
        assert_eq!(state.unlocked_tactics.len(), 1);
    }

    #[test]
    fn unlock_is_monotonic_and_idempotent() {
        let mut state = AppState::new();
        assert!(state.unlock("位置与职责"));
        assert!(!state.unlock("位置与职责"));
        assert_eq!(state.unlocked_tactics.len(), 2);
        assert!(!state.unlock(BASE_MODULE));
    }

    #[test]
    fn overview_reflects_unlock_set_not_thresholds() {
        let mut state = AppState::new();
        let overview = state.tactics_overview();
        assert_eq!(overview.len(), 6);
        for (module, locked) in &overview {
            assert_eq!(*locked, module.title != BASE_MODULE);
        }

        // Plenty of stars, yet threshold fields stay inert.
        state.user.apply_reward(100, 0);
        let still_locked = state
            .tactics_overview()
            .iter()
            .filter(|(_, locked)| *locked)
            .count();
        assert_eq!(still_locked, 5);

        state.unlock("位置与职责");
        let locked_after = state
            .tactics_overview()
            .iter()
            .filter(|(_, locked)| *locked)
            .count();
        assert_eq!(locked_after, 4);
    }

    #[test]
    fn reset_restores_default_shape() {
        let mut state = AppState::new();
        state.user.apply_reward(7, 120);
        state.unlock("位置与职责");
        state.show_onboarding = false;
        state.onboarding_step = 3;
        state.chat.push(crate::domain::ChatTurn {
            role: crate::domain::ChatRole::User,
            content: "轮转是什么？".into(),
        });

        state.reset();
        assert_eq!(state.user.stars, 0);
        assert!(state.show_onboarding);
        assert_eq!(state.onboarding_step, 0);
        assert!(state.chat.is_empty());
        assert_eq!(state.unlocked_tactics.len(), 1);
    }
}
