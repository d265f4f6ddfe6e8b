//! Tactics test lifecycle: question sampling, answer grading, scoring,
//! reward computation, and unlock propagation.
//!
//! A session runs over `min(5, pool)` questions sampled without replacement.
//! Grading appends exactly one record per question; the transient selection
//! survives grading (the graded view still shows the choice) and is cleared
//! on advance. Finalizing applies the reward tier and walks the unlock edge
//! for the session's module, then parks the session in a completed state
//! until the user acknowledges or resets.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{error, info, warn};

use crate::catalog;
use crate::client::RequestClient;
use crate::domain::{AnswerRecord, Question, RewardTier};
use crate::error::{ClientError, Result};
use crate::state::{AppState, QuizSession};

/// Questions drawn per session.
pub const QUESTIONS_PER_SESSION: usize = 5;

/// Result of advancing past a graded question.
#[derive(Debug)]
pub enum AdvanceOutcome {
    /// Moved to the question at this index; selection cleared.
    NextQuestion(usize),
    /// That was the last question; the session has been finalized.
    Finished(TestOutcome),
}

/// Summary handed to the results view after finalization.
#[derive(Clone, Debug)]
pub struct TestOutcome {
    pub module: String,
    pub correct: u32,
    pub total: usize,
    pub percentage: u32,
    pub tier: RewardTier,
    pub stars: u32,
    pub xp: u32,
    /// Module newly opened by this completion, if any.
    pub unlocked: Option<&'static str>,
}

/// One entry of the post-test review.
#[derive(Clone, Debug)]
pub struct ReviewItem {
    pub prompt: String,
    pub options: Vec<String>,
    pub selected_answer: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub explanation: String,
}

/// Start a fresh session for `module`. Fails closed: on a catalog fetch
/// error nothing is mutated and the error surfaces to the user. Any previous
/// in-flight session is discarded.
pub async fn start_session(
    state: &mut AppState,
    client: &RequestClient,
    module: &str,
) -> Result<()> {
    let pool = match client.tactics_questions().await {
        Ok(pool) => pool,
        Err(e) => {
            error!(target: "quiz", error = %e, "Question catalog fetch failed; no session created");
            return Err(e);
        }
    };
    begin_session(state, module, pool, &mut rand::thread_rng())
}

/// Session construction from an already-fetched pool. Sampling is
/// shuffle-then-take, unbiased and without replacement.
pub fn begin_session(
    state: &mut AppState,
    module: &str,
    pool: Vec<Question>,
    rng: &mut impl Rng,
) -> Result<()> {
    if pool.is_empty() {
        return Err(ClientError::Server("题库为空，请稍后重试".into()));
    }

    let questions = sample_questions(pool, QUESTIONS_PER_SESSION, rng);
    info!(target: "quiz", module, count = questions.len(), "Tactics test started");

    state.quiz = QuizSession {
        started: true,
        completed: false,
        current_question: 0,
        questions,
        answers: Vec::new(),
        score: 0,
        current_module: Some(module.to_string()),
        selected_answer: None,
    };
    Ok(())
}

fn sample_questions(mut pool: Vec<Question>, count: usize, rng: &mut impl Rng) -> Vec<Question> {
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

/// Record a transient answer choice for the current question. Re-selecting
/// overwrites; out-of-range input is rejected, not clamped.
pub fn select_answer(state: &mut AppState, index: usize) -> Result<()> {
    let session = active_session(state)?;
    if session.current_graded() {
        return state_error("selection after grading");
    }
    let Some(question) = session.current() else {
        return state_error("no current question");
    };
    if index >= question.options.len() {
        return state_error("answer index out of range");
    }
    state.quiz.selected_answer = Some(index);
    Ok(())
}

/// Grade the current question against the transient selection. The one and
/// only time this question's outcome is recorded; repeat calls are rejected.
/// The selection is left in place so the graded view can show it.
pub fn grade_current_answer(state: &mut AppState) -> Result<AnswerRecord> {
    let session = active_session(state)?;
    if session.current_graded() {
        return state_error("question already graded");
    }
    let Some(selected) = session.selected_answer else {
        return state_error("grading without a selection");
    };
    let Some(question) = session.current() else {
        return state_error("no current question");
    };

    let record = AnswerRecord {
        question_id: question.id,
        selected_answer: selected,
        is_correct: selected == question.correct_answer,
    };
    if record.is_correct {
        state.quiz.score += 1;
    }
    state.quiz.answers.push(record.clone());
    info!(target: "quiz", question_id = record.question_id, correct = record.is_correct, score = state.quiz.score, "Answer graded");
    Ok(record)
}

/// Move to the next question, or finalize after the last one. Requires the
/// current question to have been graded.
pub fn advance(state: &mut AppState) -> Result<AdvanceOutcome> {
    let session = active_session(state)?;
    if !session.current_graded() {
        return state_error("advance before grading");
    }

    if state.quiz.current_question + 1 < state.quiz.questions.len() {
        state.quiz.current_question += 1;
        state.quiz.selected_answer = None;
        Ok(AdvanceOutcome::NextQuestion(state.quiz.current_question))
    } else {
        Ok(AdvanceOutcome::Finished(finalize_session(state)?))
    }
}

/// Compute the reward tier, apply stars/xp, propagate the unlock edge, and
/// park the session in the completed/awaiting-acknowledgment state.
pub fn finalize_session(state: &mut AppState) -> Result<TestOutcome> {
    let session = active_session(state)?;
    let total = session.questions.len();
    if total == 0 {
        return state_error("finalize with no questions");
    }

    let correct = state.quiz.score;
    let percentage = ((correct as f64 / total as f64) * 100.0).round() as u32;
    let tier = RewardTier::from_percentage(percentage);

    state.user.apply_reward(tier.stars(), tier.xp());

    let module = state
        .quiz
        .current_module
        .clone()
        .unwrap_or_else(|| catalog::BASE_MODULE.to_string());
    let unlocked = catalog::unlock_after(&module).filter(|next| state.unlock(next));

    state.quiz.completed = true;

    info!(
        target: "quiz",
        module = %module,
        correct,
        total,
        percentage,
        tier = tier.label(),
        unlocked = ?unlocked,
        "Tactics test finalized"
    );

    Ok(TestOutcome {
        module,
        correct,
        total,
        percentage,
        tier,
        stars: tier.stars(),
        xp: tier.xp(),
        unlocked,
    })
}

/// Full review of a completed session: every question, chosen vs correct
/// answer, and the explanation.
pub fn review(state: &AppState) -> Result<Vec<ReviewItem>> {
    if !state.quiz.completed {
        return state_error("review before completion");
    }
    Ok(state
        .quiz
        .questions
        .iter()
        .zip(state.quiz.answers.iter())
        .map(|(q, a)| ReviewItem {
            prompt: q.prompt.clone(),
            options: q.options.clone(),
            selected_answer: a.selected_answer,
            correct_answer: q.correct_answer,
            is_correct: a.is_correct,
            explanation: q.explanation.clone(),
        })
        .collect())
}

/// Drop the session back to the default empty shape. Safe at any point:
/// abandonment mid-test or acknowledgment after finalize.
pub fn reset(state: &mut AppState) {
    state.quiz = QuizSession::default();
}

fn active_session(state: &AppState) -> Result<&QuizSession> {
    if state.quiz.started {
        Ok(&state.quiz)
    } else {
        warn!(target: "quiz", "Operation invoked without an active session");
        Err(ClientError::State("no active quiz session".into()))
    }
}

fn state_error<T>(what: &str) -> Result<T> {
    warn!(target: "quiz", what, "Rejected quiz operation");
    Err(ClientError::State(what.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: u32, correct: usize) -> Question {
        Question {
            id,
            prompt: format!("问题 {}", id),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct,
            explanation: format!("解析 {}", id),
            difficulty: "初级".into(),
            category: "轮转".into(),
        }
    }

    fn pool(n: u32) -> Vec<Question> {
        (1..=n).map(|id| question(id, (id % 4) as usize)).collect()
    }

    fn started(module: &str, n: u32) -> AppState {
        let mut state = AppState::new();
        let mut rng = StdRng::seed_from_u64(42);
        begin_session(&mut state, module, pool(n), &mut rng).unwrap();
        state
    }

    /// Answer every remaining question; `correctly` controls the choice.
    fn answer_all(state: &mut AppState, correctly: bool) -> Option<TestOutcome> {
        loop {
            let q = state.quiz.current().unwrap().clone();
            let pick = if correctly {
                q.correct_answer
            } else {
                (q.correct_answer + 1) % q.options.len()
            };
            select_answer(state, pick).unwrap();
            grade_current_answer(state).unwrap();
            match advance(state).unwrap() {
                AdvanceOutcome::NextQuestion(_) => continue,
                AdvanceOutcome::Finished(outcome) => return Some(outcome),
            }
        }
    }

    #[test]
    fn samples_five_distinct_questions_from_large_pool() {
        let state = started(catalog::BASE_MODULE, 8);
        assert_eq!(state.quiz.questions.len(), 5);
        let mut ids: Vec<_> = state.quiz.questions.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert_eq!(state.quiz.score, 0);
        assert!(state.quiz.started);
    }

    #[test]
    fn small_pool_yields_whole_pool() {
        let state = started(catalog::BASE_MODULE, 3);
        assert_eq!(state.quiz.questions.len(), 3);
    }

    #[test]
    fn empty_pool_fails_closed() {
        let mut state = AppState::new();
        let mut rng = StdRng::seed_from_u64(1);
        let err = begin_session(&mut state, catalog::BASE_MODULE, vec![], &mut rng).unwrap_err();
        assert!(matches!(err, ClientError::Server(_)));
        assert!(!state.quiz.started);
    }

    #[test]
    fn new_session_discards_previous_one() {
        let mut state = started(catalog::BASE_MODULE, 8);
        select_answer(&mut state, 0).unwrap();
        grade_current_answer(&mut state).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        begin_session(&mut state, "位置与职责", pool(6), &mut rng).unwrap();
        assert_eq!(state.quiz.answers.len(), 0);
        assert_eq!(state.quiz.score, 0);
        assert_eq!(state.quiz.current_module.as_deref(), Some("位置与职责"));
    }

    #[test]
    fn out_of_range_selection_is_rejected_not_clamped() {
        let mut state = started(catalog::BASE_MODULE, 8);
        let err = select_answer(&mut state, 4).unwrap_err();
        assert!(matches!(err, ClientError::State(_)));
        assert_eq!(state.quiz.selected_answer, None);

        select_answer(&mut state, 3).unwrap();
        assert_eq!(state.quiz.selected_answer, Some(3));
    }

    #[test]
    fn reselection_overwrites_transient_choice() {
        let mut state = started(catalog::BASE_MODULE, 8);
        select_answer(&mut state, 0).unwrap();
        select_answer(&mut state, 2).unwrap();
        assert_eq!(state.quiz.selected_answer, Some(2));
        assert!(state.quiz.answers.is_empty());
    }

    #[test]
    fn grading_is_not_repeatable() {
        let mut state = started(catalog::BASE_MODULE, 8);
        let correct = state.quiz.current().unwrap().correct_answer;
        select_answer(&mut state, correct).unwrap();
        grade_current_answer(&mut state).unwrap();
        assert_eq!(state.quiz.answers.len(), 1);
        assert_eq!(state.quiz.score, 1);

        let err = grade_current_answer(&mut state).unwrap_err();
        assert!(matches!(err, ClientError::State(_)));
        assert_eq!(state.quiz.answers.len(), 1);
        assert_eq!(state.quiz.score, 1);
    }

    #[test]
    fn grading_requires_a_selection() {
        let mut state = started(catalog::BASE_MODULE, 8);
        assert!(matches!(
            grade_current_answer(&mut state),
            Err(ClientError::State(_))
        ));
        assert!(state.quiz.answers.is_empty());
    }

    #[test]
    fn selection_survives_grading_and_clears_on_advance() {
        let mut state = started(catalog::BASE_MODULE, 8);
        select_answer(&mut state, 1).unwrap();
        grade_current_answer(&mut state).unwrap();
        assert_eq!(state.quiz.selected_answer, Some(1));

        advance(&mut state).unwrap();
        assert_eq!(state.quiz.selected_answer, None);
        assert_eq!(state.quiz.current_question, 1);
    }

    #[test]
    fn operations_without_session_are_rejected() {
        let mut state = AppState::new();
        assert!(matches!(
            select_answer(&mut state, 0),
            Err(ClientError::State(_))
        ));
        assert!(matches!(
            grade_current_answer(&mut state),
            Err(ClientError::State(_))
        ));
        assert!(matches!(advance(&mut state), Err(ClientError::State(_))));
        assert!(!state.quiz.started);
    }

    #[test]
    fn perfect_run_rewards_three_stars_and_unlocks_dependent_module() {
        let mut state = started(catalog::BASE_MODULE, 8);
        let stars_before = state.user.stars;
        let xp_before = state.user.xp;

        let outcome = answer_all(&mut state, true).unwrap();
        assert_eq!(outcome.correct, 5);
        assert_eq!(outcome.percentage, 100);
        assert_eq!(outcome.tier, RewardTier::Excellent);
        assert_eq!(outcome.stars, 3);
        assert_eq!(outcome.xp, 50);
        assert_eq!(outcome.unlocked, Some("位置与职责"));

        assert_eq!(state.user.stars, stars_before + 3);
        assert_eq!(state.user.xp, xp_before + 50);
        assert!(state.is_unlocked("位置与职责"));
        assert!(state.quiz.completed);
    }

    #[test]
    fn failing_run_still_rewards_one_star() {
        let mut state = started(catalog::BASE_MODULE, 8);
        let outcome = answer_all(&mut state, false).unwrap();
        assert_eq!(outcome.correct, 0);
        assert_eq!(outcome.tier, RewardTier::Beginner);
        assert_eq!(state.user.stars, 1);
        assert_eq!(state.user.xp, 25);
    }

    #[test]
    fn tier_boundaries_at_four_and_three_of_five() {
        // 4/5 = 80% -> excellent; 3/5 = 60% -> good.
        for (correct_count, tier) in [(4u32, RewardTier::Excellent), (3, RewardTier::Good)] {
            let mut state = started(catalog::BASE_MODULE, 8);
            for i in 0..5 {
                let q = state.quiz.current().unwrap().clone();
                let pick = if (i as u32) < correct_count {
                    q.correct_answer
                } else {
                    (q.correct_answer + 1) % q.options.len()
                };
                select_answer(&mut state, pick).unwrap();
                grade_current_answer(&mut state).unwrap();
                if i < 4 {
                    advance(&mut state).unwrap();
                }
            }
            match advance(&mut state).unwrap() {
                AdvanceOutcome::Finished(outcome) => assert_eq!(outcome.tier, tier),
                other => panic!("expected finalize, got {:?}", other),
            }
        }
    }

    #[test]
    fn completing_unwired_module_unlocks_nothing() {
        let mut state = started("位置与职责", 8);
        state.unlock("位置与职责");
        let unlocked_before = state.unlocked_tactics.len();

        let outcome = answer_all(&mut state, true).unwrap();
        assert_eq!(outcome.unlocked, None);
        assert_eq!(state.unlocked_tactics.len(), unlocked_before);
    }

    #[test]
    fn repeat_completion_reports_no_new_unlock() {
        let mut state = started(catalog::BASE_MODULE, 8);
        state.unlock("位置与职责");
        let outcome = answer_all(&mut state, true).unwrap();
        assert_eq!(outcome.unlocked, None);
    }

    #[test]
    fn review_matches_graded_answers() {
        let mut state = started(catalog::BASE_MODULE, 8);
        assert!(matches!(review(&state), Err(ClientError::State(_))));

        answer_all(&mut state, false);
        let items = review(&state).unwrap();
        assert_eq!(items.len(), 5);
        for item in &items {
            assert!(!item.is_correct);
            assert_ne!(item.selected_answer, item.correct_answer);
            assert!(!item.explanation.is_empty());
        }
    }

    #[test]
    fn reset_is_always_safe() {
        let mut state = AppState::new();
        reset(&mut state);
        assert!(!state.quiz.started);

        let mut state = started(catalog::BASE_MODULE, 8);
        select_answer(&mut state, 0).unwrap();
        reset(&mut state);
        assert!(!state.quiz.started);
        assert!(state.quiz.questions.is_empty());
        assert_eq!(state.quiz.selected_answer, None);
    }
}
