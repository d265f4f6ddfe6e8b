//! The first-run onboarding wizard.
//!
//! Four steps: welcome/feature intro (0), core feature detail (1), position
//! selection (2), progression preview (3). Step 2 gates forward movement on a
//! selected position; step 3 is terminal and completes instead of advancing.
//! Completion persists a flag so the wizard is skipped on the next start.

use tracing::{info, warn};

use crate::domain::Position;
use crate::state::{AppState, View};
use crate::storage::Storage;

pub const ONBOARDING_COMPLETED_KEY: &str = "onboarding_completed";

/// Position-selection step; cannot be advanced past without a selection.
pub const POSITION_STEP: u8 = 2;
pub const LAST_STEP: u8 = 3;

/// Startup rule: an existing completion flag goes straight to the main view,
/// otherwise the welcome screen precedes step 0.
pub fn initial_view(state: &mut AppState, storage: &Storage) -> View {
    if storage.get(ONBOARDING_COMPLETED_KEY).is_some() {
        state.show_onboarding = false;
        View::Main
    } else {
        state.show_onboarding = true;
        state.onboarding_step = 0;
        View::Welcome
    }
}

/// Enter the wizard from the welcome screen.
pub fn begin(state: &mut AppState) -> View {
    state.onboarding_step = 0;
    View::Onboarding(0)
}

/// Move one step forward. At the position step this is a no-op until a
/// position is selected; at the last step it completes the wizard.
pub fn advance(state: &mut AppState, storage: &mut Storage) -> View {
    let step = state.onboarding_step;
    if step == POSITION_STEP && state.selected_position.is_none() {
        warn!(target: "volley_trainer", step, "Onboarding advance blocked: no position selected");
        return View::Onboarding(step);
    }
    if step >= LAST_STEP {
        return complete(state, storage);
    }
    state.onboarding_step = step + 1;
    View::Onboarding(state.onboarding_step)
}

/// Move one step back; a no-op at step 0.
pub fn retreat(state: &mut AppState) -> View {
    if state.onboarding_step > 0 {
        state.onboarding_step -= 1;
    }
    View::Onboarding(state.onboarding_step)
}

/// Skip the wizard. Requires an explicit confirmation; unconfirmed skips
/// leave the current step untouched.
pub fn skip(state: &mut AppState, storage: &mut Storage, confirmed: bool) -> View {
    if confirmed {
        complete(state, storage)
    } else {
        View::Onboarding(state.onboarding_step)
    }
}

/// Persist the completion flag and hand over to the main view.
pub fn complete(state: &mut AppState, storage: &mut Storage) -> View {
    storage.set(ONBOARDING_COMPLETED_KEY, "true");
    state.show_onboarding = false;
    info!(target: "volley_trainer", "Onboarding completed");
    View::Main
}

/// Select (or re-select) a position. Valid at any step; never advances the
/// wizard by itself. Idempotent beyond the re-render signal.
pub fn select_position(state: &mut AppState, position: Position) -> View {
    state.selected_position = Some(position);
    state.user.main_position = position;
    info!(target: "volley_trainer", position = position.id(), "Position selected");
    if state.show_onboarding {
        View::Onboarding(state.onboarding_step)
    } else {
        View::Main
    }
}
