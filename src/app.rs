//! Root controller: owns the application state, the backend client, and the
//! key-value store, and wires the startup/teardown flows. Subcontrollers
//! (onboarding, quiz, coach, video) receive the state by `&mut` from here —
//! there is no ambient global.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::client::RequestClient;
use crate::config::AppConfig;
use crate::error::Result;
use crate::onboarding;
use crate::state::{AppState, View};
use crate::storage::Storage;

pub struct App {
    pub state: AppState,
    pub client: RequestClient,
    pub storage: Storage,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = RequestClient::new(&config.api_base_url)?;
        let storage = match &config.storage_path {
            Some(path) => Storage::open(PathBuf::from(path)),
            None => Storage::in_memory(),
        };
        Ok(Self {
            state: AppState::new(),
            client,
            storage,
        })
    }

    /// Startup sequence: liveness probe (logged, never fatal), then route to
    /// the main view or the welcome screen based on the persisted flag.
    #[instrument(level = "info", skip(self))]
    pub async fn bootstrap(&mut self) -> View {
        match self.client.health().await {
            Ok(status) => info!(target: "volley_trainer", %status, "Backend health probe ok"),
            Err(e) => warn!(target: "volley_trainer", error = %e, "Backend health probe failed; continuing offline"),
        }
        onboarding::initial_view(&mut self.state, &self.storage)
    }

    /// Confirmation-gated logout: clears persisted flags, resets the whole
    /// state, and restarts onboarding from step 0.
    pub fn logout(&mut self, confirmed: bool) -> View {
        if !confirmed {
            return View::Main;
        }
        self.storage.clear();
        self.state.reset();
        info!(target: "volley_trainer", "Logged out; onboarding restarted");
        View::Welcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BASE_MODULE;
    use crate::onboarding::ONBOARDING_COMPLETED_KEY;

    fn app() -> App {
        // Port 1 refuses connections immediately; the probe must not be fatal.
        App::new(&AppConfig {
            api_base_url: "http://127.0.0.1:1/api".into(),
            storage_path: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn bootstrap_survives_unreachable_backend() {
        let mut app = app();
        assert_eq!(app.bootstrap().await, View::Welcome);
        assert!(app.state.show_onboarding);
    }

    #[tokio::test]
    async fn bootstrap_skips_onboarding_when_flag_present() {
        let mut app = app();
        app.storage.set(ONBOARDING_COMPLETED_KEY, "true");
        assert_eq!(app.bootstrap().await, View::Main);
        assert!(!app.state.show_onboarding);
    }

    #[test]
    fn logout_requires_confirmation() {
        let mut app = app();
        app.storage.set(ONBOARDING_COMPLETED_KEY, "true");
        app.state.show_onboarding = false;
        app.state.user.apply_reward(5, 80);

        assert_eq!(app.logout(false), View::Main);
        assert_eq!(app.state.user.stars, 5);
        assert_eq!(app.storage.get(ONBOARDING_COMPLETED_KEY), Some("true"));
    }

    #[test]
    fn confirmed_logout_clears_everything() {
        let mut app = app();
        app.storage.set(ONBOARDING_COMPLETED_KEY, "true");
        app.state.show_onboarding = false;
        app.state.onboarding_step = 3;
        app.state.user.apply_reward(5, 80);
        app.state.unlock("位置与职责");

        assert_eq!(app.logout(true), View::Welcome);
        assert_eq!(app.storage.get(ONBOARDING_COMPLETED_KEY), None);
        assert!(app.state.show_onboarding);
        assert_eq!(app.state.onboarding_step, 0);
        assert_eq!(app.state.user.stars, 0);
        assert_eq!(app.state.unlocked_tactics.len(), 1);
        assert!(app.state.is_unlocked(BASE_MODULE));
    }
}
