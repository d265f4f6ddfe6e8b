//! Headless entry point: runs the startup sequence (telemetry, config,
//! liveness probe, persisted-flag routing) and reports the resolved view.
//!
//! Important env variables:
//!   TRAINER_CONFIG_PATH : path to TOML config (backend URL, storage path)
//!   API_BASE_URL        : backend base URL override (default
//!                         "http://127.0.0.1:5000/api")
//!   STORAGE_PATH        : key-value store file (memory-only if unset)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

use tracing::info;

use volley_trainer::app::App;
use volley_trainer::config::AppConfig;
use volley_trainer::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let config = AppConfig::from_env();
    let mut app = App::new(&config)?;

    let view = app.bootstrap().await;
    info!(
        target: "volley_trainer",
        ?view,
        user = %app.state.user.username,
        rank = app.state.user.rank().label(),
        unlocked = app.state.unlocked_tactics.len(),
        "Trainer core ready"
    );
    Ok(())
}
