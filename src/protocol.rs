//! Wire DTOs for the training backend API (serde ready).
//! Keep this small and stable so the core and the backend can evolve
//! independently. The backend always answers with `success` plus either a
//! payload or an `error` string; non-2xx bodies carry `{ "error": ... }`.

use serde::{Deserialize, Serialize};

use crate::domain::Question;

/// Per-category score report from `/analyze/video`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ScoreReport {
    #[serde(default)]
    pub total_score: f64,
    #[serde(default)]
    pub arm_score: f64,
    #[serde(default)]
    pub body_score: f64,
    #[serde(default)]
    pub position_score: f64,
    #[serde(default)]
    pub stability_score: f64,
    #[serde(default)]
    pub feedback: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub score: Option<ScoreReport>,
    #[serde(default)]
    pub pose_image_base64: Option<String>,
    #[serde(default)]
    pub trajectory_plot_base64: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VisualizeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub vis_type: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionsResponse {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Fine-grained capability flags from the `/ai-coach/test` status probe.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct CoachStatus {
    #[serde(default)]
    pub openai_available: bool,
    #[serde(default)]
    pub client_initialized: bool,
    #[serde(default)]
    pub api_key_set: bool,
    #[serde(default)]
    pub base_url_set: bool,
}

#[derive(Debug, Deserialize)]
pub struct CoachTestResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: Option<CoachStatus>,
}

/// Error body shape shared by all endpoints on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
