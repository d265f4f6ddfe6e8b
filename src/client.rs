//! HTTP client for the training backend.
//!
//! Wraps every outbound call with error classification (timeout / server /
//! network) and normalizes responses. Plain JSON endpoints ride on the
//! transport defaults; the two video endpoints attach explicit deadlines
//! (2 min analysis, 5 min visualization). A deadline expiry drops the
//! in-flight future, so a late response can never reach state.
//!
//! The client does no schema validation beyond decoding the documented DTOs;
//! semantic checks belong to the callers.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::error::{ClientError, Result};
use crate::protocol::{
    AnalyzeResponse, AskRequest, AskResponse, CoachTestResponse, ErrorBody, QuestionsResponse,
    VisualizeResponse,
};

/// Deadline for single/sequence frame analysis.
pub const ANALYZE_DEADLINE: Duration = Duration::from_millis(120_000);
/// Deadline for visualization-video generation.
pub const VISUALIZE_DEADLINE: Duration = Duration::from_millis(300_000);

/// Analysis mode for `/analyze/video`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisMode {
    Single,
    Sequence,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Single => "single",
            AnalysisMode::Sequence => "sequence",
        }
    }

    fn timeout_message(&self) -> String {
        let kind = match self {
            AnalysisMode::Sequence => "连续帧分析",
            AnalysisMode::Single => "单帧分析",
        };
        format!("请求超时。{}时间过长，请尝试使用更短的视频。", kind)
    }
}

/// Visualization flavor for `/visualize/video`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisType {
    Overlay,
    Skeleton,
    Comparison,
    Trajectory,
}

impl VisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisType::Overlay => "overlay",
            VisType::Skeleton => "skeleton",
            VisType::Comparison => "comparison",
            VisType::Trajectory => "trajectory",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VisType::Overlay => "骨架叠加",
            VisType::Skeleton => "纯骨架动画",
            VisType::Comparison => "对比视频",
            VisType::Trajectory => "轨迹追踪",
        }
    }
}

const VISUALIZE_TIMEOUT_MESSAGE: &str = "请求超时（超过5分钟）。请尝试使用更短的视频。";

/// A video payload ready for multipart upload.
#[derive(Clone, Debug)]
pub struct VideoPayload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub media_type: String,
}

#[derive(Clone, Debug)]
pub struct RequestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RequestClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("volley-trainer/0.1")
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a prepared request and normalize the outcome: transport failures
    /// become `Network`, non-2xx become `Server` with the parsed error body
    /// (or `HTTP <status>`), success passes through as decoded JSON.
    async fn execute<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T> {
        let res = req
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ClientError::Server(extract_error_message(
                status.as_u16(),
                &body,
            )));
        }

        res.json::<T>()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))
    }

    /// Startup liveness probe. Callers log failures; they are not fatal.
    #[instrument(level = "info", skip(self))]
    pub async fn health(&self) -> Result<Value> {
        self.execute(self.http.get(self.url("health"))).await
    }

    /// Fetch the full tactics question catalog.
    #[instrument(level = "info", skip(self))]
    pub async fn tactics_questions(&self) -> Result<Vec<crate::domain::Question>> {
        let res: QuestionsResponse = self.execute(self.http.get(self.url("tactics/questions"))).await?;
        if let Some(err) = res.error {
            return Err(ClientError::Server(err));
        }
        info!(target: "quiz", pool = res.questions.len(), "Question catalog fetched");
        Ok(res.questions)
    }

    /// One AI-coach question/answer round trip.
    #[instrument(level = "info", skip(self, question), fields(question_len = question.len()))]
    pub async fn ask_coach(&self, question: &str) -> Result<String> {
        let body = AskRequest {
            question: question.to_string(),
        };
        let res: AskResponse = self
            .execute(self.http.post(self.url("ai-coach/ask")).json(&body))
            .await?;
        if res.success {
            Ok(res.answer.unwrap_or_default())
        } else {
            Err(ClientError::Server(
                res.error.unwrap_or_else(|| "AI服务返回了未知错误".into()),
            ))
        }
    }

    /// Status probe used for diagnostic escalation after a 503-style failure.
    #[instrument(level = "info", skip(self))]
    pub async fn coach_test(&self) -> Result<CoachTestResponse> {
        self.execute(self.http.get(self.url("ai-coach/test"))).await
    }

    /// Upload a video for pose analysis. Short deadline class.
    #[instrument(level = "info", skip(self, payload), fields(filename = %payload.filename, size = payload.bytes.len(), mode = mode.as_str()))]
    pub async fn analyze_video(
        &self,
        payload: &VideoPayload,
        mode: AnalysisMode,
    ) -> Result<AnalyzeResponse> {
        let form = video_form(payload)?.text("mode", mode.as_str());
        let req = self.http.post(self.url("analyze/video")).multipart(form);

        let start = std::time::Instant::now();
        let result = with_deadline(
            self.execute::<AnalyzeResponse>(req),
            ANALYZE_DEADLINE,
            mode.timeout_message(),
        )
        .await;
        log_round_trip("analyze/video", start.elapsed(), &result);
        result
    }

    /// Upload a video for visualization rendering. Long deadline class.
    #[instrument(level = "info", skip(self, payload), fields(filename = %payload.filename, size = payload.bytes.len(), vis_type = vis_type.as_str()))]
    pub async fn visualize_video(
        &self,
        payload: &VideoPayload,
        vis_type: VisType,
    ) -> Result<VisualizeResponse> {
        let form = video_form(payload)?.text("vis_type", vis_type.as_str());
        let req = self.http.post(self.url("visualize/video")).multipart(form);

        let start = std::time::Instant::now();
        let result = with_deadline(
            self.execute::<VisualizeResponse>(req),
            VISUALIZE_DEADLINE,
            VISUALIZE_TIMEOUT_MESSAGE.to_string(),
        )
        .await;
        log_round_trip("visualize/video", start.elapsed(), &result);
        result
    }
}

fn video_form(payload: &VideoPayload) -> Result<Form> {
    let part = Part::bytes(payload.bytes.clone())
        .file_name(payload.filename.clone())
        .mime_str(&payload.media_type)
        .map_err(|e| ClientError::Validation(format!("无效的媒体类型: {}", e)))?;
    Ok(Form::new().part("video", part))
}

/// Race a call against its deadline. On expiry the inner future is dropped,
/// aborting the transfer and suppressing any late resolution.
async fn with_deadline<F, T>(fut: F, deadline: Duration, timeout_message: String) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(res) => res,
        Err(_) => {
            warn!(target: "volley_trainer", deadline_ms = deadline.as_millis() as u64, "Request deadline expired; call aborted");
            Err(ClientError::Timeout(timeout_message))
        }
    }
}

/// Try the JSON error body first; fall back to a generic HTTP message.
fn extract_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(b) => b.error,
        Err(_) => format!("HTTP {}", status),
    }
}

fn log_round_trip<T>(endpoint: &str, elapsed: Duration, result: &Result<T>) {
    match result {
        Ok(_) => info!(target: "volley_trainer", endpoint, ?elapsed, "Backend round trip completed"),
        Err(e) => error!(target: "volley_trainer", endpoint, ?elapsed, error = %e, "Backend round trip failed"),
    }
}
