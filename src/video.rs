//! Video job submission: upload validation, analysis, and visualization.
//!
//! Validation runs entirely client-side and is terminal for the attempt; a
//! rejected file never reaches the network. Submission delegates to the
//! request client with the operation's deadline class and shapes the decoded
//! JSON into typed reports. Cancellation is the deadline-triggered abort; a
//! user-initiated cancel maps to the same dropped-future path.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{info, instrument, warn};

use crate::client::{AnalysisMode, RequestClient, VideoPayload, VisType};
use crate::error::{ClientError, Result};
use crate::protocol::ScoreReport;

/// Upload cap, matching the backend's limit.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

const ALLOWED_MEDIA_TYPES: [&str; 4] = [
    "video/mp4",
    "video/avi",
    "video/quicktime",
    "video/x-matroska",
];

/// Structured outcome of a pose analysis.
#[derive(Clone, Debug)]
pub struct AnalysisReport {
    pub score: ScoreReport,
    /// Display tier derived from the total score (初级/中级/高级).
    pub tier: &'static str,
    pub pose_image: Option<Vec<u8>>,
    pub trajectory_plot: Option<Vec<u8>>,
}

/// Descriptor for a rendered visualization video.
#[derive(Clone, Debug)]
pub struct VisualizationResult {
    pub vis_type: String,
    pub video_url: String,
    pub filename: String,
}

/// Client-side upload gate: size cap first, then declared media type. Both
/// failures are terminal for this attempt.
pub fn validate_upload(payload: &VideoPayload) -> Result<()> {
    if payload.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ClientError::Validation(
            "文件太大！请上传小于50MB的视频。".into(),
        ));
    }
    if !ALLOWED_MEDIA_TYPES.contains(&payload.media_type.as_str()) {
        return Err(ClientError::Validation(
            "不支持的文件格式！请上传MP4、AVI或MOV格式的视频。".into(),
        ));
    }
    Ok(())
}

/// Display tier for a total analysis score.
pub fn skill_tier(total_score: f64) -> &'static str {
    if total_score >= 85.0 {
        "高级"
    } else if total_score >= 70.0 {
        "中级"
    } else {
        "初级"
    }
}

/// Validate and submit a video for analysis (short deadline class).
#[instrument(level = "info", skip(client, payload), fields(filename = %payload.filename, mode = mode.as_str()))]
pub async fn submit_analysis(
    client: &RequestClient,
    payload: &VideoPayload,
    mode: AnalysisMode,
) -> Result<AnalysisReport> {
    validate_upload(payload)?;

    let res = client.analyze_video(payload, mode).await?;
    if !res.success {
        return Err(ClientError::Server(
            res.error.unwrap_or_else(|| "分析失败".into()),
        ));
    }

    let score = res.score.unwrap_or_default();
    let report = AnalysisReport {
        tier: skill_tier(score.total_score),
        pose_image: res.pose_image_base64.as_deref().and_then(decode_image),
        trajectory_plot: res.trajectory_plot_base64.as_deref().and_then(decode_image),
        score,
    };
    info!(
        target: "volley_trainer",
        total = report.score.total_score,
        tier = report.tier,
        has_pose_image = report.pose_image.is_some(),
        has_trajectory = report.trajectory_plot.is_some(),
        "Analysis report ready"
    );
    Ok(report)
}

/// Validate and submit a video for visualization rendering (long deadline
/// class).
#[instrument(level = "info", skip(client, payload), fields(filename = %payload.filename, vis_type = vis_type.as_str()))]
pub async fn submit_visualization(
    client: &RequestClient,
    payload: &VideoPayload,
    vis_type: VisType,
) -> Result<VisualizationResult> {
    validate_upload(payload)?;

    let res = client.visualize_video(payload, vis_type).await?;
    if !res.success {
        return Err(ClientError::Server(
            res.error.unwrap_or_else(|| "生成失败".into()),
        ));
    }

    let result = VisualizationResult {
        vis_type: res
            .vis_type
            .unwrap_or_else(|| vis_type.as_str().to_string()),
        video_url: res.video_url.unwrap_or_default(),
        filename: res.filename.unwrap_or_default(),
    };
    info!(target: "volley_trainer", vis_type = %result.vis_type, filename = %result.filename, "Visualization ready");
    Ok(result)
}

fn decode_image(b64: &str) -> Option<Vec<u8>> {
    match BASE64.decode(b64) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(target: "volley_trainer", error = %e, "Dropping undecodable base64 image payload");
            None
        }
    }
}
