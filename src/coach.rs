//! AI-coach dialog: a chat-style request/response loop with an append-only
//! transcript.
//!
//! Appends are two-phase so both phases are observable: the user turn goes in
//! provisionally before the round trip, and the assistant turn finalizes it
//! with either the answer or a failure notice. Failures stay in the
//! transcript as assistant turns so the conversational context is preserved.
//! Callers must serialize `ask` calls (disable input while one is
//! outstanding); concurrent interleaving is not supported.

use tracing::{info, instrument, warn};

use crate::client::RequestClient;
use crate::domain::{ChatRole, ChatTurn};
use crate::error::{ClientError, Result};
use crate::protocol::CoachStatus;
use crate::state::AppState;

/// Reject empty questions locally; no turn is appended and no call is made.
pub fn validate_question(question: &str) -> Result<&str> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation("请输入问题".into()));
    }
    Ok(trimmed)
}

/// Phase one: provisional user turn, appended before the round trip.
pub fn push_user_turn(state: &mut AppState, question: &str) {
    state.chat.push(ChatTurn {
        role: ChatRole::User,
        content: question.to_string(),
    });
}

/// Phase two: finalize with the assistant turn. A failure is recorded as an
/// apologetic assistant turn carrying the error detail. Returns the content
/// that was appended.
pub fn record_reply(state: &mut AppState, reply: std::result::Result<String, String>) -> String {
    let content = match reply {
        Ok(answer) => answer,
        Err(detail) => format!("抱歉，暂时无法回答您的问题：{}", detail),
    };
    state.chat.push(ChatTurn {
        role: ChatRole::Assistant,
        content: content.clone(),
    });
    content
}

/// One full question/answer turn. On success the answer text is returned and
/// appended; on failure the (possibly diagnosed) error detail is embedded in
/// the transcript and returned as the error message.
#[instrument(level = "info", skip(state, client, question), fields(question_len = question.len(), turns = state.chat.len()))]
pub async fn ask(state: &mut AppState, client: &RequestClient, question: &str) -> Result<String> {
    let question = validate_question(question)?.to_string();

    push_user_turn(state, &question);

    match client.ask_coach(&question).await {
        Ok(answer) => {
            record_reply(state, Ok(answer.clone()));
            info!(target: "coach", answer_len = answer.len(), "Coach answered");
            Ok(answer)
        }
        Err(e) => {
            let detail = if is_service_unavailable(&e) {
                diagnose(client, e.user_message()).await
            } else {
                e.user_message()
            };
            warn!(target: "coach", error = %detail, "Coach request failed; recorded in transcript");
            record_reply(state, Err(detail.clone()));
            Err(substitute_message(e, detail))
        }
    }
}

/// The failure signature that warrants a secondary diagnostic probe.
fn is_service_unavailable(err: &ClientError) -> bool {
    let msg = err.user_message();
    msg.contains("503") || msg.contains("暂不可用")
}

/// Ask the status probe for capability flags and substitute a fine-grained
/// remediation message when one applies. Probe failures fall back to the
/// original error text.
async fn diagnose(client: &RequestClient, fallback: String) -> String {
    match client.coach_test().await {
        Ok(res) if res.success => match res.status.and_then(remediation_for) {
            Some(specific) => {
                info!(target: "coach", remediation = %specific, "Diagnostic probe produced a specific remediation");
                specific
            }
            None => fallback,
        },
        Ok(_) => fallback,
        Err(probe_err) => {
            warn!(target: "coach", error = %probe_err, "Diagnostic probe failed");
            fallback
        }
    }
}

/// First missing capability wins, mirroring how the flags depend on each
/// other (library -> client -> credentials -> endpoint).
fn remediation_for(status: CoachStatus) -> Option<String> {
    if !status.openai_available {
        Some("OpenAI库未安装。请在后端服务环境安装 openai>=1.0.0".into())
    } else if !status.client_initialized {
        Some("OpenAI客户端初始化失败。请检查后端服务日志中的错误信息".into())
    } else if !status.api_key_set {
        Some("API密钥未配置。请检查后端服务的环境配置".into())
    } else if !status.base_url_set {
        Some("API URL未配置。请检查后端服务的环境配置".into())
    } else {
        None
    }
}

/// Keep the error class, swap the user-facing message for the diagnosed one.
fn substitute_message(err: ClientError, message: String) -> ClientError {
    match err {
        ClientError::Timeout(_) => ClientError::Timeout(message),
        ClientError::Server(_) => ClientError::Server(message),
        ClientError::Network(_) => ClientError::Network(message),
        ClientError::Validation(_) => ClientError::Validation(message),
        ClientError::State(_) => ClientError::State(message),
    }
}
