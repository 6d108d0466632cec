//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; logs include parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::{header, HeaderMap, HeaderValue},
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::domain::ExerciseConfig;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, cfg), fields(topic_len = cfg.topic.len()))]
pub async fn http_post_generate(
  State(state): State<Arc<AppState>>,
  Json(cfg): Json<ExerciseConfig>,
) -> impl IntoResponse {
  let out = run_generation(&state, cfg).await;
  info!(target: "generate", status = ?out.status, "HTTP generate finished");
  Json(out)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(current_session(&state).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_saved(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let out = list_saved(&state).await;
  info!(target: "saved", count = out.questions.len(), "HTTP saved list served");
  Json(out)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_save(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(save_current(&state).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_saved(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> impl IntoResponse {
  Json(recall_delete(&state, id).await)
}

#[instrument(level = "info", skip(state, body), fields(id = body.id))]
pub async fn http_post_recall_select(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SelectIn>,
) -> impl IntoResponse {
  Json(recall_select(&state, body.id).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_recall_confirm(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(recall_confirm(&state).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_recall_close(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  recall_close(&state).await;
  Json(CloseOut { ok: true })
}

/// Download the current display content verbatim as Markdown with a
/// date-stamped filename. An empty display is a notice, not a failure.
#[instrument(level = "info", skip(state))]
pub async fn http_get_export(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  match export_current(&state).await {
    Ok((filename, content)) => {
      let mut headers = HeaderMap::new();
      headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/markdown; charset=utf-8"),
      );
      let disposition = format!("attachment; filename=\"{}\"", filename);
      if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
      }
      info!(target: "soande_backend", %filename, content_len = content.len(), "Export served");
      (headers, content).into_response()
    }
    Err(message) => Json(serde_json::json!({ "error": message })).into_response(),
  }
}
