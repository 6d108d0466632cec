//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Running one generation request end to end (session transitions,
//!     prompt build, provider call, stale-response discard)
//!   - Saving the current display content into the store
//!   - The recall surface operations (select / delete / confirm / close)
//!   - Exporting the current display content as a date-stamped file
//!
//! Failures are converted to in-state signals or message fields here; nothing
//! below this layer surfaces a raw provider or IO error to the user.

use chrono::Utc;
use tracing::{debug, error, info, instrument};

use crate::domain::ExerciseConfig;
use crate::prompt::build_prompt;
use crate::protocol::*;
use crate::state::AppState;
use crate::util::trunc_for_log;

/// Generic user-facing failure; the raw provider error only goes to the log.
pub const MSG_GENERATION_FAILED: &str =
  "Không thể tạo câu hỏi. Vui lòng kiểm tra cấu hình API và thử lại.";
pub const MSG_NOTHING_TO_SAVE: &str = "Chưa có nội dung để lưu.";
pub const MSG_SAVE_FAILED: &str = "Lỗi khi lưu câu hỏi.";
pub const MSG_DELETE_FAILED: &str = "Lỗi khi xóa câu hỏi.";
pub const MSG_UNKNOWN_SAVED_ID: &str = "Không tìm thấy câu hỏi đã lưu.";
pub const MSG_NO_SELECTION: &str = "Chưa chọn câu hỏi nào.";
pub const MSG_NOTHING_TO_EXPORT: &str = "Chưa có nội dung để tải xuống.";

/// Drive one generation request: Pending (prior result cleared), exactly one
/// provider call, then Succeeded with the text verbatim or Failed with the
/// generic message. Overlapping requests are not blocked; a response whose
/// sequence no longer matches the session is discarded instead.
#[instrument(level = "info", skip(state, cfg), fields(subject = cfg.subject.label(), grade = cfg.grade.label()))]
pub async fn run_generation(state: &AppState, cfg: ExerciseConfig) -> SessionOut {
  let seq = state.next_gen_seq();
  {
    state.session.write().await.begin(seq);
  }

  let prompt = build_prompt(&state.prompts, &cfg);
  debug!(target: "generate", seq, prompt_preview = %trunc_for_log(&prompt, 160), "Prompt built");

  let result = state.gemini.generate(&prompt).await;

  let mut session = state.session.write().await;
  match result {
    Ok(text) => {
      if session.finish_ok(seq, text) {
        info!(target: "generate", seq, content_len = session.content.len(), "Generation succeeded");
      } else {
        info!(target: "generate", seq, "Discarded stale generation response");
      }
    }
    Err(e) => {
      error!(target: "generate", seq, error = %e, "Generation failed");
      if !session.finish_err(seq, MSG_GENERATION_FAILED.into()) {
        info!(target: "generate", seq, "Discarded stale generation failure");
      }
    }
  }
  session_out(&session)
}

/// Current session snapshot for the SPA.
pub async fn current_session(state: &AppState) -> SessionOut {
  session_out(&*state.session.read().await)
}

/// Save the current display content as a new saved question.
#[instrument(level = "info", skip(state))]
pub async fn save_current(state: &AppState) -> SaveOut {
  let content = { state.session.read().await.content.clone() };
  if content.trim().is_empty() {
    return SaveOut { question: None, error: Some(MSG_NOTHING_TO_SAVE.into()) };
  }
  match state.store.add(content).await {
    Ok(q) => SaveOut { question: Some(to_item_out(&q)), error: None },
    Err(e) => {
      error!(target: "saved", error = %e, "Persist failed on save");
      SaveOut { question: None, error: Some(MSG_SAVE_FAILED.into()) }
    }
  }
}

/// The visible saved list, newest first, straight from the store.
pub async fn list_saved(state: &AppState) -> SavedListOut {
  let questions = state.store.list().await;
  SavedListOut { questions: questions.iter().map(to_item_out).collect(), error: None }
}

/// Select one saved question: record the selection and mirror its content
/// into the display surface immediately.
#[instrument(level = "info", skip(state))]
pub async fn recall_select(state: &AppState, id: i64) -> SelectOut {
  match state.store.get(id).await {
    Some(q) => {
      let content = state.recall.write().await.select(q);
      state.session.write().await.replace_content(content.clone());
      SelectOut { content: Some(content), error: None }
    }
    None => SelectOut { content: None, error: Some(MSG_UNKNOWN_SAVED_ID.into()) },
  }
}

/// Delete one saved question and return the refreshed list. The selection is
/// dropped when it pointed at the deleted id; the list always comes back from
/// the store, never from a controller-side cache.
#[instrument(level = "info", skip(state))]
pub async fn recall_delete(state: &AppState, id: i64) -> SavedListOut {
  state.recall.write().await.on_deleted(id);
  let error = match state.store.remove(id).await {
    Ok(()) => None,
    Err(e) => {
      error!(target: "saved", id, error = %e, "Persist failed on delete");
      Some(MSG_DELETE_FAILED.to_string())
    }
  };
  let questions = state.store.list().await;
  SavedListOut { questions: questions.iter().map(to_item_out).collect(), error }
}

/// Confirm the selected question: re-push its content and close the surface.
#[instrument(level = "info", skip(state))]
pub async fn recall_confirm(state: &AppState) -> ConfirmOut {
  match state.recall.write().await.confirm_use() {
    Some(confirmed) => {
      state.session.write().await.replace_content(confirmed.content.clone());
      ConfirmOut { content: Some(confirmed.content), closed: true, error: None }
    }
    None => ConfirmOut { content: None, closed: false, error: Some(MSG_NO_SELECTION.into()) },
  }
}

/// Close the recall surface, discarding any transient selection.
pub async fn recall_close(state: &AppState) {
  state.recall.write().await.close();
}

/// Export the current display content verbatim with a date-stamped filename.
pub async fn export_current(state: &AppState) -> Result<(String, String), String> {
  let content = { state.session.read().await.content.clone() };
  if content.trim().is_empty() {
    return Err(MSG_NOTHING_TO_EXPORT.into());
  }
  let filename = format!("cau-hoi-{}.md", Utc::now().format("%Y-%m-%d"));
  Ok((filename, content))
}
