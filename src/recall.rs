//! Recall surface state machine: browsing saved questions and reusing one.
//!
//! Two states: no selection, or exactly one selected question. Selecting
//! mirrors the content to the display surface immediately (not only on
//! confirm); confirm re-pushes it and closes the surface; close discards the
//! selection without touching the store. Deleting the selected question
//! clears the selection.
//!
//! This struct is pure state; `logic` wires it to the store and the session.

use crate::domain::SavedQuestion;

#[derive(Debug, Default)]
pub struct RecallState {
  selection: Option<SavedQuestion>,
}

/// Outcome of `confirm_use`: the content to re-push, plus the signal that the
/// surface should close.
pub struct ConfirmedUse {
  pub content: String,
}

impl RecallState {
  pub fn new() -> Self {
    Self { selection: None }
  }

  pub fn selected(&self) -> Option<&SavedQuestion> {
    self.selection.as_ref()
  }

  /// Select a question. Returns the content to mirror into the display.
  pub fn select(&mut self, question: SavedQuestion) -> String {
    let content = question.content.clone();
    self.selection = Some(question);
    content
  }

  /// A question was deleted; drop the selection if it was the one.
  pub fn on_deleted(&mut self, id: i64) {
    if self.selection.as_ref().is_some_and(|q| q.id == id) {
      self.selection = None;
    }
  }

  /// Valid only with a selection. Consumes it (the surface closes).
  pub fn confirm_use(&mut self) -> Option<ConfirmedUse> {
    self.selection.take().map(|q| ConfirmedUse { content: q.content })
  }

  /// Valid in any state; discards any transient selection.
  pub fn close(&mut self) {
    self.selection = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn q(id: i64, content: &str) -> SavedQuestion {
    SavedQuestion {
      id,
      content: content.into(),
      timestamp: "2026-08-27T08:00:00.000Z".into(),
      title: format!("Câu hỏi {id}"),
    }
  }

  #[test]
  fn select_mirrors_content_immediately() {
    let mut r = RecallState::new();
    assert!(r.selected().is_none());
    let pushed = r.select(q(1, "nội dung A"));
    assert_eq!(pushed, "nội dung A");
    assert_eq!(r.selected().map(|s| s.id), Some(1));
  }

  #[test]
  fn deleting_the_selected_question_clears_selection() {
    let mut r = RecallState::new();
    r.select(q(1, "a"));
    r.on_deleted(2); // unrelated delete keeps the selection
    assert!(r.selected().is_some());
    r.on_deleted(1);
    assert!(r.selected().is_none());
  }

  #[test]
  fn confirm_needs_a_selection_and_closes() {
    let mut r = RecallState::new();
    assert!(r.confirm_use().is_none());

    r.select(q(3, "dùng lại"));
    let confirmed = r.confirm_use().expect("selection");
    assert_eq!(confirmed.content, "dùng lại");
    // Terminal: the selection is gone.
    assert!(r.selected().is_none());
  }

  #[test]
  fn close_discards_without_store_effects() {
    let mut r = RecallState::new();
    r.close(); // valid with no selection
    r.select(q(4, "x"));
    r.close();
    assert!(r.selected().is_none());
  }
}
