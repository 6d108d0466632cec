//! Durable store for saved questions: one JSON array in one well-known file.
//!
//! Semantics:
//!   - The persisted sequence is chronological (append order); `list()`
//!     returns it reversed, newest first. No sorting by content or title.
//!   - Every add/delete re-persists the full collection: serialize, write a
//!     temp file, rename over the blob. The in-memory copy is only swapped
//!     after the write succeeds, so memory always matches the last
//!     successful persist.
//!   - A missing or corrupt blob reads as an empty collection, never an error.
//!
//! The store is an explicit handle constructed once at startup and held in
//! `AppState`; nothing reaches it except through that handle.

use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::domain::SavedQuestion;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("failed to write saved questions: {0}")]
  Io(#[from] std::io::Error),
  #[error("failed to encode saved questions: {0}")]
  Encode(#[from] serde_json::Error),
}

pub struct SavedStore {
  path: PathBuf,
  items: RwLock<Vec<SavedQuestion>>,
}

impl SavedStore {
  /// Open the store at `path`, reading whatever is already persisted.
  /// Decode failures are logged and treated as an empty collection.
  #[instrument(level = "info", skip_all, fields(path = %path.display()))]
  pub fn open(path: PathBuf) -> Self {
    let items = match std::fs::read_to_string(&path) {
      Ok(raw) => match serde_json::from_str::<Vec<SavedQuestion>>(&raw) {
        Ok(items) => {
          info!(target: "saved", count = items.len(), "Loaded saved questions");
          items
        }
        Err(e) => {
          warn!(target: "saved", error = %e, "Saved questions blob is malformed; starting empty");
          Vec::new()
        }
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
      Err(e) => {
        warn!(target: "saved", error = %e, "Could not read saved questions; starting empty");
        Vec::new()
      }
    };
    Self { path, items: RwLock::new(items) }
  }

  /// Full collection, newest first.
  pub async fn list(&self) -> Vec<SavedQuestion> {
    let items = self.items.read().await;
    items.iter().rev().cloned().collect()
  }

  /// Look up one saved question by id.
  pub async fn get(&self, id: i64) -> Option<SavedQuestion> {
    let items = self.items.read().await;
    items.iter().find(|q| q.id == id).cloned()
  }

  /// Append a new saved question and persist the whole collection.
  /// The id is millisecond-time-derived, bumped past the newest existing id
  /// so it stays unique and monotonically increasing within the store.
  #[instrument(level = "info", skip(self, content), fields(content_len = content.len()))]
  pub async fn add(&self, content: String) -> Result<SavedQuestion, StoreError> {
    let mut items = self.items.write().await;

    let mut id = Utc::now().timestamp_millis();
    if let Some(last) = items.last() {
      if id <= last.id {
        id = last.id + 1;
      }
    }
    let question = SavedQuestion {
      id,
      content,
      timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
      title: format!("Câu hỏi {}", items.len() + 1),
    };

    let mut next = items.clone();
    next.push(question.clone());
    self.persist(&next)?;
    *items = next;

    info!(target: "saved", id = question.id, title = %question.title, "Saved question");
    Ok(question)
  }

  /// Remove by id and persist. Absent ids are a no-op, which also makes the
  /// operation idempotent.
  #[instrument(level = "info", skip(self))]
  pub async fn remove(&self, id: i64) -> Result<(), StoreError> {
    let mut items = self.items.write().await;
    let next: Vec<SavedQuestion> = items.iter().filter(|q| q.id != id).cloned().collect();
    if next.len() == items.len() {
      return Ok(());
    }
    self.persist(&next)?;
    *items = next;
    info!(target: "saved", id, "Deleted saved question");
    Ok(())
  }

  /// Atomic full overwrite: write a sibling temp file, then rename.
  fn persist(&self, items: &[SavedQuestion]) -> Result<(), StoreError> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent)?;
      }
    }
    let encoded = serde_json::to_string(items)?;
    let tmp = self.path.with_extension("json.tmp");
    std::fs::write(&tmp, encoded)?;
    std::fs::rename(&tmp, &self.path)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn temp_store_path(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
      .duration_since(std::time::UNIX_EPOCH)
      .expect("clock")
      .as_nanos();
    std::env::temp_dir().join(format!("soande-store-{tag}-{nanos}")).join("saved_questions.json")
  }

  #[tokio::test]
  async fn add_then_list_puts_newest_first() {
    let store = SavedStore::open(temp_store_path("add"));
    assert!(store.list().await.is_empty());

    let a = store.add("bộ thứ nhất".into()).await.expect("add");
    let b = store.add("bộ thứ hai".into()).await.expect("add");

    let listed = store.list().await;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, b.id);
    assert_eq!(listed[1].id, a.id);
    assert!(b.id > a.id, "ids must increase monotonically");
    assert_eq!(a.title, "Câu hỏi 1");
    assert_eq!(b.title, "Câu hỏi 2");
  }

  #[tokio::test]
  async fn remove_is_idempotent() {
    let store = SavedStore::open(temp_store_path("remove"));
    let a = store.add("giữ lại".into()).await.expect("add");
    let b = store.add("xoá đi".into()).await.expect("add");

    store.remove(b.id).await.expect("remove");
    let once = store.list().await;
    store.remove(b.id).await.expect("remove again");
    let twice = store.list().await;

    assert_eq!(once, twice);
    assert_eq!(twice.len(), 1);
    assert_eq!(twice[0].id, a.id);
  }

  #[tokio::test]
  async fn collection_round_trips_across_store_instances() {
    let path = temp_store_path("roundtrip");
    let first = SavedStore::open(path.clone());
    first.add("## Câu 1\n$2 + 2$".into()).await.expect("add");
    first.add("## Câu 2\nkể chuyện".into()).await.expect("add");
    let before = first.list().await;

    let reopened = SavedStore::open(path);
    assert_eq!(reopened.list().await, before);
  }

  #[tokio::test]
  async fn corrupt_blob_reads_as_empty() {
    let path = temp_store_path("corrupt");
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(&path, "{definitely not an array").expect("write");

    let store = SavedStore::open(path.clone());
    assert!(store.list().await.is_empty());

    // The store still works after recovering from corruption.
    store.add("nội dung mới".into()).await.expect("add");
    assert_eq!(SavedStore::open(path).list().await.len(), 1);
  }

  #[tokio::test]
  async fn failed_persist_keeps_memory_at_last_successful_state() {
    // Parent of the blob path is a regular file, so every write must fail.
    let blocker = std::env::temp_dir().join(format!(
      "soande-store-blocked-{}",
      std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos()
    ));
    std::fs::write(&blocker, "not a directory").expect("write blocker");
    let store = SavedStore::open(blocker.join("saved_questions.json"));

    assert!(store.add("không ghi được".into()).await.is_err());
    // Memory still matches the last successful persist (nothing).
    assert!(store.list().await.is_empty());
    assert!(store.add("vẫn không ghi được".into()).await.is_err());
    assert!(store.list().await.is_empty());

    // Removing an absent id stays a no-op even when writes are impossible.
    store.remove(42).await.expect("no-op remove");
  }

  #[tokio::test]
  async fn deleting_the_middle_of_three_keeps_reverse_order() {
    let store = SavedStore::open(temp_store_path("middle"));
    let first = store.add("một".into()).await.expect("add");
    let second = store.add("hai".into()).await.expect("add");
    let third = store.add("ba".into()).await.expect("add");

    store.remove(second.id).await.expect("remove");

    let listed = store.list().await;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, third.id);
    assert_eq!(listed[1].id, first.id);
  }
}
