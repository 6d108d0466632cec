//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{GenerationSession, GenerationStatus, SavedQuestion};
use crate::util::truncate_preview;

/// Chars of content shown per item in the saved list.
const PREVIEW_LEN: usize = 120;

/// Snapshot of the generation session, shared by /generate and /session.
#[derive(Debug, Serialize)]
pub struct SessionOut {
    pub status: GenerationStatus,
    pub content: String,
    pub error: Option<String>,
}

pub fn session_out(s: &GenerationSession) -> SessionOut {
    SessionOut {
        status: s.status,
        content: s.content.clone(),
        error: s.error.clone(),
    }
}

/// One saved question as shown in the recall list (preview, not full content).
#[derive(Debug, Serialize)]
pub struct SavedItemOut {
    pub id: i64,
    pub title: String,
    pub timestamp: String,
    pub preview: String,
}

pub fn to_item_out(q: &SavedQuestion) -> SavedItemOut {
    SavedItemOut {
        id: q.id,
        title: q.title.clone(),
        timestamp: q.timestamp.clone(),
        preview: truncate_preview(&q.content, PREVIEW_LEN),
    }
}

#[derive(Debug, Serialize)]
pub struct SavedListOut {
    pub questions: Vec<SavedItemOut>,
    pub error: Option<String>,
}

/// Result of saving the current display content.
#[derive(Debug, Serialize)]
pub struct SaveOut {
    pub question: Option<SavedItemOut>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectIn {
    pub id: i64,
}

/// Selecting mirrors the full content back for the detail pane.
#[derive(Debug, Serialize)]
pub struct SelectOut {
    pub content: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfirmOut {
    pub content: Option<String>,
    /// True when the recall surface should close (confirm succeeded).
    pub closed: bool,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CloseOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
