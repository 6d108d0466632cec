//! Application state: the saved-questions store, the generation session,
//! the recall surface, the Gemini client, and prompt configuration.
//!
//! Everything lives behind one `Arc<AppState>` built at startup; controllers
//! receive the handle instead of reaching for globals, so single-instance
//! semantics hold without hidden module state.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::{load_app_config_from_env, resolve_storage_path, Prompts};
use crate::domain::GenerationSession;
use crate::gemini::Gemini;
use crate::recall::RecallState;
use crate::store::SavedStore;

pub struct AppState {
    pub store: SavedStore,
    pub session: RwLock<GenerationSession>,
    pub recall: RwLock<RecallState>,
    pub gemini: Gemini,
    pub prompts: Prompts,
    gen_seq: AtomicU64,
}

impl AppState {
    /// Build state from env: load config, open the store, init the Gemini
    /// client. A missing API key is a startup error (ConfigurationError);
    /// nothing else here is fatal.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Result<Self, String> {
        let cfg_opt = load_app_config_from_env();
        let prompts = cfg_opt
            .as_ref()
            .map(|c| c.prompts.clone())
            .unwrap_or_default();

        let gemini = Gemini::from_env()?;
        info!(target: "soande_backend", base_url = %gemini.base_url, model = %gemini.model, "Gemini enabled.");

        let storage_path = resolve_storage_path(cfg_opt.as_ref());
        let store = SavedStore::open(storage_path);

        Ok(Self {
            store,
            session: RwLock::new(GenerationSession::new()),
            recall: RwLock::new(RecallState::new()),
            gemini,
            prompts,
            gen_seq: AtomicU64::new(0),
        })
    }

    /// Next generation request sequence number (monotonic, starts at 1).
    pub fn next_gen_seq(&self) -> u64 {
        self.gen_seq.fetch_add(1, Ordering::SeqCst) + 1
    }
}
