//! HTTP API for the stylist chat

mod assets;
mod handlers;
mod types;

pub use assets::ensure_static_dir;
pub use handlers::create_router;

use crate::chat::ResponseStreamer;
use crate::session::SessionStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub streamer: Arc<ResponseStreamer>,
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        streamer: ResponseStreamer,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sessions,
            streamer: Arc::new(streamer),
            static_dir: Arc::new(static_dir.into()),
        }
    }
}
