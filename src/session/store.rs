//! Session storage
//!
//! Sessions live in memory for the lifetime of the process. The store is an
//! injectable trait object so eviction or a persistent backend can replace
//! the in-memory map without touching the chat core.

use super::SessionContext;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared handle to one session.
///
/// Each turn locks it only for short synchronous updates (profile, stage,
/// history append) and never across an upstream call, so two requests on the
/// same session can interleave their turns.
pub type SessionHandle = Arc<Mutex<SessionContext>>;

/// Keyed storage of session contexts
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Return the session for `session_id`, creating a fresh one if unseen.
    ///
    /// Concurrent calls for the same unseen id observe the same handle.
    async fn resolve(&self, session_id: &str) -> SessionHandle;

    /// Look up a session without creating it
    async fn get(&self, session_id: &str) -> Option<SessionHandle>;

    /// Insert or replace a session, returning its handle
    async fn put(&self, context: SessionContext) -> SessionHandle;

    /// Number of stored sessions
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Process-lifetime map of sessions; nothing is ever evicted
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn resolve(&self, session_id: &str) -> SessionHandle {
        if let Some(handle) = self.sessions.read().await.get(session_id) {
            return Arc::clone(handle);
        }

        // Re-check under the write lock: another request may have created it
        let mut sessions = self.sessions.write().await;
        let handle = sessions.entry(session_id.to_string()).or_insert_with(|| {
            tracing::info!(session_id = %session_id, "Creating new session");
            Arc::new(Mutex::new(SessionContext::new(session_id)))
        });
        Arc::clone(handle)
    }

    async fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(session_id).cloned()
    }

    async fn put(&self, context: SessionContext) -> SessionHandle {
        let session_id = context.session_id.clone();
        let handle = Arc::new(Mutex::new(context));
        self.sessions
            .write()
            .await
            .insert(session_id, Arc::clone(&handle));
        handle
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn resolve(&self, session_id: &str) -> SessionHandle {
        (**self).resolve(session_id).await
    }

    async fn get(&self, session_id: &str) -> Option<SessionHandle> {
        (**self).get(session_id).await
    }

    async fn put(&self, context: SessionContext) -> SessionHandle {
        (**self).put(context).await
    }

    async fn len(&self) -> usize {
        (**self).len().await
    }
}
