//! Session identity manager.
//!
//! Owns the chat session id: loads it from the durable store on first use,
//! generates and persists a fresh one when none is stored, replaces it when
//! a member signs in under a session opened anonymously, and forgets it once
//! the conversation produced a plan.
//!
//! The store also records which member the session was opened under
//! (`chatbotSessionOwner`), so a sign-in that happened while the client was
//! not running still rotates the session on the next start. Storage errors
//! are logged and otherwise ignored: the id keeps living in memory.

use fitcoach_types::auth::UserId;
use fitcoach_types::chat::SessionId;
use fitcoach_types::storage::StorageKey;
use tracing::{debug, info, warn};

use crate::storage::KvStore;

pub struct SessionIdentity<S: KvStore> {
    store: S,
    current: Option<SessionId>,
    owner: Option<UserId>,
}

impl<S: KvStore> SessionIdentity<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: None,
            owner: None,
        }
    }

    /// The session id currently in memory, if one was resolved.
    pub fn current(&self) -> Option<&SessionId> {
        self.current.as_ref()
    }

    /// Resolve the session id for a conversation starting with `user` signed in.
    ///
    /// A session created here is owned by `user` from the start; an existing
    /// one is rotated if `user` did not open it.
    pub async fn init(&mut self, user: Option<UserId>) -> SessionId {
        let (id, created) = self.resolve().await;
        if !created {
            return self.rotate_on_auth(user).await.unwrap_or(id);
        }
        if let Some(user_id) = user {
            self.write(StorageKey::ChatbotSessionOwner, &user_id.to_string())
                .await;
            self.owner = Some(user_id);
        }
        id
    }

    /// Return the session id, loading or generating it on first use.
    pub async fn get_or_create(&mut self) -> SessionId {
        self.resolve().await.0
    }

    /// The session id, and whether it was generated by this call.
    async fn resolve(&mut self) -> (SessionId, bool) {
        if let Some(id) = &self.current {
            return (id.clone(), false);
        }

        let stored = self.read(StorageKey::ChatbotSessionId).await;
        self.owner = self
            .read(StorageKey::ChatbotSessionOwner)
            .await
            .and_then(|raw| raw.parse().ok());

        let (id, created) = match stored {
            Some(raw) if !raw.is_empty() => {
                debug!(session_id = %raw, "Restored chat session id");
                (SessionId(raw), false)
            }
            _ => {
                let id = SessionId::generate();
                self.write(StorageKey::ChatbotSessionId, id.as_str()).await;
                if self.owner.take().is_some() {
                    self.remove(StorageKey::ChatbotSessionOwner).await;
                }
                info!(session_id = %id, "Started new chat session");
                (id, true)
            }
        };

        self.current = Some(id.clone());
        (id, created)
    }

    /// React to the signed-in member changing.
    ///
    /// Returns the new id when the session was rotated. A member appearing
    /// under a session they did not open rotates it; a member signing out
    /// keeps the session but drops its owner.
    pub async fn rotate_on_auth(&mut self, user: Option<UserId>) -> Option<SessionId> {
        self.get_or_create().await;

        let Some(user_id) = user else {
            if self.owner.take().is_some() {
                self.remove(StorageKey::ChatbotSessionOwner).await;
            }
            return None;
        };

        if self.owner == Some(user_id) {
            return None;
        }

        let id = SessionId::generate();
        self.write(StorageKey::ChatbotSessionId, id.as_str()).await;
        self.write(StorageKey::ChatbotSessionOwner, &user_id.to_string())
            .await;
        info!(session_id = %id, user_id, "Rotated chat session after sign-in");

        self.current = Some(id.clone());
        self.owner = Some(user_id);
        Some(id)
    }

    /// Forget the session after a terminal response.
    pub async fn clear_on_completion(&mut self) {
        self.remove(StorageKey::ChatbotSessionId).await;
        self.remove(StorageKey::ChatbotSessionOwner).await;
        if let Some(id) = self.current.take() {
            info!(session_id = %id, "Chat session completed");
        }
        self.owner = None;
    }

    async fn read(&self, key: StorageKey) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, "Failed to read session state: {e}");
                None
            }
        }
    }

    async fn write(&self, key: StorageKey, value: &str) {
        if let Err(e) = self.store.set(key, value).await {
            warn!(key = %key, "Failed to persist session state: {e}");
        }
    }

    async fn remove(&self, key: StorageKey) {
        if let Err(e) = self.store.delete(key).await {
            warn!(key = %key, "Failed to clear session state: {e}");
        }
    }
}
