use std::collections::HashMap;
use std::sync::Arc;

use cappy_chat::{Assistant, Session};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub assistant: Arc<Assistant>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Config, assistant: Assistant) -> Self {
        Self {
            config: Arc::new(config),
            assistant: Arc::new(assistant),
            sessions: Arc::new(SessionStore::default()),
        }
    }
}

/// In-memory sessions keyed by id.
///
/// Each session sits behind its own mutex. The map lock is only held long
/// enough to look up or change an entry, while a session lock is held for a
/// whole conversational turn so turns, clears and resets on one session
/// apply one after another.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub async fn create(&self) -> Session {
        let session = Session::new();
        self.sessions
            .write()
            .await
            .insert(session.id, Arc::new(Mutex::new(session.clone())));
        session
    }

    async fn handle(&self, id: Uuid) -> ApiResult<Arc<Mutex<Session>>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))
    }

    /// Snapshot of a session; waits for any turn in progress
    pub async fn get(&self, id: Uuid) -> ApiResult<Session> {
        let handle = self.handle(id).await?;
        let session = handle.lock().await;
        Ok(session.clone())
    }

    /// Exclusive access to a session until the guard is dropped
    pub async fn lock(&self, id: Uuid) -> ApiResult<OwnedMutexGuard<Session>> {
        let handle = self.handle(id).await?;
        Ok(handle.lock_owned().await)
    }

    /// Apply `f` to a stored session once no turn is running on it
    pub async fn update<F>(&self, id: Uuid, f: F) -> ApiResult<Session>
    where
        F: FnOnce(&mut Session),
    {
        let mut session = self.lock(id).await?;
        f(&mut session);
        Ok(session.clone())
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    pub async fn remove(&self, id: Uuid) -> ApiResult<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cappy_chat::{ChatMessage, GREETING, NEW_CHAT_GREETING};

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::default();
        let session = store.create().await;

        let fetched = store.get(session.id).await.unwrap();
        assert_eq!(fetched.id, session.id);
        assert_eq!(fetched.messages()[0].content, GREETING);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_session() {
        let store = SessionStore::default();
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn test_update_resets_transcript() {
        let store = SessionStore::default();
        let session = store.create().await;
        store
            .update(session.id, |s| s.push(ChatMessage::user("hi")))
            .await
            .unwrap();

        let updated = store.update(session.id, Session::new_chat).await.unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated.messages()[0].content, NEW_CHAT_GREETING);
    }

    #[tokio::test]
    async fn test_update_waits_for_locked_session() {
        let store = Arc::new(SessionStore::default());
        let id = store.create().await.id;

        let mut turn = store.lock(id).await.unwrap();
        let pending = tokio::spawn({
            let store = store.clone();
            async move { store.update(id, Session::clear).await }
        });
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        turn.push(ChatMessage::user("in flight"));
        turn.push(ChatMessage::assistant("answer"));
        drop(turn);

        let cleared = pending.await.unwrap().unwrap();
        assert_eq!(cleared.len(), 1);
        assert_eq!(cleared.messages()[0].content, GREETING);
        assert_eq!(store.get(id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_while_locked() {
        let store = SessionStore::default();
        let id = store.create().await.id;

        let mut turn = store.lock(id).await.unwrap();
        store.remove(id).await.unwrap();
        turn.push(ChatMessage::user("late"));
        drop(turn);

        assert!(!store.contains(id).await);
        assert!(store.is_empty().await);
    }
}
