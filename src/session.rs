//! Session context
//!
//! Holds the bearer token and the signed-in user. The context is created
//! once in `main`, handed to the REST client and to the app, and is the only
//! place session state lives. It is persisted in a small SQLite database so
//! a restart keeps the user signed in.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

use crate::api::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Lifecycle notifications sent to session watchers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut,
    /// Torn down after a 401 response
    Expired,
}

pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    pub fn new() -> Result<Self> {
        let data_dir = crate::utils::get_data_dir();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;

        let conn = Connection::open(data_dir.join("session.db"))?;
        let mut store = SessionStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = SessionStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS session (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                token TEXT NOT NULL,
                user_json TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    pub fn load(&self) -> Result<Option<Session>> {
        let mut stmt = self
            .conn
            .prepare("SELECT token, user_json FROM session WHERE id = 1")?;

        let result = stmt.query_row([], |row| {
            let token: String = row.get(0)?;
            let user_json: String = row.get(1)?;
            Ok((token, user_json))
        });

        match result {
            Ok((token, user_json)) => {
                let user: User =
                    serde_json::from_str(&user_json).context("Failed to parse stored user")?;
                Ok(Some(Session { token, user }))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let user_json = serde_json::to_string(&session.user)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO session (id, token, user_json) VALUES (1, ?1, ?2)",
            params![&session.token, user_json],
        )?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM session", [])?;
        Ok(())
    }
}

struct SessionInner {
    current: Option<Session>,
    store: SessionStore,
}

#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Mutex<SessionInner>>,
    events: Arc<watch::Sender<SessionEvent>>,
}

impl SessionContext {
    /// Wrap a store; nothing is loaded until `init` is called
    pub fn new(store: SessionStore) -> Self {
        let (events, _) = watch::channel(SessionEvent::SignedOut);
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                current: None,
                store,
            })),
            events: Arc::new(events),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Restore the persisted session, if any
    pub fn init(&self) -> Result<Option<Session>> {
        let mut inner = self.lock();
        let restored = inner.store.load()?;
        inner.current = restored.clone();
        Ok(restored)
    }

    /// Start a new session and persist it
    pub fn begin(&self, session: Session) -> Result<()> {
        {
            let mut inner = self.lock();
            inner.store.save(&session)?;
            inner.current = Some(session);
        }
        self.events.send_replace(SessionEvent::SignedIn);
        Ok(())
    }

    /// Clear persisted and in-memory state and notify watchers
    ///
    /// Returns false when there was no session to tear down.
    pub fn teardown(&self, event: SessionEvent) -> bool {
        let had_session = {
            let mut inner = self.lock();
            if let Err(e) = inner.store.clear() {
                crate::log_debug(&format!("Failed to clear stored session: {}", e));
            }
            inner.current.take().is_some()
        };

        if had_session {
            self.events.send_replace(event);
        }
        had_session
    }

    /// Replace the stored user record (after `/auth/me`)
    pub fn update_user(&self, user: User) -> Result<()> {
        let mut inner = self.lock();
        let Some(session) = inner.current.as_mut() else {
            return Ok(());
        };
        session.user = user;
        let session = session.clone();
        inner.store.save(&session)
    }

    pub fn token(&self) -> Option<String> {
        self.lock().current.as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.lock().current.as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().current.is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: &str) -> Session {
        Session {
            token: token.to_string(),
            user: User {
                id: "u1".to_string(),
                username: Some("ana".to_string()),
                email: None,
            },
        }
    }

    #[test]
    fn test_store_roundtrip_and_clear() {
        let store = SessionStore::new_in_memory().unwrap();
        assert!(store.load().unwrap().is_none());

        store.save(&session("t1")).unwrap();
        assert_eq!(store.load().unwrap(), Some(session("t1")));

        store.save(&session("t2")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().token, "t2");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_teardown_without_session_is_silent() {
        let ctx = SessionContext::new(SessionStore::new_in_memory().unwrap());
        let mut rx = ctx.subscribe();
        assert!(!ctx.teardown(SessionEvent::Expired));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_update_user_without_session_is_noop() {
        let ctx = SessionContext::new(SessionStore::new_in_memory().unwrap());
        ctx.update_user(User::default()).unwrap();
        assert!(ctx.user().is_none());
    }
}
