use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

const TOKEN_LEN: usize = 32;
const SESSION_TTL_DAYS: i64 = 7;

struct SessionEntry {
    username: String,
    expires_at: DateTime<Utc>,
}

/// In-process directory mapping opaque session tokens to usernames.
///
/// Entries live for seven days and are evicted lazily on resolve. A user may
/// hold any number of concurrent sessions. Nothing is persisted; restarting
/// the process signs everyone out.
pub struct SessionDirectory {
    entries: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Start a session for `username` and return its token.
    pub fn create(&self, username: &str) -> String {
        self.create_with_expiry(username, Utc::now() + Duration::days(SESSION_TTL_DAYS))
    }

    fn create_with_expiry(&self, username: &str, expires_at: DateTime<Utc>) -> String {
        let token = generate_token();
        self.write().insert(
            token.clone(),
            SessionEntry {
                username: username.to_string(),
                expires_at,
            },
        );
        token
    }

    /// Resolve a token to its username, if the session exists and is unexpired.
    pub fn resolve(&self, token: &str) -> Option<String> {
        let now = Utc::now();
        {
            let entries = self.read();
            match entries.get(token) {
                Some(entry) if entry.expires_at > now => return Some(entry.username.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.write().remove(token);
        None
    }

    /// Remove a session. Idempotent.
    pub fn destroy(&self, token: &str) {
        self.write().remove(token);
    }

    // Entries are plain data, so a poisoned lock is still safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, SessionEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, SessionEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SessionDirectory {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_LEN];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_resolve_destroy() {
        let sessions = SessionDirectory::new();
        let token = sessions.create("alice");

        assert_eq!(sessions.resolve(&token).as_deref(), Some("alice"));

        sessions.destroy(&token);
        assert_eq!(sessions.resolve(&token), None);

        // destroy is idempotent
        sessions.destroy(&token);
    }

    #[test]
    fn unknown_token_resolves_to_none() {
        let sessions = SessionDirectory::new();
        assert_eq!(sessions.resolve("not-a-token"), None);
    }

    #[test]
    fn expired_session_resolves_to_none() {
        let sessions = SessionDirectory::new();
        let token = sessions.create_with_expiry("alice", Utc::now() - Duration::seconds(1));
        assert_eq!(sessions.resolve(&token), None);
        // lazily evicted on first resolve
        assert!(sessions.read().get(&token).is_none());
    }

    #[test]
    fn one_user_many_sessions() {
        let sessions = SessionDirectory::new();
        let a = sessions.create("alice");
        let b = sessions.create("alice");

        assert_ne!(a, b);
        assert_eq!(sessions.resolve(&a).as_deref(), Some("alice"));
        assert_eq!(sessions.resolve(&b).as_deref(), Some("alice"));

        sessions.destroy(&a);
        assert_eq!(sessions.resolve(&b).as_deref(), Some("alice"));
    }
}
