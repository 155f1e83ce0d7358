use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Opaque session identifier issued to a client before login
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Phone number a session is bound to after login. Not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self(phone_number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(phone_number: &str) -> Self {
        Self(phone_number.to_string())
    }
}

/// Session store - maps session IDs to the identity bound at login.
///
/// Entries live for the whole process: there is no expiry or eviction.
/// Each bind/resolve takes the lock once, so a reader either sees the
/// previous binding or the new one, never a partial entry. Concurrent binds
/// to the same session are last-writer-wins.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Identity>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind (or rebind) a session to an identity
    pub fn bind(&self, session_id: &SessionId, identity: Identity) {
        let previous = self.sessions.write().insert(session_id.clone(), identity);
        if previous.is_some() {
            debug!("[{}] session rebound", session_id);
        } else {
            debug!("[{}] session bound", session_id);
        }
    }

    /// Look up the identity bound to a session, if any
    pub fn resolve(&self, session_id: &SessionId) -> Option<Identity> {
        self.sessions.read().get(session_id).cloned()
    }

    /// Number of bound sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
