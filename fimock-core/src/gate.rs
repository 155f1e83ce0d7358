//! Authorization gate run in front of every tool call.
//!
//! Each call walks the same three steps with no caching between calls:
//! resolve the session, check the allow-list, read the fixture. The first
//! step that fails decides the outcome.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::allow_list::AllowList;
use crate::fixtures::FixtureStore;
use crate::login::LoginUrlBuilder;
use crate::session::{Identity, SessionId, SessionStore};

pub const LOGIN_REQUIRED_MESSAGE: &str = "Needs to login first by going to the login url.\nShow the login url as clickable link if client supports it. Otherwise display the URL for users to copy and paste into a browser. \nAsk users to come back and let you know once they are done with login in their browser";
pub const FORBIDDEN_MESSAGE: &str = "phone number is not allowed";
pub const FIXTURE_UNAVAILABLE_MESSAGE: &str = "error reading test data file";

/// Payload telling the caller to log in and retry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequired {
    pub status: &'static str,
    pub login_url: String,
    pub message: &'static str,
}

impl LoginRequired {
    pub fn new(login_url: String) -> Self {
        Self {
            status: "login_required",
            login_url,
            message: LOGIN_REQUIRED_MESSAGE,
        }
    }

    pub fn to_json(&self) -> String {
        // Only string fields, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Result of gating one tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    LoginRequired(LoginRequired),
    Forbidden,
    FixtureUnavailable,
    Success { identity: Identity, payload: String },
}

impl GateOutcome {
    /// Whether the transport should flag this result as a tool error
    pub fn is_error(&self) -> bool {
        matches!(self, GateOutcome::Forbidden | GateOutcome::FixtureUnavailable)
    }

    /// Text handed back to the caller
    pub fn into_text(self) -> String {
        match self {
            GateOutcome::LoginRequired(login) => login.to_json(),
            GateOutcome::Forbidden => FORBIDDEN_MESSAGE.to_string(),
            GateOutcome::FixtureUnavailable => FIXTURE_UNAVAILABLE_MESSAGE.to_string(),
            GateOutcome::Success { payload, .. } => payload,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthGate {
    sessions: Arc<SessionStore>,
    allow_list: Arc<AllowList>,
    fixtures: FixtureStore,
    login_urls: LoginUrlBuilder,
}

impl AuthGate {
    pub fn new(
        sessions: Arc<SessionStore>,
        allow_list: Arc<AllowList>,
        fixtures: FixtureStore,
        login_urls: LoginUrlBuilder,
    ) -> Self {
        Self {
            sessions,
            allow_list,
            fixtures,
            login_urls,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub async fn authorize(&self, session_id: &SessionId, tool_name: &str) -> GateOutcome {
        let Some(identity) = self.sessions.resolve(session_id) else {
            debug!("[{}] {} - login required", session_id, tool_name);
            return GateOutcome::LoginRequired(LoginRequired::new(
                self.login_urls.login_url(session_id),
            ));
        };

        if !self.allow_list.contains(&identity) {
            debug!("[{}] {} - {} not allowed", session_id, tool_name, identity);
            return GateOutcome::Forbidden;
        }

        match self.fixtures.read(&identity, tool_name).await {
            Ok(payload) => {
                debug!("[{}] {} - served fixture for {}", session_id, tool_name, identity);
                GateOutcome::Success { identity, payload }
            }
            Err(e) => {
                warn!("[{}] error reading test data file: {}", session_id, e);
                GateOutcome::FixtureUnavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ALLOWED: &str = "9999999999";

    fn gate_with_fixture(fixture: Option<&str>) -> (TempDir, AuthGate) {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join(ALLOWED)).unwrap();
        if let Some(body) = fixture {
            std::fs::write(root.path().join(ALLOWED).join("fetch_balance.json"), body).unwrap();
        }
        let gate = AuthGate::new(
            Arc::new(SessionStore::new()),
            Arc::new(AllowList::new([ALLOWED])),
            FixtureStore::new(root.path()),
            LoginUrlBuilder::for_local_port(8080),
        );
        (root, gate)
    }

    #[tokio::test]
    async fn unbound_session_requires_login() {
        let (_root, gate) = gate_with_fixture(Some("{}"));
        let sid = SessionId::from("mcp-session-abc");

        let outcome = gate.authorize(&sid, "fetch_balance").await;
        let GateOutcome::LoginRequired(login) = &outcome else {
            panic!("expected login required, got {:?}", outcome);
        };
        assert!(login.login_url.contains("mcp-session-abc"));
        assert!(!outcome.is_error());
        assert!(gate.sessions().is_empty());
    }

    #[tokio::test]
    async fn login_required_payload_shape() {
        let (_root, gate) = gate_with_fixture(None);
        let text = gate.authorize(&SessionId::from("s1"), "fetch_balance").await.into_text();

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["status"], "login_required");
        assert_eq!(json["login_url"], "http://localhost:8080/mockWebPage?sessionId=s1");
        assert_eq!(json["message"], LOGIN_REQUIRED_MESSAGE);
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn identity_outside_allow_list_is_forbidden() {
        let (root, gate) = gate_with_fixture(Some("{}"));
        let other = "1234567890";
        std::fs::create_dir(root.path().join(other)).unwrap();
        std::fs::write(root.path().join(other).join("fetch_balance.json"), "{}").unwrap();

        let sid = SessionId::from("s1");
        gate.sessions().bind(&sid, Identity::from(other));

        let outcome = gate.authorize(&sid, "fetch_balance").await;
        assert_eq!(outcome, GateOutcome::Forbidden);
        assert!(outcome.is_error());
        assert_eq!(outcome.into_text(), FORBIDDEN_MESSAGE);
        // Forbidden identities stay bound
        assert_eq!(gate.sessions().resolve(&sid), Some(Identity::from(other)));
    }

    #[tokio::test]
    async fn allowed_identity_gets_fixture_verbatim() {
        let (_root, gate) = gate_with_fixture(Some("{\"balance\": 100}"));
        let sid = SessionId::from("s1");
        gate.sessions().bind(&sid, Identity::from(ALLOWED));

        let outcome = gate.authorize(&sid, "fetch_balance").await;
        assert!(!outcome.is_error());
        assert_eq!(
            outcome,
            GateOutcome::Success {
                identity: Identity::from(ALLOWED),
                payload: "{\"balance\": 100}".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn missing_fixture_is_a_generic_error() {
        let (root, gate) = gate_with_fixture(None);
        let sid = SessionId::from("s1");
        gate.sessions().bind(&sid, Identity::from(ALLOWED));

        let outcome = gate.authorize(&sid, "fetch_balance").await;
        assert_eq!(outcome, GateOutcome::FixtureUnavailable);
        let text = outcome.into_text();
        assert_eq!(text, FIXTURE_UNAVAILABLE_MESSAGE);
        assert!(!text.contains(&root.path().display().to_string()));
        assert_eq!(gate.sessions().len(), 1);
        assert_eq!(gate.sessions().resolve(&sid), Some(Identity::from(ALLOWED)));
    }

    #[tokio::test]
    async fn malformed_tool_name_is_a_generic_error() {
        let (_root, gate) = gate_with_fixture(Some("{}"));
        let sid = SessionId::from("s1");
        gate.sessions().bind(&sid, Identity::from(ALLOWED));

        let outcome = gate.authorize(&sid, "../fetch_balance").await;
        assert_eq!(outcome, GateOutcome::FixtureUnavailable);
    }

    #[tokio::test]
    async fn every_call_rechecks_after_rebinding() {
        let (_root, gate) = gate_with_fixture(Some("{}"));
        let sid = SessionId::from("s1");

        gate.sessions().bind(&sid, Identity::from("0000000000"));
        assert_eq!(gate.authorize(&sid, "fetch_balance").await, GateOutcome::Forbidden);

        gate.sessions().bind(&sid, Identity::from(ALLOWED));
        assert!(matches!(
            gate.authorize(&sid, "fetch_balance").await,
            GateOutcome::Success { .. }
        ));
    }
}
