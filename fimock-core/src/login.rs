use serde::Serialize;
use uuid::Uuid;

use crate::session::SessionId;

const SESSION_PREFIX: &str = "mcp-session-";

/// Generates a new random session ID (UUID v4 with a fixed prefix)
pub fn generate_session() -> SessionId {
    SessionId::new(format!("{}{}", SESSION_PREFIX, Uuid::new_v4()))
}

/// A freshly issued session together with the page the user logs in on
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIssue {
    pub session_id: SessionId,
    pub login_url: String,
}

/// Derives login page URLs from session IDs
#[derive(Debug, Clone)]
pub struct LoginUrlBuilder {
    base_url: String,
}

impl LoginUrlBuilder {
    /// `base_url` is scheme + host (+ port), e.g. `http://localhost:8080`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Login page served by this process on `localhost:port`
    pub fn for_local_port(port: u16) -> Self {
        Self::new(format!("http://localhost:{}", port))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login_url(&self, session_id: &SessionId) -> String {
        format!(
            "{}/mockWebPage?sessionId={}",
            self.base_url,
            urlencoding::encode(session_id.as_str())
        )
    }

    /// Generate a new session and its login URL
    pub fn issue(&self) -> SessionIssue {
        let session_id = generate_session();
        let login_url = self.login_url(&session_id);
        SessionIssue {
            session_id,
            login_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn login_url_embeds_session_id() {
        let builder = LoginUrlBuilder::for_local_port(8080);
        let url = builder.login_url(&SessionId::from("s1"));
        assert_eq!(url, "http://localhost:8080/mockWebPage?sessionId=s1");
    }

    #[test]
    fn login_url_is_deterministic() {
        let builder = LoginUrlBuilder::new("http://example.test:9000/");
        let sid = generate_session();
        assert_eq!(builder.login_url(&sid), builder.login_url(&sid));
        assert!(builder.login_url(&sid).starts_with("http://example.test:9000/mockWebPage?"));
    }

    #[test]
    fn login_url_encodes_query_characters() {
        let builder = LoginUrlBuilder::for_local_port(8080);
        let url = builder.login_url(&SessionId::from("a&b=c"));
        assert_eq!(url, "http://localhost:8080/mockWebPage?sessionId=a%26b%3Dc");
    }

    #[test]
    fn generated_sessions_are_unique() {
        let ids: HashSet<_> = (0..10_000).map(|_| generate_session()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn generated_sessions_carry_prefix() {
        assert!(generate_session().as_str().starts_with(SESSION_PREFIX));
    }

    #[test]
    fn issue_serializes_camel_case() {
        let builder = LoginUrlBuilder::for_local_port(8080);
        let issue = builder.issue();
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["sessionId"], issue.session_id.as_str());
        assert_eq!(json["loginUrl"], issue.login_url);
        assert!(issue.login_url.ends_with(issue.session_id.as_str()));
    }
}
