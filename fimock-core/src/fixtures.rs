use std::path::PathBuf;

use crate::error::FixtureError;
use crate::session::Identity;

/// Canned JSON payloads laid out as `<root>/<identity>/<tool>.json`
#[derive(Debug, Clone)]
pub struct FixtureStore {
    root: PathBuf,
}

impl FixtureStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, identity: &Identity, tool_name: &str) -> Result<PathBuf, FixtureError> {
        let identity = checked_component(identity.as_str())?;
        let tool_name = checked_component(tool_name)?;
        Ok(self.root.join(identity).join(format!("{}.json", tool_name)))
    }

    /// Read the fixture verbatim; content is neither parsed nor validated
    pub async fn read(&self, identity: &Identity, tool_name: &str) -> Result<String, FixtureError> {
        let path = self.path_for(identity, tool_name)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| FixtureError::Io { path, source })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn checked_component(component: &str) -> Result<&str, FixtureError> {
    let invalid = component.is_empty()
        || component == "."
        || component.contains("..")
        || component.contains(['/', '\\', '\0']);
    if invalid {
        Err(FixtureError::InvalidPath(component.to_string()))
    } else {
        Ok(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_follows_identity_and_tool_layout() {
        let store = FixtureStore::new("/data");
        let path = store.path_for(&Identity::from("9999999999"), "fetch_balance").unwrap();
        assert_eq!(path, PathBuf::from("/data/9999999999/fetch_balance.json"));
    }

    #[test]
    fn traversal_components_are_rejected() {
        let store = FixtureStore::new("/data");
        for tool in ["../secret", "a/b", "", "..", "a\\b"] {
            assert!(
                matches!(
                    store.path_for(&Identity::from("9999999999"), tool),
                    Err(FixtureError::InvalidPath(_))
                ),
                "tool name {:?} should be rejected",
                tool
            );
        }
        assert!(store.path_for(&Identity::from("../etc"), "passwd").is_err());
    }

    #[tokio::test]
    async fn read_returns_file_bytes_unchanged() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("9999999999")).unwrap();
        let body = "{\"balance\": 100}\n";
        std::fs::write(root.path().join("9999999999/fetch_balance.json"), body).unwrap();

        let store = FixtureStore::new(root.path());
        let data = store.read(&Identity::from("9999999999"), "fetch_balance").await.unwrap();
        assert_eq!(data, body);
    }

    #[tokio::test]
    async fn non_utf8_fixture_is_still_served() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("9999999999")).unwrap();
        std::fs::write(
            root.path().join("9999999999/fetch_balance.json"),
            b"{\"name\": \"caf\xe9\"}",
        )
        .unwrap();

        let store = FixtureStore::new(root.path());
        let data = store.read(&Identity::from("9999999999"), "fetch_balance").await.unwrap();
        assert_eq!(data, "{\"name\": \"caf\u{FFFD}\"}");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let root = tempfile::tempdir().unwrap();
        let store = FixtureStore::new(root.path());
        let err = store.read(&Identity::from("9999999999"), "fetch_balance").await.unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
    }
}
