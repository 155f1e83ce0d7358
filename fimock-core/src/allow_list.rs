use std::path::Path;
use tracing::info;

use crate::error::ConfigError;
use crate::session::Identity;

/// Static set of phone numbers permitted to use the server
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    numbers: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut numbers: Vec<String> = numbers
            .into_iter()
            .map(Into::into)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        numbers.sort();
        numbers.dedup();
        Self { numbers }
    }

    /// Every sub-directory of the fixture root is an allowed number
    pub fn from_fixture_root(root: &Path) -> Result<Self, ConfigError> {
        let entries = std::fs::read_dir(root).map_err(|source| ConfigError::FixtureRoot {
            path: root.to_path_buf(),
            source,
        })?;

        let mut numbers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ConfigError::FixtureRoot {
                path: root.to_path_buf(),
                source,
            })?;
            if entry.path().is_dir() {
                numbers.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        let list = Self::new(numbers);
        info!("Allow-list loaded from {}: {} numbers", root.display(), list.len());
        Ok(list)
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.numbers.binary_search_by(|n| n.as_str().cmp(identity.as_str())).is_ok()
    }

    pub fn numbers(&self) -> &[String] {
        &self.numbers
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}
