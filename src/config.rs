// Runtime configuration.
// Settings for a refresh run and the worklist table of repositories with per-repository overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::{FreshnessPolicy, ProjectStore};
use crate::error::Result;
use crate::github::{GitHubClient, RepoId};

/// Relative image path used when an entry has no override.
pub const DEFAULT_IMAGE_PATH: &str = "image.png";

/// Staleness window for the project cache.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

const BUNDLED_WORKLIST: &str = include_str!("../data/worklist.json");

/// One worklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// `owner/name` or a github.com URL.
    pub id: String,
    /// Repository-relative path of the showcase image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Feature the project regardless of its topics.
    #[serde(default)]
    pub featured: bool,
}

impl RegistryEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image_path: None,
            featured: false,
        }
    }

    pub fn repo_id(&self) -> RepoId {
        RepoId::parse(&self.id)
    }

    pub fn image_path(&self) -> &str {
        self.image_path.as_deref().unwrap_or(DEFAULT_IMAGE_PATH)
    }
}

/// Ordered worklist of repositories to enrich on each refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    pub repositories: Vec<RegistryEntry>,
}

impl Registry {
    /// Worklist shipped with the binary.
    pub fn bundled() -> Result<Self> {
        Ok(serde_json::from_str(BUNDLED_WORKLIST)?)
    }

    /// Read a worklist table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

/// Settings for one refresh invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Optional GitHub credential; `None` means anonymous requests.
    pub token: Option<String>,
    /// API root, overridable for testing against a fake.
    pub api_base: String,
    /// Location of the persisted project store.
    pub store_path: PathBuf,
    /// Staleness window.
    pub max_age: Duration,
    /// Refresh even when the store is fresh.
    pub force_refresh: bool,
}

impl Settings {
    pub fn new(store_path: PathBuf) -> Self {
        Self {
            token: None,
            api_base: crate::github::client::GITHUB_API_BASE.to_string(),
            store_path,
            max_age: DEFAULT_MAX_AGE,
            force_refresh: false,
        }
    }

    /// Attach a credential; blank values count as absent.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn policy(&self) -> FreshnessPolicy {
        FreshnessPolicy::new(self.max_age, self.force_refresh)
    }

    pub fn client(&self) -> Result<GitHubClient> {
        GitHubClient::with_base_url(self.token.as_deref(), &self.api_base)
    }

    pub fn store(&self) -> ProjectStore {
        ProjectStore::new(&self.store_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_worklist() {
        let registry = Registry::bundled().unwrap();
        assert_eq!(registry.len(), 7);
        assert!(registry.repositories.iter().all(|e| e.repo_id().is_well_formed()));

        let street = registry
            .repositories
            .iter()
            .find(|e| e.id == "terarush/StreetAI")
            .unwrap();
        assert_eq!(street.image_path(), "demo/image.png");
        assert!(!street.featured);

        let docktop = registry
            .repositories
            .iter()
            .find(|e| e.id == "mel-cell/docktop")
            .unwrap();
        assert!(docktop.featured);
        assert_eq!(docktop.image_path(), DEFAULT_IMAGE_PATH);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("worklist.json");
        fs::write(
            &path,
            r#"{"repositories": [{"id": "a/repo1", "featured": true}, {"id": "a/repo2"}]}"#,
        )
        .unwrap();

        let registry = Registry::load(&path).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.repositories[0].featured);
        assert_eq!(registry.repositories[1].image_path(), DEFAULT_IMAGE_PATH);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Registry::load(&temp_dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_blank_token_is_absent() {
        let settings = Settings::new(PathBuf::from("projects.json")).with_token(Some(" ".into()));
        assert!(settings.token.is_none());
        assert_eq!(settings.max_age, Duration::from_secs(604_800));
        assert!(!settings.force_refresh);
        assert_eq!(settings.policy(), FreshnessPolicy::default());
        assert_eq!(settings.store().path(), Path::new("projects.json"));
    }

    #[test]
    fn test_control_character_token_still_builds_client() {
        let settings = Settings::new(PathBuf::from("projects.json"))
            .with_token(Some("ab\u{1}c".to_string()));

        let client = settings.client().unwrap();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_client_follows_settings() {
        let mut settings = Settings::new(PathBuf::from("projects.json"))
            .with_token(Some("abc".to_string()));
        settings.api_base = "http://127.0.0.1:9".to_string();

        let client = settings.client().unwrap();
        assert!(client.is_authenticated());
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
    }
}
