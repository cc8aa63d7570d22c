// GitHub API response types.
// Repository identifiers plus the subset of the REST payloads the refresh pipeline reads.

use std::fmt;

use serde::{Deserialize, Serialize};

const GITHUB_WEB_PREFIX: &str = "https://github.com/";

/// An (owner, name) pair identifying one repository.
///
/// Parsing never fails: a missing part is kept as an empty string and
/// rejected later by [`RepoId::is_well_formed`], so callers can short-circuit
/// without touching the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `owner/name` or `https://github.com/owner/name`.
    /// Path segments after the name are ignored.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let path = trimmed.strip_prefix(GITHUB_WEB_PREFIX).unwrap_or(trimmed);
        let mut parts = path.split('/');
        let owner = parts.next().unwrap_or_default();
        let name = parts.next().unwrap_or_default();
        Self::new(owner, name)
    }

    /// Both owner and name are non-empty.
    pub fn is_well_formed(&self) -> bool {
        !self.owner.is_empty() && !self.name.is_empty()
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Repository details as returned by `GET /repos/{owner}/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDetails {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub default_branch: String,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
}

/// Search results envelope from `GET /search/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<RepoDetails>,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
