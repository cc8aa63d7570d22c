// GitHub API endpoint functions.
// Typed fetches for repository details, language breakdowns, and topic search.

use std::fmt;

use serde::Deserialize;
use serde::de::{MapAccess, Visitor};
use tracing::warn;

use crate::error::{PortoError, Result};

use super::client::GitHubClient;
use super::types::{RepoDetails, RepoId, SearchResponse};

/// Language breakdown from `/repos/{owner}/{name}/languages`.
///
/// The API returns an object keyed by language name, largest first; entries
/// are kept in document order rather than going through a sorted map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageBreakdown(pub Vec<(String, u64)>);

impl LanguageBreakdown {
    pub fn names(self) -> Vec<String> {
        self.0.into_iter().map(|(name, _)| name).collect()
    }
}

impl<'de> Deserialize<'de> for LanguageBreakdown {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = LanguageBreakdown;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language name to byte count")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, bytes)) = map.next_entry::<String, u64>()? {
                    entries.push((name, bytes));
                }
                Ok(LanguageBreakdown(entries))
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}

impl GitHubClient {
    /// Get a specific repository.
    pub async fn get_repo(&self, id: &RepoId) -> Result<RepoDetails> {
        if !id.is_well_formed() {
            return Err(PortoError::InvalidIdentifier(id.to_string()));
        }
        let response = self
            .get(&format!("/repos/{}/{}", id.owner, id.name))
            .await?;
        let details: RepoDetails = response.json().await?;
        Ok(details)
    }

    /// Get the language breakdown for a repository.
    pub async fn get_languages(&self, id: &RepoId) -> Result<LanguageBreakdown> {
        if !id.is_well_formed() {
            return Err(PortoError::InvalidIdentifier(id.to_string()));
        }
        let response = self
            .get(&format!("/repos/{}/{}/languages", id.owner, id.name))
            .await?;
        let breakdown: LanguageBreakdown = response.json().await?;
        Ok(breakdown)
    }

    /// Search a user's repositories carrying a topic, most starred first.
    pub async fn search_repos(&self, username: &str, topic: &str) -> Result<Vec<RepoDetails>> {
        let query = format!("user:{} topic:{}", username, topic);
        let params = [
            ("q", query.as_str()),
            ("sort", "stars"),
            ("order", "desc"),
        ];
        let response = self
            .get_with_params("/search/repositories", &params)
            .await?;
        let wrapper: SearchResponse = response.json().await?;
        Ok(wrapper.items)
    }

    /// Repository details, or `None` on any failure.
    ///
    /// Malformed identifiers return `None` without a request.
    pub async fn fetch_details(&self, id: &RepoId) -> Option<RepoDetails> {
        if !id.is_well_formed() {
            return None;
        }
        match self.get_repo(id).await {
            Ok(details) => Some(details),
            Err(e) => {
                warn!(repo = %id, error = %e, "GitHub fetch failed");
                None
            }
        }
    }

    /// Language names for a repository, or an empty list on any failure.
    pub async fn fetch_languages(&self, id: &RepoId) -> Vec<String> {
        if !id.is_well_formed() {
            return Vec::new();
        }
        match self.get_languages(id).await {
            Ok(breakdown) => breakdown.names(),
            Err(e) => {
                warn!(repo = %id, error = %e, "Failed to fetch languages");
                Vec::new()
            }
        }
    }

    /// Topic search results, or an empty list on any failure.
    pub async fn search_by_topic(&self, username: &str, topic: &str) -> Vec<RepoDetails> {
        match self.search_repos(username, topic).await {
            Ok(items) => items,
            Err(e) => {
                warn!(username, topic, error = %e, "GitHub search failed");
                Vec::new()
            }
        }
    }
}
