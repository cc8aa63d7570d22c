// GitHub API module.
// Provides the client and types for reading repository metadata from the GitHub REST API.

pub mod client;
pub mod endpoints;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::GitHubClient;
pub use endpoints::LanguageBreakdown;
pub use types::*;
