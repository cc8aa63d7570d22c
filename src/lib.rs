// porto-sync library.
// Keeps a local JSON cache of showcased GitHub projects fresh, with fallbacks when GitHub is unavailable.

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod projects;
pub mod refresh;

pub use cache::{FreshnessPolicy, ProjectStore};
pub use config::{Registry, RegistryEntry, Settings};
pub use error::{PortoError, Result};
pub use github::{GitHubClient, RepoDetails, RepoId};
pub use projects::ProjectRecord;
pub use refresh::{FallbackSource, Outcome, RefreshReport, Refresher, RepositorySource};
