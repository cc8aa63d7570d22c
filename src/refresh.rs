// Refresh orchestration.
// Checks freshness, fans out per-repository fetches, orders survivors, and commits or falls back.

use std::future::Future;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::cache::{Freshness, FreshnessPolicy, ProjectStore};
use crate::config::{Registry, RegistryEntry};
use crate::github::{GitHubClient, RepoDetails, RepoId};
use crate::projects::{ProjectRecord, bundled_projects, order_featured_first, transform};

/// Where repository metadata comes from.
///
/// Both operations absorb their own failures: absence and an empty list are
/// the only failure signals.
pub trait RepositorySource {
    fn fetch_details(&self, id: &RepoId) -> impl Future<Output = Option<RepoDetails>> + Send;

    fn fetch_languages(&self, id: &RepoId) -> impl Future<Output = Vec<String>> + Send;
}

impl RepositorySource for GitHubClient {
    fn fetch_details(&self, id: &RepoId) -> impl Future<Output = Option<RepoDetails>> + Send {
        GitHubClient::fetch_details(self, id)
    }

    fn fetch_languages(&self, id: &RepoId) -> impl Future<Output = Vec<String>> + Send {
        GitHubClient::fetch_languages(self, id)
    }
}

/// Which fallback supplied the data when a refresh produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackSource {
    Store,
    Bundled,
}

/// How the returned collection was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Store was fresh; no network calls were made.
    Cached,
    /// New data was fetched. `persisted` is false if the store write failed.
    Refreshed { persisted: bool },
    /// Refresh produced no records.
    Fallback(FallbackSource),
}

/// Collection handed to the front-end plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub projects: Vec<ProjectRecord>,
    pub outcome: Outcome,
}

/// Pipeline phases; `run` walks them until one yields a report.
#[derive(Debug)]
enum Phase {
    CheckFreshness,
    UseCache(Vec<ProjectRecord>),
    Refresh,
    Commit(Vec<ProjectRecord>),
    Fallback,
}

/// Drives the cache refresh pipeline against a repository source and a store.
pub struct Refresher<S> {
    source: S,
    store: ProjectStore,
    policy: FreshnessPolicy,
    registry: Registry,
    bundled: Vec<ProjectRecord>,
}

impl<S: RepositorySource> Refresher<S> {
    pub fn new(source: S, store: ProjectStore, policy: FreshnessPolicy, registry: Registry) -> Self {
        Self {
            source,
            store,
            policy,
            registry,
            bundled: bundled_projects(),
        }
    }

    /// Replace the bundled fallback collection.
    pub fn with_bundled(mut self, bundled: Vec<ProjectRecord>) -> Self {
        self.bundled = bundled;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Best available project collection. Never fails.
    pub async fn get_projects(&self) -> RefreshReport {
        self.run(Utc::now()).await
    }

    /// Same as [`Refresher::get_projects`] with an explicit clock.
    pub async fn run(&self, now: DateTime<Utc>) -> RefreshReport {
        let mut phase = Phase::CheckFreshness;
        loop {
            phase = match phase {
                Phase::CheckFreshness => self.check_freshness(now),
                Phase::UseCache(projects) => {
                    info!(count = projects.len(), "Using cached projects (fresh)");
                    return RefreshReport {
                        projects,
                        outcome: Outcome::Cached,
                    };
                }
                Phase::Refresh => {
                    let projects = self.refresh().await;
                    if projects.is_empty() {
                        Phase::Fallback
                    } else {
                        Phase::Commit(projects)
                    }
                }
                Phase::Commit(projects) => {
                    let persisted = self.commit(&projects);
                    return RefreshReport {
                        projects,
                        outcome: Outcome::Refreshed { persisted },
                    };
                }
                Phase::Fallback => return self.fallback(),
            };
            debug!(?phase, "Refresh phase");
        }
    }

    fn check_freshness(&self, now: DateTime<Utc>) -> Phase {
        match self.policy.check(now, self.store.last_modified()) {
            Freshness::Fresh => match self.load_store() {
                Some(projects) => Phase::UseCache(projects),
                None => {
                    info!("Cache is fresh but holds no usable data, refreshing");
                    Phase::Refresh
                }
            },
            Freshness::Stale => {
                info!(max_age_secs = self.policy.max_age.as_secs(), "Projects cache is stale, refreshing");
                Phase::Refresh
            }
            Freshness::Unknown => {
                info!(path = %self.store.path().display(), "Cache age unknown, refreshing");
                Phase::Refresh
            }
            Freshness::Forced => {
                info!("Forced refresh requested");
                Phase::Refresh
            }
        }
    }

    /// Fetch and enrich every worklist entry concurrently.
    ///
    /// Waits for all pipelines to settle, keeps the survivors, and orders
    /// them featured-first. Failed entries are dropped, not retried.
    pub async fn refresh(&self) -> Vec<ProjectRecord> {
        info!(repos = self.registry.len(), "Fetching worklist projects from GitHub");

        let settled = join_all(self.registry.repositories.iter().map(|e| self.enrich(e))).await;
        let attempted = settled.len();
        let survivors: Vec<ProjectRecord> = settled.into_iter().flatten().collect();

        info!(
            attempted,
            survivors = survivors.len(),
            dropped = attempted - survivors.len(),
            "Refresh pass settled"
        );
        order_featured_first(survivors)
    }

    async fn enrich(&self, entry: &RegistryEntry) -> Option<ProjectRecord> {
        let id = entry.repo_id();
        let (details, languages) = futures::join!(
            self.source.fetch_details(&id),
            self.source.fetch_languages(&id)
        );

        let Some(details) = details else {
            debug!(repo = %id, "No details, skipping");
            return None;
        };
        Some(transform(&details, languages, entry))
    }

    fn commit(&self, projects: &[ProjectRecord]) -> bool {
        match self.store.save(projects) {
            Ok(()) => {
                info!(count = projects.len(), "Projects cache updated");
                true
            }
            Err(e) => {
                warn!(path = %self.store.path().display(), error = %e, "Failed to write projects cache");
                false
            }
        }
    }

    fn fallback(&self) -> RefreshReport {
        match self.load_store() {
            Some(projects) => {
                info!("Falling back to last stored projects");
                RefreshReport {
                    projects,
                    outcome: Outcome::Fallback(FallbackSource::Store),
                }
            }
            None => {
                info!("Falling back to bundled projects");
                RefreshReport {
                    projects: self.bundled.clone(),
                    outcome: Outcome::Fallback(FallbackSource::Bundled),
                }
            }
        }
    }

    /// Stored collection if present, readable, and non-empty.
    fn load_store(&self) -> Option<Vec<ProjectRecord>> {
        match self.store.load() {
            Ok(Some(projects)) if !projects.is_empty() => Some(projects),
            Ok(_) => None,
            Err(e) => {
                warn!(path = %self.store.path().display(), error = %e, "Projects cache unreadable");
                None
            }
        }
    }
}
