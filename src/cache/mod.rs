// Cache module for the local project store.
// Freshness policy, default locations, and the JSON store the front-end reads.

pub mod freshness;
pub mod paths;
pub mod store;

pub use freshness::{Freshness, FreshnessPolicy, is_stale};
pub use paths::default_store_path;
pub use store::ProjectStore;
