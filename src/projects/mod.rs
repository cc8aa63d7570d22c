// Project module.
// The persisted project record, its enrichment from GitHub data, and the bundled fallback set.

pub mod bundled;
pub mod record;
pub mod transform;

pub use bundled::bundled_projects;
pub use record::{FALLBACK_IMAGE, ProjectRecord, order_featured_first};
pub use transform::{FEATURED_TOPIC, PLACEHOLDER_DESCRIPTION, transform};
