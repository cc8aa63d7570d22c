// Project records as persisted in the store and served to the front-end.
// Field names follow the JSON shape the front-end already reads.

use serde::{Deserialize, Serialize};

/// Image shown when the derived image URL fails to load.
pub const FALLBACK_IMAGE: &str = "/placeholder.png";

/// One showcased project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub repo_url: String,
    pub image: String,
    #[serde(default = "default_fallback_image")]
    pub fallback_image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(rename = "Lang", default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub image_path: String,
}

fn default_fallback_image() -> String {
    FALLBACK_IMAGE.to_string()
}

/// Stable partition: featured records first, arrival order kept within each group.
pub fn order_featured_first(records: Vec<ProjectRecord>) -> Vec<ProjectRecord> {
    let (mut featured, rest): (Vec<_>, Vec<_>) = records.into_iter().partition(|p| p.featured);
    featured.extend(rest);
    featured
}
