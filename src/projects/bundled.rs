// Static project dataset compiled into the binary.
// Served when neither the store nor a refresh can provide data.

use tracing::error;

use super::record::ProjectRecord;

const BUNDLED_PROJECTS: &str = include_str!("../../data/projects.json");

/// The bundled collection; empty if the embedded JSON is unreadable.
pub fn bundled_projects() -> Vec<ProjectRecord> {
    match serde_json::from_str(BUNDLED_PROJECTS) {
        Ok(projects) => projects,
        Err(e) => {
            error!(error = %e, "Bundled project data is invalid");
            Vec::new()
        }
    }
}
