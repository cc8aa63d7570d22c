// Project store backed by a single JSON file.
// The file's modification time is the only freshness signal; no timestamp is stored inline.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::projects::ProjectRecord;

/// Durable project collection, overwritten wholesale on each successful refresh.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last write time of the store file, if it exists and is readable.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        modified_at(&self.path).ok().map(DateTime::<Utc>::from)
    }

    /// Read the stored collection. A missing file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<Vec<ProjectRecord>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        let projects: Vec<ProjectRecord> = serde_json::from_str(&contents)?;
        Ok(Some(projects))
    }

    /// Replace the stored collection with `projects`, pretty-printed.
    pub fn save(&self, projects: &[ProjectRecord]) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(projects)?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        if let Err(e) = write_then_rename(&temp_path, &self.path, json.as_bytes()) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        Ok(())
    }
}

fn write_then_rename(temp_path: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(temp_path)?;
    file.write_all(contents)?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    fs::rename(temp_path, path)
}

/// Get the modification time of a file.
fn modified_at(path: &Path) -> io::Result<std::time::SystemTime> {
    fs::metadata(path)?.modified()
}
