// JSON file persistence backend
// Author: kelexine (https://github.com/kelexine)

use super::{PersistenceBackend, SettingsRecord};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Stores the record as pretty-printed JSON.
///
/// Saves write a temporary file next to the target and rename it into place,
/// so a crash mid-write never leaves a truncated settings file behind.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceBackend for JsonFileBackend {
    fn load(&self) -> io::Result<Option<SettingsRecord>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let record = serde_json::from_str(&contents).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid settings JSON in {}: {}", self.path.display(), e),
            )
        })?;

        debug!("Loaded settings from {}", self.path.display());
        Ok(Some(record))
    }

    fn save(&self, record: &SettingsRecord) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(record)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
