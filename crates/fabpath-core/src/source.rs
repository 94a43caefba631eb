// ── Object sources ──
//
// Where managed objects come from: a live controller session, or a
// directory of saved class-query responses (`<dir>/<class>.json`, same
// envelope as the controller) for offline runs and fixtures.

use std::path::{Path, PathBuf};

use fabpath_api::{ImData, ManagedObject, models::parse_imdata};
use tracing::debug;

use crate::error::CoreError;

/// Anything that can answer a class query.
#[allow(async_fn_in_trait)]
pub trait ObjectSource {
    async fn query_class(&self, class: &str) -> Result<Vec<ManagedObject>, CoreError>;
}

/// Replays class queries saved to disk.
#[derive(Debug, Clone)]
pub struct DumpSource {
    dir: PathBuf,
}

impl DumpSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding one class's objects.
    pub fn path_for(&self, class: &str) -> PathBuf {
        self.dir.join(format!("{class}.json"))
    }

    /// Persist a class's objects in controller envelope form.
    pub fn save(&self, class: &str, objects: &[ManagedObject]) -> Result<PathBuf, CoreError> {
        let path = self.path_for(class);
        let write_err = |source: std::io::Error| CoreError::Write {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(write_err)?;
        let body = serde_json::to_string_pretty(&ImData::from_objects(objects))?;
        std::fs::write(&path, body).map_err(write_err)?;
        debug!(class, count = objects.len(), path = %path.display(), "class dump saved");
        Ok(path)
    }
}

impl ObjectSource for DumpSource {
    async fn query_class(&self, class: &str) -> Result<Vec<ManagedObject>, CoreError> {
        let path = self.path_for(class);
        debug!(class, path = %path.display(), "reading class dump");
        let body = std::fs::read_to_string(&path).map_err(|e| CoreError::Dump {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let envelope = parse_imdata(&body).map_err(|e| CoreError::Dump {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(envelope.into_objects())
    }
}
