use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;
use tracing::debug;

use super::domain::{SurveyId, SurveyRecord};
use super::repository::{RepositoryError, SurveyRepository};

/// Survey collection kept as a single pretty-printed JSON array on disk.
///
/// Every mutation reads the whole file and rewrites it, which is fine for the
/// volume one lead form produces. A rewrite lands in a sibling temp file that is
/// renamed over the collection, so readers see either the old or the new array.
/// The mutex only orders writers inside this process; separate processes
/// sharing the file are not coordinated.
#[derive(Debug)]
pub struct JsonFileSurveyStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileSurveyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, RepositoryError> {
        self.write_lock
            .lock()
            .map_err(|_| RepositoryError::Unavailable("survey store lock poisoned".to_string()))
    }

    fn read_all(&self) -> Result<Vec<SurveyRecord>, RepositoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    fn write_all(&self, records: &[SurveyRecord]) -> Result<(), RepositoryError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let payload = serde_json::to_string_pretty(records)?;
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(payload.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|err| err.error)?;
        debug!(path = %self.path.display(), records = records.len(), "survey store rewritten");
        Ok(())
    }
}

impl SurveyRepository for JsonFileSurveyStore {
    fn save(&self, record: SurveyRecord) -> Result<(), RepositoryError> {
        let _guard = self.lock()?;
        let mut records = self.read_all()?;
        records.push(record);
        self.write_all(&records)
    }

    fn all(&self) -> Result<Vec<SurveyRecord>, RepositoryError> {
        self.read_all()
    }

    fn fetch(&self, id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        Ok(self.read_all()?.into_iter().find(|record| &record.id == id))
    }

    fn delete(&self, id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        let _guard = self.lock()?;
        let mut records = self.read_all()?;
        let Some(position) = records.iter().position(|record| &record.id == id) else {
            return Ok(None);
        };

        let removed = records.remove(position);
        self.write_all(&records)?;
        Ok(Some(removed))
    }
}
