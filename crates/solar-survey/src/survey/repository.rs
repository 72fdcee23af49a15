use super::domain::{SurveyId, SurveyRecord};

/// Storage abstraction over the survey collection.
///
/// Absence is reported as `Ok(None)`; errors are reserved for storage failures.
pub trait SurveyRepository: Send + Sync {
    /// Appends a record. Id uniqueness is the caller's responsibility.
    fn save(&self, record: SurveyRecord) -> Result<(), RepositoryError>;
    /// All records in submission order.
    fn all(&self) -> Result<Vec<SurveyRecord>, RepositoryError>;
    fn fetch(&self, id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError>;
    /// Removes a record, returning it when it existed.
    fn delete(&self, id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("survey storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("survey storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
