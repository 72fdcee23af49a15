use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tracing::{info, warn};

use super::domain::{SurveyId, SurveyRecord, SurveySubmission};
use super::repository::{RepositoryError, SurveyRepository};
use super::scoring::{ScoringEngine, ScoringResult};
use super::validation::{SurveyGuard, ValidationError};

/// Stored record together with the result page shown to the submitter.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub record: SurveyRecord,
    pub result: ScoringResult,
}

/// Service composing validation, scoring, and the survey repository.
pub struct SurveyService<R> {
    guard: SurveyGuard,
    engine: ScoringEngine,
    repository: Arc<R>,
    rng: Mutex<StdRng>,
}

impl<R> SurveyService<R>
where
    R: SurveyRepository + 'static,
{
    /// Service drawing recommendations from an OS-seeded generator.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_rng(repository, StdRng::from_os_rng())
    }

    /// Service with a caller-supplied generator, for reproducible scoring.
    pub fn with_rng(repository: Arc<R>, rng: StdRng) -> Self {
        Self {
            guard: SurveyGuard,
            engine: ScoringEngine::new(),
            repository,
            rng: Mutex::new(rng),
        }
    }

    pub fn with_seed(repository: Arc<R>, seed: u64) -> Self {
        Self::with_rng(repository, StdRng::seed_from_u64(seed))
    }

    /// Submit a raw JSON body as posted by the survey form.
    pub fn submit_json(&self, body: Value) -> Result<SubmissionReceipt, SurveyServiceError> {
        let submission = self
            .guard
            .submission_from_json(body)
            .inspect_err(log_rejection)?;
        self.submit(submission)
    }

    /// Validate, score, and persist a submission.
    pub fn submit(
        &self,
        submission: SurveySubmission,
    ) -> Result<SubmissionReceipt, SurveyServiceError> {
        let answer = self
            .guard
            .answer_from_submission(submission)
            .inspect_err(log_rejection)?;

        let outcome = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| SurveyServiceError::RandomSourceUnavailable)?;
            self.engine.score(&answer, &mut *rng)
        };

        let record = SurveyRecord {
            id: SurveyId::generate(),
            answer,
            recommendation: outcome.recommendation,
            submitted_at: Utc::now(),
        };

        self.repository.save(record.clone())?;

        info!(
            survey_id = %record.id,
            score = outcome.result.score,
            recommendation = outcome.recommendation.label(),
            "survey submitted"
        );

        Ok(SubmissionReceipt {
            record,
            result: outcome.result,
        })
    }

    pub fn list(&self) -> Result<Vec<SurveyRecord>, SurveyServiceError> {
        Ok(self.repository.all()?)
    }

    pub fn get(&self, id: &SurveyId) -> Result<SurveyRecord, SurveyServiceError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| SurveyServiceError::NotFound(id.clone()))
    }

    pub fn remove(&self, id: &SurveyId) -> Result<(), SurveyServiceError> {
        match self.repository.delete(id)? {
            Some(_) => {
                info!(survey_id = %id, "survey deleted");
                Ok(())
            }
            None => {
                warn!(survey_id = %id, "survey delete requested for unknown id");
                Err(SurveyServiceError::NotFound(id.clone()))
            }
        }
    }
}

fn log_rejection(err: &ValidationError) {
    warn!(
        field = err.field().unwrap_or("body"),
        reason = %err,
        "survey submission rejected"
    );
}

/// Error raised by the survey service.
#[derive(Debug, thiserror::Error)]
pub enum SurveyServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Survey with ID {0} not found")]
    NotFound(SurveyId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("recommendation source unavailable")]
    RandomSourceUnavailable,
    #[error("survey worker stopped before finishing: {0}")]
    Worker(String),
}
