//! Solar suitability survey intake, scoring and storage.

pub mod domain;
pub mod export;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ContactInfo, ContactInfoSubmission, ElectricityConsumption, InterestedInOtherSolutions,
    PropertyType, Recommendation, RoofAge, RoofOrientation, SurveyAnswer, SurveyId, SurveyRecord,
    SurveySubmission, UnknownOption,
};
pub use export::{write_csv, ExportError};
pub use repository::{RepositoryError, SurveyRepository};
pub use router::survey_router;
pub use scoring::{ScoreDetails, ScoringEngine, ScoringOutcome, ScoringResult, SuitabilityRating};
pub use service::{SubmissionReceipt, SurveyService, SurveyServiceError};
pub use store::JsonFileSurveyStore;
pub use validation::{SurveyGuard, ValidationError};
