use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::survey::domain::{
    ContactInfoSubmission, ElectricityConsumption, InterestedInOtherSolutions, PropertyType,
    RoofAge, RoofOrientation, SurveyId, SurveyRecord, SurveySubmission,
};
use crate::survey::repository::{RepositoryError, SurveyRepository};
use crate::survey::{survey_router, SurveyService};

pub(super) fn submission() -> SurveySubmission {
    SurveySubmission {
        property_type: PropertyType::Einfamilienhaus,
        roof_orientation: vec![RoofOrientation::Sued],
        roof_age: RoofAge::Unter5Jahre,
        electricity_consumption: ElectricityConsumption::Zwischen3000Und5000Kwh,
        interested_in_other_solutions: InterestedInOtherSolutions::Ja,
        contact_info: Some(ContactInfoSubmission {
            name: Some("Test User".to_string()),
            email: Some("test@example.com".to_string()),
            phone: Some("+49123456789".to_string()),
        }),
    }
}

pub(super) fn submission_body() -> Value {
    serde_json::to_value(submission()).expect("submission serializes")
}

pub(super) fn invalid_email_submission() -> SurveySubmission {
    let mut submission = submission();
    submission.contact_info = Some(ContactInfoSubmission {
        name: None,
        email: Some("invalid-email".to_string()),
        phone: None,
    });
    submission
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<SurveyRecord>>>,
}

impl MemoryRepository {
    pub(super) fn snapshot(&self) -> Vec<SurveyRecord> {
        self.records.lock().expect("repository mutex poisoned").clone()
    }
}

impl SurveyRepository for MemoryRepository {
    fn save(&self, record: SurveyRecord) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .push(record);
        Ok(())
    }

    fn all(&self) -> Result<Vec<SurveyRecord>, RepositoryError> {
        Ok(self.snapshot())
    }

    fn fetch(&self, id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn delete(&self, id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let position = guard.iter().position(|record| &record.id == id);
        Ok(position.map(|index| guard.remove(index)))
    }
}

pub(super) struct UnavailableRepository;

impl SurveyRepository for UnavailableRepository {
    fn save(&self, _record: SurveyRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn all(&self) -> Result<Vec<SurveyRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn fetch(&self, _id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn delete(&self, _id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }
}

pub(super) fn build_service() -> (SurveyService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = SurveyService::with_seed(repository.clone(), 11);
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn survey_router_with_service(
    service: SurveyService<MemoryRepository>,
) -> axum::Router {
    survey_router(Arc::new(service))
}
