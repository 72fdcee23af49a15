use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::ValidateEmail;

use super::domain::{
    ContactInfo, ContactInfoSubmission, RoofOrientation, SurveyAnswer, SurveySubmission,
};

/// Rejections raised before a submission reaches scoring or storage.
///
/// Messages are the ones the survey form shows next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Ein unbekannter Validierungsfehler ist aufgetreten.")]
    MalformedBody,
    #[error("Das Feld '{0}' ist nicht zulässig.")]
    UnknownField(String),
    #[error("Bitte wählen Sie eine Immobilienart aus.")]
    InvalidPropertyType,
    #[error("Bitte wählen Sie mindestens eine Dachausrichtung aus.")]
    MissingRoofOrientation,
    #[error("Die Dachausrichtung '{}' wurde mehrfach angegeben.", .0.label())]
    DuplicateRoofOrientation(RoofOrientation),
    #[error("Bitte wählen Sie das Alter Ihres Dachs aus.")]
    InvalidRoofAge,
    #[error("Bitte wählen Sie Ihren Stromverbrauch aus.")]
    InvalidElectricityConsumption,
    #[error("Bitte geben Sie Ihr Interesse an weiteren Lösungen an.")]
    InvalidInterest,
    #[error("Bitte überprüfen Sie Ihre Kontaktdaten.")]
    InvalidContactInfo,
    #[error("Bitte geben Sie einen gültigen Namen ein.")]
    InvalidName,
    #[error("Bitte geben Sie eine gültige E-Mail-Adresse ein.")]
    InvalidEmail,
    #[error("Bitte geben Sie eine gültige Telefonnummer ein.")]
    InvalidPhone,
}

impl ValidationError {
    /// Payload path of the field that failed, when one can be named.
    pub fn field(&self) -> Option<&str> {
        let field = match self {
            Self::MalformedBody => return None,
            Self::UnknownField(path) => return Some(path.as_str()),
            Self::InvalidPropertyType => "propertyType",
            Self::MissingRoofOrientation | Self::DuplicateRoofOrientation(_) => "roofOrientation",
            Self::InvalidRoofAge => "roofAge",
            Self::InvalidElectricityConsumption => "electricityConsumption",
            Self::InvalidInterest => "interestedInOtherSolutions",
            Self::InvalidContactInfo => "contactInfo",
            Self::InvalidName => "contactInfo.name",
            Self::InvalidEmail => "contactInfo.email",
            Self::InvalidPhone => "contactInfo.phone",
        };
        Some(field)
    }
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9\s\-()]*$").expect("phone pattern compiles"))
}

/// Turns raw submissions into `SurveyAnswer` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurveyGuard;

impl SurveyGuard {
    /// Reads a posted JSON body field by field so each rejection names the
    /// question it belongs to.
    pub fn submission_from_json(&self, body: Value) -> Result<SurveySubmission, ValidationError> {
        let Value::Object(mut body) = body else {
            return Err(ValidationError::MalformedBody);
        };

        let property_type = take(&mut body, "propertyType", ValidationError::InvalidPropertyType)?;
        let roof_orientation = take(
            &mut body,
            "roofOrientation",
            ValidationError::MissingRoofOrientation,
        )?;
        let roof_age = take(&mut body, "roofAge", ValidationError::InvalidRoofAge)?;
        let electricity_consumption = take(
            &mut body,
            "electricityConsumption",
            ValidationError::InvalidElectricityConsumption,
        )?;
        let interested_in_other_solutions = take(
            &mut body,
            "interestedInOtherSolutions",
            ValidationError::InvalidInterest,
        )?;
        let contact_info = match body.remove("contactInfo") {
            None | Some(Value::Null) => None,
            Some(Value::Object(contact)) => Some(contact_submission(contact)?),
            Some(_) => return Err(ValidationError::InvalidContactInfo),
        };

        if let Some(unknown) = body.keys().next() {
            return Err(ValidationError::UnknownField(unknown.clone()));
        }

        Ok(SurveySubmission {
            property_type,
            roof_orientation,
            roof_age,
            electricity_consumption,
            interested_in_other_solutions,
            contact_info,
        })
    }

    pub fn answer_from_submission(
        &self,
        submission: SurveySubmission,
    ) -> Result<SurveyAnswer, ValidationError> {
        let SurveySubmission {
            property_type,
            roof_orientation,
            roof_age,
            electricity_consumption,
            interested_in_other_solutions,
            contact_info,
        } = submission;

        if roof_orientation.is_empty() {
            return Err(ValidationError::MissingRoofOrientation);
        }
        for (index, orientation) in roof_orientation.iter().enumerate() {
            if roof_orientation[..index].contains(orientation) {
                return Err(ValidationError::DuplicateRoofOrientation(*orientation));
            }
        }

        let contact_info = match contact_info {
            Some(raw) => contact_from_submission(raw)?,
            None => None,
        };

        Ok(SurveyAnswer {
            property_type,
            roof_orientation,
            roof_age,
            electricity_consumption,
            interested_in_other_solutions,
            contact_info,
        })
    }
}

fn take<T: DeserializeOwned>(
    body: &mut Map<String, Value>,
    key: &str,
    rejection: ValidationError,
) -> Result<T, ValidationError> {
    body.remove(key)
        .and_then(|value| serde_json::from_value(value).ok())
        .ok_or(rejection)
}

fn contact_submission(
    mut contact: Map<String, Value>,
) -> Result<ContactInfoSubmission, ValidationError> {
    let submission = ContactInfoSubmission {
        name: optional_text(&mut contact, "name", ValidationError::InvalidName)?,
        email: optional_text(&mut contact, "email", ValidationError::InvalidEmail)?,
        phone: optional_text(&mut contact, "phone", ValidationError::InvalidPhone)?,
    };

    if let Some(unknown) = contact.keys().next() {
        return Err(ValidationError::UnknownField(format!("contactInfo.{unknown}")));
    }
    Ok(submission)
}

fn optional_text(
    contact: &mut Map<String, Value>,
    key: &str,
    rejection: ValidationError,
) -> Result<Option<String>, ValidationError> {
    match contact.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(rejection),
    }
}

fn contact_from_submission(
    raw: ContactInfoSubmission,
) -> Result<Option<ContactInfo>, ValidationError> {
    let name = provided(raw.name);
    let email = provided(raw.email);
    let phone = provided(raw.phone);

    if let Some(email) = &email {
        if !email.validate_email() {
            return Err(ValidationError::InvalidEmail);
        }
    }
    if let Some(phone) = &phone {
        if !phone_pattern().is_match(phone) {
            return Err(ValidationError::InvalidPhone);
        }
    }

    let contact = ContactInfo { name, email, phone };
    Ok((!contact.is_empty()).then_some(contact))
}

fn provided(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::domain::{
        ElectricityConsumption, InterestedInOtherSolutions, PropertyType, RoofAge,
    };

    fn submission() -> SurveySubmission {
        SurveySubmission {
            property_type: PropertyType::Einfamilienhaus,
            roof_orientation: vec![RoofOrientation::Sued, RoofOrientation::West],
            roof_age: RoofAge::Unter5Jahre,
            electricity_consumption: ElectricityConsumption::Zwischen3000Und5000Kwh,
            interested_in_other_solutions: InterestedInOtherSolutions::Ja,
            contact_info: Some(ContactInfoSubmission {
                name: Some(" Test User ".to_string()),
                email: Some("test@example.com".to_string()),
                phone: Some("+49 (0) 123-456789".to_string()),
            }),
        }
    }

    #[test]
    fn accepts_complete_submission_and_trims_contact() {
        let answer = SurveyGuard
            .answer_from_submission(submission())
            .expect("valid submission");

        let contact = answer.contact_info.expect("contact retained");
        assert_eq!(contact.name.as_deref(), Some("Test User"));
        assert_eq!(contact.email.as_deref(), Some("test@example.com"));
        assert_eq!(answer.roof_orientation.len(), 2);
    }

    #[test]
    fn empty_contact_strings_count_as_absent() {
        let mut submission = submission();
        submission.contact_info = Some(ContactInfoSubmission {
            name: Some(String::new()),
            email: Some("  ".to_string()),
            phone: None,
        });

        let answer = SurveyGuard
            .answer_from_submission(submission)
            .expect("blank contact is allowed");
        assert!(answer.contact_info.is_none());
    }

    #[test]
    fn rejects_empty_roof_orientation() {
        let mut submission = submission();
        submission.roof_orientation.clear();

        let err = SurveyGuard
            .answer_from_submission(submission)
            .expect_err("orientation required");
        assert_eq!(err, ValidationError::MissingRoofOrientation);
        assert_eq!(err.field(), Some("roofOrientation"));
    }

    #[test]
    fn rejects_duplicate_roof_orientation() {
        let mut submission = submission();
        submission.roof_orientation.push(RoofOrientation::Sued);

        assert_eq!(
            SurveyGuard.answer_from_submission(submission),
            Err(ValidationError::DuplicateRoofOrientation(RoofOrientation::Sued))
        );
    }

    #[test]
    fn rejects_malformed_email() {
        let mut submission = submission();
        if let Some(contact) = submission.contact_info.as_mut() {
            contact.email = Some("not-an-email".to_string());
        }

        let err = SurveyGuard
            .answer_from_submission(submission)
            .expect_err("email must be valid");
        assert_eq!(err, ValidationError::InvalidEmail);
        assert_eq!(err.field(), Some("contactInfo.email"));
    }

    #[test]
    fn rejects_phone_with_letters() {
        let mut submission = submission();
        if let Some(contact) = submission.contact_info.as_mut() {
            contact.phone = Some("call me maybe".to_string());
        }

        assert_eq!(
            SurveyGuard.answer_from_submission(submission),
            Err(ValidationError::InvalidPhone)
        );
    }

    fn body() -> Value {
        serde_json::json!({
            "propertyType": "Mehrfamilienhaus",
            "roofOrientation": ["Ost", "West"],
            "roofAge": "5–15 Jahre",
            "electricityConsumption": "Unter 3.000 kWh",
            "interestedInOtherSolutions": "Weiß nicht",
            "contactInfo": { "name": "Erika", "email": "", "phone": null }
        })
    }

    #[test]
    fn reads_form_body_into_submission() {
        let submission = SurveyGuard
            .submission_from_json(body())
            .expect("well-formed body");

        assert_eq!(submission.property_type, PropertyType::Mehrfamilienhaus);
        assert_eq!(submission.roof_age, RoofAge::Zwischen5Und15Jahre);
        assert_eq!(
            submission.contact_info,
            Some(ContactInfoSubmission {
                name: Some("Erika".to_string()),
                email: Some(String::new()),
                phone: None,
            })
        );
    }

    #[test]
    fn names_the_question_with_an_unknown_label() {
        let cases = [
            ("propertyType", ValidationError::InvalidPropertyType),
            ("roofOrientation", ValidationError::MissingRoofOrientation),
            ("roofAge", ValidationError::InvalidRoofAge),
            (
                "electricityConsumption",
                ValidationError::InvalidElectricityConsumption,
            ),
            ("interestedInOtherSolutions", ValidationError::InvalidInterest),
        ];

        for (key, expected) in cases {
            let mut invalid = body();
            invalid[key] = Value::from("Vielleicht");
            let err = SurveyGuard
                .submission_from_json(invalid)
                .expect_err("label rejected");
            assert_eq!(err, expected);
            assert_eq!(err.field(), Some(key));

            let mut missing = body();
            missing.as_object_mut().expect("object").remove(key);
            assert_eq!(SurveyGuard.submission_from_json(missing), Err(expected));
        }
    }

    #[test]
    fn rejects_fields_outside_the_form() {
        let mut extra = body();
        extra["newsletter"] = Value::Bool(true);
        let err = SurveyGuard
            .submission_from_json(extra)
            .expect_err("extra field rejected");
        assert_eq!(err.field(), Some("newsletter"));
        assert_eq!(err.to_string(), "Das Feld 'newsletter' ist nicht zulässig.");

        let mut nested = body();
        nested["contactInfo"]["fax"] = Value::from("030 1234");
        assert_eq!(
            SurveyGuard.submission_from_json(nested),
            Err(ValidationError::UnknownField("contactInfo.fax".to_string()))
        );
    }

    #[test]
    fn rejects_non_text_contact_values_and_non_object_bodies() {
        let mut numeric_phone = body();
        numeric_phone["contactInfo"]["phone"] = Value::from(491234);
        assert_eq!(
            SurveyGuard.submission_from_json(numeric_phone),
            Err(ValidationError::InvalidPhone)
        );

        let mut contact_list = body();
        contact_list["contactInfo"] = serde_json::json!(["Erika"]);
        assert_eq!(
            SurveyGuard.submission_from_json(contact_list),
            Err(ValidationError::InvalidContactInfo)
        );

        let err = SurveyGuard
            .submission_from_json(serde_json::json!([1, 2, 3]))
            .expect_err("array body rejected");
        assert_eq!(err, ValidationError::MalformedBody);
        assert_eq!(err.field(), None);
    }
}
