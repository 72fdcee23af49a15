use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored surveys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurveyId(pub String);

impl SurveyId {
    /// Fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for SurveyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raised when a label does not name any answer option of the question.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {question} option '{value}'")]
pub struct UnknownOption {
    pub question: &'static str,
    pub value: String,
}

fn parse_option<T: Copy>(
    question: &'static str,
    options: &[T],
    label: fn(T) -> &'static str,
    raw: &str,
) -> Result<T, UnknownOption> {
    let raw = raw.trim();
    options
        .iter()
        .copied()
        .find(|option| label(*option).eq_ignore_ascii_case(raw))
        .ok_or_else(|| UnknownOption {
            question,
            value: raw.to_string(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "Einfamilienhaus")]
    Einfamilienhaus,
    #[serde(rename = "Mehrfamilienhaus")]
    Mehrfamilienhaus,
    #[serde(rename = "Gewerbeimmobilie")]
    Gewerbeimmobilie,
}

impl PropertyType {
    pub const ALL: [Self; 3] = [
        Self::Einfamilienhaus,
        Self::Mehrfamilienhaus,
        Self::Gewerbeimmobilie,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Einfamilienhaus => "Einfamilienhaus",
            Self::Mehrfamilienhaus => "Mehrfamilienhaus",
            Self::Gewerbeimmobilie => "Gewerbeimmobilie",
        }
    }
}

impl FromStr for PropertyType {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option("propertyType", &Self::ALL, Self::label, raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoofOrientation {
    #[serde(rename = "Süd")]
    Sued,
    #[serde(rename = "West")]
    West,
    #[serde(rename = "Ost")]
    Ost,
    #[serde(rename = "Nord")]
    Nord,
    #[serde(rename = "Keine Angabe")]
    KeineAngabe,
}

impl RoofOrientation {
    pub const ALL: [Self; 5] = [
        Self::Sued,
        Self::West,
        Self::Ost,
        Self::Nord,
        Self::KeineAngabe,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sued => "Süd",
            Self::West => "West",
            Self::Ost => "Ost",
            Self::Nord => "Nord",
            Self::KeineAngabe => "Keine Angabe",
        }
    }
}

impl FromStr for RoofOrientation {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option("roofOrientation", &Self::ALL, Self::label, raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoofAge {
    #[serde(rename = "Unter 5 Jahre")]
    Unter5Jahre,
    #[serde(rename = "5–15 Jahre")]
    Zwischen5Und15Jahre,
    #[serde(rename = "Über 15 Jahre")]
    Ueber15Jahre,
    #[serde(rename = "Keine Angabe")]
    KeineAngabe,
}

impl RoofAge {
    pub const ALL: [Self; 4] = [
        Self::Unter5Jahre,
        Self::Zwischen5Und15Jahre,
        Self::Ueber15Jahre,
        Self::KeineAngabe,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Unter5Jahre => "Unter 5 Jahre",
            Self::Zwischen5Und15Jahre => "5–15 Jahre",
            Self::Ueber15Jahre => "Über 15 Jahre",
            Self::KeineAngabe => "Keine Angabe",
        }
    }
}

impl FromStr for RoofAge {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option("roofAge", &Self::ALL, Self::label, raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElectricityConsumption {
    #[serde(rename = "Unter 3.000 kWh")]
    Unter3000Kwh,
    #[serde(rename = "3.000–5.000 kWh")]
    Zwischen3000Und5000Kwh,
    #[serde(rename = "Über 5.000 kWh")]
    Ueber5000Kwh,
    #[serde(rename = "Keine Angabe")]
    KeineAngabe,
}

impl ElectricityConsumption {
    pub const ALL: [Self; 4] = [
        Self::Unter3000Kwh,
        Self::Zwischen3000Und5000Kwh,
        Self::Ueber5000Kwh,
        Self::KeineAngabe,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Unter3000Kwh => "Unter 3.000 kWh",
            Self::Zwischen3000Und5000Kwh => "3.000–5.000 kWh",
            Self::Ueber5000Kwh => "Über 5.000 kWh",
            Self::KeineAngabe => "Keine Angabe",
        }
    }
}

impl FromStr for ElectricityConsumption {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option("electricityConsumption", &Self::ALL, Self::label, raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterestedInOtherSolutions {
    #[serde(rename = "Ja")]
    Ja,
    #[serde(rename = "Nein")]
    Nein,
    #[serde(rename = "Weiß nicht")]
    WeissNicht,
}

impl InterestedInOtherSolutions {
    pub const ALL: [Self; 3] = [Self::Ja, Self::Nein, Self::WeissNicht];

    pub fn label(self) -> &'static str {
        match self {
            Self::Ja => "Ja",
            Self::Nein => "Nein",
            Self::WeissNicht => "Weiß nicht",
        }
    }
}

impl FromStr for InterestedInOtherSolutions {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option("interestedInOtherSolutions", &Self::ALL, Self::label, raw)
    }
}

/// Contact fields exactly as posted by the form. Empty strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactInfoSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Raw survey payload prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SurveySubmission {
    pub property_type: PropertyType,
    pub roof_orientation: Vec<RoofOrientation>,
    pub roof_age: RoofAge,
    pub electricity_consumption: ElectricityConsumption,
    pub interested_in_other_solutions: InterestedInOtherSolutions,
    #[serde(default)]
    pub contact_info: Option<ContactInfoSubmission>,
}

/// Validated, trimmed contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// A validated answer set. Only `SurveyGuard` builds these from submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyAnswer {
    pub property_type: PropertyType,
    pub roof_orientation: Vec<RoofOrientation>,
    pub roof_age: RoofAge,
    pub electricity_consumption: ElectricityConsumption,
    pub interested_in_other_solutions: InterestedInOtherSolutions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
}

impl SurveyAnswer {
    pub fn faces(&self, orientation: RoofOrientation) -> bool {
        self.roof_orientation.contains(&orientation)
    }
}

/// Binary tag attached to a stored survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    Ja,
    Nein,
}

impl Recommendation {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ja => "Ja",
            Self::Nein => "Nein",
        }
    }

    /// Customer-facing sentence shown on the result page.
    pub fn message(self) -> &'static str {
        match self {
            Self::Ja => "Eine Solaranlage ist für Ihr Dach sehr gut geeignet!",
            Self::Nein => "Eine Solaranlage könnte für Ihr Dach geeignet sein, aber eine genauere Prüfung ist empfehlenswert.",
        }
    }
}

/// Persisted survey: the submitted answers plus id, tag, and submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    pub id: SurveyId,
    #[serde(flatten)]
    pub answer: SurveyAnswer,
    pub recommendation: Recommendation,
    pub submitted_at: DateTime<Utc>,
}
