use std::io::Write;

use chrono::SecondsFormat;
use serde::Serialize;

use super::domain::SurveyRecord;

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(err) => write!(f, "failed to write survey export: {}", err),
            ExportError::Csv(err) => write!(f, "failed to encode survey export: {}", err),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(err) => Some(err),
            ExportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One flattened lead per CSV line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow<'a> {
    id: &'a str,
    submitted_at: String,
    property_type: &'static str,
    roof_orientation: String,
    roof_age: &'static str,
    electricity_consumption: &'static str,
    interested_in_other_solutions: &'static str,
    name: Option<&'a str>,
    email: Option<&'a str>,
    phone: Option<&'a str>,
    recommendation: &'static str,
}

impl<'a> From<&'a SurveyRecord> for ExportRow<'a> {
    fn from(record: &'a SurveyRecord) -> Self {
        let answer = &record.answer;
        let contact = answer.contact_info.as_ref();

        Self {
            id: &record.id.0,
            submitted_at: record
                .submitted_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            property_type: answer.property_type.label(),
            roof_orientation: answer
                .roof_orientation
                .iter()
                .map(|orientation| orientation.label())
                .collect::<Vec<_>>()
                .join(";"),
            roof_age: answer.roof_age.label(),
            electricity_consumption: answer.electricity_consumption.label(),
            interested_in_other_solutions: answer.interested_in_other_solutions.label(),
            name: contact.and_then(|contact| contact.name.as_deref()),
            email: contact.and_then(|contact| contact.email.as_deref()),
            phone: contact.and_then(|contact| contact.phone.as_deref()),
            recommendation: record.recommendation.label(),
        }
    }
}

/// Writes survey records as CSV with a header line. Returns the number of rows written.
pub fn write_csv<W: Write>(records: &[SurveyRecord], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(ExportRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(records.len())
}
