mod estimates;
mod rules;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::domain::{Recommendation, SurveyAnswer};

/// Qualitative label derived from the mean of the four detail scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuitabilityRating {
    #[serde(rename = "Sehr gut")]
    SehrGut,
    #[serde(rename = "Gut")]
    Gut,
    #[serde(rename = "Mäßig")]
    Maessig,
    #[serde(rename = "Schlecht")]
    Schlecht,
}

impl SuitabilityRating {
    pub fn from_mean(mean: f64) -> Self {
        if mean >= 80.0 {
            Self::SehrGut
        } else if mean >= 70.0 {
            Self::Gut
        } else if mean >= 60.0 {
            Self::Maessig
        } else {
            Self::Schlecht
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SehrGut => "Sehr gut",
            Self::Gut => "Gut",
            Self::Maessig => "Mäßig",
            Self::Schlecht => "Schlecht",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    pub property_type_score: u8,
    pub roof_orientation_score: u8,
    pub roof_age_score: u8,
    pub consumption_score: u8,
    pub suitability_rating: SuitabilityRating,
}

/// Result page payload returned to the submitter. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub recommendation: String,
    pub estimated_savings: f64,
    pub payback_period: f64,
    pub system_size: f64,
    pub score: u8,
    pub details: ScoreDetails,
}

/// Engine output: the stored Ja/Nein tag alongside the customer-facing result.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    pub recommendation: Recommendation,
    pub result: ScoringResult,
}

/// Stateless scorer. All randomness comes from the caller's generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Scores an answer set. Draws from `rng` in a fixed order (recommendation, savings, payback,
    /// system size), so a seeded generator reproduces the whole outcome.
    ///
    /// The recommendation is a coin flip and is not derived from `score`.
    pub fn score<R: Rng + ?Sized>(&self, answer: &SurveyAnswer, rng: &mut R) -> ScoringOutcome {
        let recommendation = if rng.random_bool(0.5) {
            Recommendation::Ja
        } else {
            Recommendation::Nein
        };
        let estimated_savings = estimates::estimated_savings(answer, rng);
        let payback_period = estimates::payback_period(answer, rng);
        let system_size = estimates::system_size(answer, rng);

        ScoringOutcome {
            recommendation,
            result: ScoringResult {
                recommendation: recommendation.message().to_string(),
                estimated_savings,
                payback_period,
                system_size,
                score: rules::aggregate_score(answer),
                details: rules::score_details(answer),
            },
        }
    }
}
