use rand::Rng;

use super::super::domain::{ElectricityConsumption, PropertyType, RoofOrientation, SurveyAnswer};

pub(crate) const MIN_PAYBACK_YEARS: f64 = 8.0;

/// Annual savings in EUR: consumption base plus up to 300 of jitter.
pub(crate) fn estimated_savings<R: Rng + ?Sized>(answer: &SurveyAnswer, rng: &mut R) -> f64 {
    let base = match answer.electricity_consumption {
        ElectricityConsumption::Ueber5000Kwh => 1500.0,
        ElectricityConsumption::Zwischen3000Und5000Kwh => 1200.0,
        _ => 800.0,
    };
    let jitter: f64 = rng.random_range(0.0..300.0);
    base + jitter
}

/// Payback in years, never below `MIN_PAYBACK_YEARS`.
pub(crate) fn payback_period<R: Rng + ?Sized>(answer: &SurveyAnswer, rng: &mut R) -> f64 {
    let mut years = 12.0;
    if answer.faces(RoofOrientation::Sued) {
        years -= 2.0;
    }
    if answer.property_type == PropertyType::Einfamilienhaus {
        years -= 1.0;
    }
    let jitter: f64 = rng.random_range(-1.0..1.0);
    (years + jitter).max(MIN_PAYBACK_YEARS)
}

/// Recommended capacity in kWp.
pub(crate) fn system_size<R: Rng + ?Sized>(answer: &SurveyAnswer, rng: &mut R) -> f64 {
    let base = match answer.electricity_consumption {
        ElectricityConsumption::Ueber5000Kwh => 10.0,
        ElectricityConsumption::Zwischen3000Und5000Kwh => 8.0,
        _ => 6.0,
    };
    let jitter: f64 = rng.random_range(0.0..2.0);
    base + jitter
}
