use super::super::domain::{
    ElectricityConsumption, PropertyType, RoofAge, RoofOrientation, SurveyAnswer,
};
use super::{ScoreDetails, SuitabilityRating};

pub(crate) const MAX_SCORE: u8 = 100;

pub(crate) fn property_weight(property_type: PropertyType) -> u8 {
    match property_type {
        PropertyType::Einfamilienhaus => 30,
        PropertyType::Mehrfamilienhaus => 25,
        PropertyType::Gewerbeimmobilie => 20,
    }
}

/// South and east/west bonuses stack.
pub(crate) fn orientation_weight(answer: &SurveyAnswer) -> u8 {
    let mut weight = 0;
    if answer.faces(RoofOrientation::Sued) {
        weight += 25;
    }
    if answer.faces(RoofOrientation::West) || answer.faces(RoofOrientation::Ost) {
        weight += 15;
    }
    weight
}

pub(crate) fn roof_age_weight(roof_age: RoofAge) -> u8 {
    match roof_age {
        RoofAge::Unter5Jahre => 20,
        RoofAge::Zwischen5Und15Jahre => 15,
        RoofAge::Ueber15Jahre => 5,
        RoofAge::KeineAngabe => 0,
    }
}

pub(crate) fn consumption_weight(consumption: ElectricityConsumption) -> u8 {
    match consumption {
        ElectricityConsumption::Ueber5000Kwh => 20,
        ElectricityConsumption::Zwischen3000Und5000Kwh => 15,
        _ => 10,
    }
}

pub(crate) fn aggregate_score(answer: &SurveyAnswer) -> u8 {
    let total = property_weight(answer.property_type)
        + orientation_weight(answer)
        + roof_age_weight(answer.roof_age)
        + consumption_weight(answer.electricity_consumption);
    total.min(MAX_SCORE)
}

/// Per-category scores use their own high/low pairs, separate from the aggregate weights.
pub(crate) fn score_details(answer: &SurveyAnswer) -> ScoreDetails {
    let property_type_score = if answer.property_type == PropertyType::Einfamilienhaus {
        85
    } else {
        70
    };
    let roof_orientation_score = if answer.faces(RoofOrientation::Sued) {
        90
    } else {
        65
    };
    let roof_age_score = if answer.roof_age == RoofAge::Unter5Jahre {
        95
    } else {
        75
    };
    let consumption_score =
        if answer.electricity_consumption == ElectricityConsumption::Ueber5000Kwh {
            85
        } else {
            70
        };

    let mean = f64::from(
        u16::from(property_type_score)
            + u16::from(roof_orientation_score)
            + u16::from(roof_age_score)
            + u16::from(consumption_score),
    ) / 4.0;

    ScoreDetails {
        property_type_score,
        roof_orientation_score,
        roof_age_score,
        consumption_score,
        suitability_rating: SuitabilityRating::from_mean(mean),
    }
}
