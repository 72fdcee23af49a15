use crate::cli::StoreArgs;
use crate::infra::{open_survey_service, parse_label};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use solar_survey::config::AppConfig;
use solar_survey::error::AppError;
use solar_survey::survey::{
    write_csv, ElectricityConsumption, InterestedInOtherSolutions, JsonFileSurveyStore,
    PropertyType, RoofAge, RoofOrientation, ScoringEngine, ScoringOutcome, SurveyGuard, SurveyId,
    SurveyRecord, SurveyService, SurveyServiceError, SurveySubmission,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SurveyIdArgs {
    /// Survey identifier as returned by `surveys list`
    pub(crate) id: String,
    #[command(flatten)]
    pub(crate) store: StoreArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Destination CSV file (defaults to stdout)
    #[arg(long, short)]
    pub(crate) output: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) store: StoreArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Property type, e.g. "Einfamilienhaus"
    #[arg(long, value_parser = parse_label::<PropertyType>)]
    pub(crate) property_type: PropertyType,
    /// Comma separated roof orientations, e.g. "Süd,West"
    #[arg(long, value_delimiter = ',', required = true, value_parser = parse_label::<RoofOrientation>)]
    pub(crate) roof_orientation: Vec<RoofOrientation>,
    /// Roof age bucket, e.g. "Unter 5 Jahre"
    #[arg(long, value_parser = parse_label::<RoofAge>)]
    pub(crate) roof_age: RoofAge,
    /// Annual consumption bucket, e.g. "3.000–5.000 kWh"
    #[arg(long, value_parser = parse_label::<ElectricityConsumption>)]
    pub(crate) consumption: ElectricityConsumption,
    /// Interest in storage, wallbox, or heat pump offers
    #[arg(long, default_value = "Weiß nicht", value_parser = parse_label::<InterestedInOtherSolutions>)]
    pub(crate) interested: InterestedInOtherSolutions,
    /// Seed for reproducible estimates and recommendation
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

fn service_for(store: StoreArgs) -> Result<SurveyService<JsonFileSurveyStore>, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = store.data_path {
        config.storage.data_path = path;
    }
    Ok(open_survey_service(&config.storage))
}

pub(crate) fn run_list(args: StoreArgs) -> Result<(), AppError> {
    let service = service_for(args)?;
    let records = service.list()?;

    if records.is_empty() {
        println!("No surveys stored");
        return Ok(());
    }

    println!("{} stored surveys", records.len());
    for record in &records {
        println!("- {}", summary_line(record));
    }
    Ok(())
}

pub(crate) fn run_show(args: SurveyIdArgs) -> Result<(), AppError> {
    let service = service_for(args.store)?;
    let record = service.get(&SurveyId(args.id))?;

    println!("{}", render_record(&record)?);
    Ok(())
}

fn render_record(record: &SurveyRecord) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub(crate) fn run_delete(args: SurveyIdArgs) -> Result<(), AppError> {
    let service = service_for(args.store)?;
    let id = SurveyId(args.id);
    service.remove(&id)?;
    println!("Deleted survey {}", id);
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let service = service_for(args.store)?;
    let records = service.list()?;

    let written = match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            write_csv(&records, BufWriter::new(file))?
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let written = write_csv(&records, &mut handle)?;
            handle.flush()?;
            written
        }
    };

    if let Some(path) = &args.output {
        println!("Exported {} surveys to {}", written, path.display());
    }
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let outcome = score_answers(args)?;
    let result = &outcome.result;

    println!("Solar suitability estimate");
    println!("Recommendation: {} ({})", outcome.recommendation.label(), result.recommendation);
    println!("Score: {}/100 ({})", result.score, result.details.suitability_rating.label());
    println!(
        "Estimated savings {:.0} EUR/year | payback {:.1} years | system size {:.1} kWp",
        result.estimated_savings, result.payback_period, result.system_size
    );
    println!(
        "Category scores: property {} | orientation {} | roof age {} | consumption {}",
        result.details.property_type_score,
        result.details.roof_orientation_score,
        result.details.roof_age_score,
        result.details.consumption_score
    );
    Ok(())
}

fn score_answers(args: ScoreArgs) -> Result<ScoringOutcome, AppError> {
    let ScoreArgs {
        property_type,
        roof_orientation,
        roof_age,
        consumption,
        interested,
        seed,
    } = args;

    let submission = SurveySubmission {
        property_type,
        roof_orientation,
        roof_age,
        electricity_consumption: consumption,
        interested_in_other_solutions: interested,
        contact_info: None,
    };
    let answer = SurveyGuard
        .answer_from_submission(submission)
        .map_err(SurveyServiceError::from)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Ok(ScoringEngine::new().score(&answer, &mut rng))
}

fn summary_line(record: &SurveyRecord) -> String {
    let orientation = record
        .answer
        .roof_orientation
        .iter()
        .map(|orientation| orientation.label())
        .collect::<Vec<_>>()
        .join("/");
    let contact = record
        .answer
        .contact_info
        .as_ref()
        .and_then(|contact| contact.name.as_deref())
        .unwrap_or("anonymous");

    format!(
        "{} | {} | {} | {} | {} | {} | recommendation {}",
        record.id,
        record.submitted_at.format("%Y-%m-%d %H:%M"),
        record.answer.property_type.label(),
        orientation,
        record.answer.electricity_consumption.label(),
        contact,
        record.recommendation.label()
    )
}
