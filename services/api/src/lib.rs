mod cli;
mod infra;
mod routes;
mod server;
mod surveys;

use solar_survey::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
