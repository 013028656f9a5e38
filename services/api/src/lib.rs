mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use hangar_crew::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
