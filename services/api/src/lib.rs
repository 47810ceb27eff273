mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use scheme_finder::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
