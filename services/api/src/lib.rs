mod cli;
mod commands;
mod infra;
mod quiz;
mod render;
mod routes;
mod server;

use vark_expert::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
