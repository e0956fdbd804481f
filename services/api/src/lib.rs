mod check;
mod cli;
mod infra;
mod routes;
mod server;

use playground_reviews::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
